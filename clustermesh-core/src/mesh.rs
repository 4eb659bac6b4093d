//! Mesh data structures and functionality

use crate::bounds::BoundingBox;
use crate::point::*;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Face normals shorter than this before normalization are left as zero.
pub const NORMAL_EPSILON: f32 = 1e-6;

/// Largest extents below this are treated as a point when normalizing.
const SCALE_EPSILON: f32 = 1e-6;

/// A triangle referencing three vertices of its mesh, with a cached face normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
    pub normal: Vector3f,
}

impl Triangle {
    /// Create a triangle with a zero normal.
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self {
            indices: [a, b, c],
            normal: Vector3f::zeros(),
        }
    }

    /// True when two or more corners reference the same vertex.
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.indices;
        a == b || b == c || c == a
    }
}

impl From<[usize; 3]> for Triangle {
    fn from(indices: [usize; 3]) -> Self {
        Self::new(indices[0], indices[1], indices[2])
    }
}

/// A triangle mesh with vertices and faces
///
/// Vertex order defines index identity. Triangle order carries no meaning.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    vertices: Vec<Point3f>,
    triangles: Vec<Triangle>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and faces.
    ///
    /// Indices are trusted; use [`TriangleMesh::try_from_vertices_and_faces`]
    /// for data that has not been validated yet.
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            triangles: faces.into_iter().map(Triangle::from).collect(),
        }
    }

    /// Create a mesh from vertices and faces, rejecting out-of-range indices.
    pub fn try_from_vertices_and_faces(
        vertices: Vec<Point3f>,
        faces: Vec<[usize; 3]>,
    ) -> Result<Self> {
        let mesh = Self::from_vertices_and_faces(vertices, faces);
        mesh.validate()?;
        Ok(mesh)
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// A mesh without vertices has no geometry at all.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Point3f] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Add a vertex to the mesh, returning its index
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a triangle to the mesh, returning its index
    pub fn add_triangle(&mut self, indices: [usize; 3]) -> Result<usize> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.vertices.len()) {
            return Err(Error::InvalidData(format!(
                "triangle index {} out of range for {} vertices",
                bad,
                self.vertices.len()
            )));
        }
        let index = self.triangles.len();
        self.triangles.push(Triangle::from(indices));
        Ok(index)
    }

    /// Check that every triangle references existing vertices.
    pub fn validate(&self) -> Result<()> {
        let n = self.vertices.len();
        for (ti, tri) in self.triangles.iter().enumerate() {
            if let Some(&bad) = tri.indices.iter().find(|&&i| i >= n) {
                return Err(Error::InvalidData(format!(
                    "triangle {} references vertex {} but the mesh has {} vertices",
                    ti, bad, n
                )));
            }
        }
        Ok(())
    }

    /// Bounding box of all vertices, `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.vertices)
    }

    /// Unit normal of `triangle`, or zero if it has (near) zero area.
    pub fn face_normal(&self, triangle: &Triangle) -> Vector3f {
        let [a, b, c] = triangle.indices;
        let v0 = self.vertices[a];

        let edge1 = self.vertices[b] - v0;
        let edge2 = self.vertices[c] - v0;

        let n = edge1.cross(&edge2);
        let len = n.magnitude();
        if len > NORMAL_EPSILON {
            n / len
        } else {
            Vector3f::zeros()
        }
    }

    /// Derive and cache the normal of every triangle.
    pub fn compute_normals(&mut self) {
        let normals: Vec<Vector3f> = self
            .triangles
            .iter()
            .map(|tri| self.face_normal(tri))
            .collect();

        for (tri, normal) in self.triangles.iter_mut().zip(normals) {
            tri.normal = normal;
        }
    }

    /// Builder-style variant of [`TriangleMesh::compute_normals`].
    pub fn with_normals(mut self) -> Self {
        self.compute_normals();
        self
    }

    /// Center the mesh on the origin and scale its largest extent to 1.
    ///
    /// Returns the original center and the scale divisor, or `None` for an
    /// empty mesh. Cached normals stay valid since the scale is uniform.
    pub fn normalize_to_unit_box(&mut self) -> Option<(Point3f, f32)> {
        let bbox = self.bounding_box()?;
        let center = bbox.center();

        let mut scale = bbox.max_extent();
        if scale < SCALE_EPSILON {
            scale = 1.0;
        }

        for v in &mut self.vertices {
            *v = Point3f::from((*v - center) / scale);
        }

        Some((center, scale))
    }

    /// Three vertices per triangle, each carrying the triangle's cached normal.
    pub fn flat_shaded_vertices(&self) -> Vec<ShadedVertex> {
        self.triangles
            .iter()
            .flat_map(|tri| {
                tri.indices
                    .iter()
                    .map(move |&i| ShadedVertex::new(self.vertices[i], tri.normal))
            })
            .collect()
    }
}
