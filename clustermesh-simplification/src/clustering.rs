//! Clustering-based mesh simplification
//!
//! Implements uniform-grid vertex clustering (Rossignac & Borrel 1993): the
//! bounding box is split into `grid_size³` cells, every cell's vertices are
//! replaced by their centroid, and triangles whose corners end up in fewer
//! than three distinct cells are dropped.

use crate::grid::{GridCellKey, UniformGrid};
use crate::observer::{Checkpoint, LogObserver, SimplifyObserver};
use crate::MeshSimplifier;
use clustermesh_core::{Error, Point3f, Result, TriangleMesh, Vector3d};
use rayon::prelude::*;
use std::collections::HashMap;

// ============================================================
// Cluster Accumulation
// ============================================================

/// Running sum of the vertices that fell into one cell.
#[derive(Debug, Clone, Copy)]
struct ClusterAccumulator {
    sum: Vector3d,
    count: usize,
}

impl ClusterAccumulator {
    fn new() -> Self {
        Self {
            sum: Vector3d::zeros(),
            count: 0,
        }
    }

    fn add(&mut self, p: &Point3f) {
        self.sum += Vector3d::new(p.x as f64, p.y as f64, p.z as f64);
        self.count += 1;
    }

    /// Only meaningful once every vertex of the cell has been added.
    fn centroid(&self) -> Point3f {
        let c = self.sum / self.count as f64;
        Point3f::new(c.x as f32, c.y as f32, c.z as f32)
    }
}

/// Vertex-to-cell assignment for one simplification run.
struct CellClusters {
    /// Cell of every input vertex, parallel to the input vertex list.
    vertex_cells: Vec<GridCellKey>,
    /// Output vertex index of every occupied cell.
    cell_index: HashMap<GridCellKey, usize>,
    /// Accumulators indexed by output vertex index.
    accumulators: Vec<ClusterAccumulator>,
}

impl CellClusters {
    /// Output indices follow the order in which cells are first hit.
    fn accumulate(vertices: &[Point3f], grid: &UniformGrid) -> Self {
        let mut vertex_cells = Vec::with_capacity(vertices.len());
        let mut cell_index: HashMap<GridCellKey, usize> = HashMap::new();
        let mut accumulators: Vec<ClusterAccumulator> = Vec::new();

        for v in vertices {
            let cell = grid.cell_of(v);
            vertex_cells.push(cell);

            let next = accumulators.len();
            let ci = *cell_index.entry(cell).or_insert(next);
            if ci == next {
                accumulators.push(ClusterAccumulator::new());
            }
            accumulators[ci].add(v);
        }

        Self {
            vertex_cells,
            cell_index,
            accumulators,
        }
    }

    fn occupied_cells(&self) -> usize {
        self.accumulators.len()
    }

    fn representatives(&self) -> Vec<Point3f> {
        self.accumulators.iter().map(|acc| acc.centroid()).collect()
    }

    /// Output vertex of input vertex `vi`, via its cell.
    fn output_index(&self, vi: usize) -> Option<usize> {
        let cell = self.vertex_cells.get(vi)?;
        self.cell_index.get(cell).copied()
    }
}

// ============================================================
// Clustering Simplifier
// ============================================================

/// Uniform-grid vertex clustering simplifier.
///
/// The grid has the same number of cells along each axis of the input's
/// bounding box. Output vertices are cell centroids; output triangle normals
/// are left zeroed for the caller to derive.
///
/// ```
/// use clustermesh_core::{Point3f, TriangleMesh};
/// use clustermesh_simplification::{GridClusteringSimplifier, MeshSimplifier};
///
/// let mesh = TriangleMesh::from_vertices_and_faces(
///     vec![
///         Point3f::new(0.0, 0.0, 0.0),
///         Point3f::new(1.0, 0.0, 0.0),
///         Point3f::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
/// let simplified = GridClusteringSimplifier::new(1)?.simplify(&mesh)?;
/// assert_eq!(simplified.vertex_count(), 1);
/// assert_eq!(simplified.triangle_count(), 0);
/// # Ok::<(), clustermesh_core::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridClusteringSimplifier {
    grid_size: u32,
}

impl Default for GridClusteringSimplifier {
    fn default() -> Self {
        Self {
            grid_size: Self::DEFAULT_GRID_SIZE,
        }
    }
}

impl GridClusteringSimplifier {
    pub const DEFAULT_GRID_SIZE: u32 = 16;

    /// Largest accepted grid size; cell coordinates are stored as `i32`.
    pub const MAX_GRID_SIZE: u32 = i32::MAX as u32;

    /// Create a simplifier with `grid_size` cells per axis.
    pub fn new(grid_size: u32) -> Result<Self> {
        if grid_size == 0 {
            return Err(Error::InvalidConfiguration(
                "grid size must be at least 1".to_string(),
            ));
        }
        if grid_size > Self::MAX_GRID_SIZE {
            return Err(Error::InvalidConfiguration(format!(
                "grid size must be at most {}, got {}",
                Self::MAX_GRID_SIZE,
                grid_size
            )));
        }
        Ok(Self { grid_size })
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Simplify `mesh`, reporting progress to `observer`.
    pub fn simplify_with_observer(
        &self,
        mesh: &TriangleMesh,
        observer: &mut dyn SimplifyObserver,
    ) -> Result<TriangleMesh> {
        let bounds = mesh.bounding_box().ok_or(Error::EmptyMesh)?;
        observer.checkpoint(&Checkpoint::BoundsComputed { bounds });

        let grid = UniformGrid::new(&bounds, self.grid_size);
        let clusters = CellClusters::accumulate(mesh.vertices(), &grid);
        observer.checkpoint(&Checkpoint::Accumulated {
            input_vertices: mesh.vertex_count(),
            occupied_cells: clusters.occupied_cells(),
        });

        let mut faces: Vec<[usize; 3]> = Vec::with_capacity(mesh.triangle_count());
        for (ti, tri) in mesh.triangles().iter().enumerate() {
            let [a, b, c] = tri.indices;
            let remapped = match (
                clusters.output_index(a),
                clusters.output_index(b),
                clusters.output_index(c),
            ) {
                (Some(na), Some(nb), Some(nc)) => [na, nb, nc],
                _ => {
                    return Err(Error::InvalidData(format!(
                        "triangle {} references a vertex outside the {} input vertices",
                        ti,
                        mesh.vertex_count()
                    )))
                }
            };

            // Skip triangles collapsed by clustering
            let [na, nb, nc] = remapped;
            if na != nb && nb != nc && nc != na {
                faces.push(remapped);
            }
        }
        observer.checkpoint(&Checkpoint::Remapped {
            kept_triangles: faces.len(),
            discarded_triangles: mesh.triangle_count() - faces.len(),
        });

        Ok(TriangleMesh::from_vertices_and_faces(
            clusters.representatives(),
            faces,
        ))
    }
}

impl MeshSimplifier for GridClusteringSimplifier {
    fn simplify(&self, mesh: &TriangleMesh) -> Result<TriangleMesh> {
        self.simplify_with_observer(mesh, &mut LogObserver)
    }
}

/// Simplify `mesh` once per grid size, running the levels in parallel.
///
/// Results are returned in the order of `grid_sizes`. Every size is checked
/// before any work starts.
pub fn simplify_levels(mesh: &TriangleMesh, grid_sizes: &[u32]) -> Result<Vec<TriangleMesh>> {
    let simplifiers = grid_sizes
        .iter()
        .map(|&g| GridClusteringSimplifier::new(g))
        .collect::<Result<Vec<_>>>()?;

    simplifiers
        .par_iter()
        .map(|s| s.simplify(mesh))
        .collect()
}
