//! PLY format support
//!
//! Reads ASCII and binary PLY meshes whose faces are all triangles, and writes
//! meshes back in any of the three PLY encodings.

use crate::{MeshReader, MeshWriter};
use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use clustermesh_core::{Error, Point3f, Result, TriangleMesh};
use ply_rs::{
    parser::Parser,
    ply::{
        Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
        ScalarType,
    },
    writer::Writer,
};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub struct PlyReader;
pub struct PlyWriter;

/// PLY body encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlyFormat {
    #[default]
    Ascii,
    BinaryLittleEndian,
    BinaryBigEndian,
}

impl From<PlyFormat> for Encoding {
    fn from(format: PlyFormat) -> Self {
        match format {
            PlyFormat::Ascii => Encoding::Ascii,
            PlyFormat::BinaryLittleEndian => Encoding::BinaryLittleEndian,
            PlyFormat::BinaryBigEndian => Encoding::BinaryBigEndian,
        }
    }
}

/// Options for writing PLY files
#[derive(Debug, Clone, Default)]
pub struct PlyWriteOptions {
    pub format: PlyFormat,
    /// Write each triangle's cached normal as `nx ny nz` on the face element.
    pub include_normals: bool,
    pub comments: Vec<String>,
}

impl PlyWriteOptions {
    pub fn ascii() -> Self {
        Self::default()
    }

    pub fn binary_little_endian() -> Self {
        Self {
            format: PlyFormat::BinaryLittleEndian,
            ..Self::default()
        }
    }

    pub fn binary_big_endian() -> Self {
        Self {
            format: PlyFormat::BinaryBigEndian,
            ..Self::default()
        }
    }

    pub fn with_normals(mut self, include: bool) -> Self {
        self.include_normals = include;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }
}

impl PlyReader {
    /// Parse a PLY mesh from any buffered reader.
    ///
    /// Every face must have exactly three corners referencing existing
    /// vertices. Face normals are derived before returning.
    pub fn parse_mesh<R: BufRead>(reader: &mut R) -> Result<TriangleMesh> {
        let parser = Parser::<DefaultElement>::new();
        let ply = parser.read_ply(reader)?;

        let mut vertices = Vec::new();
        if let Some(vertex_element) = ply.payload.get("vertex") {
            vertices.reserve(vertex_element.len());
            for vertex in vertex_element {
                let x = extract_property_value(vertex, "x")?;
                let y = extract_property_value(vertex, "y")?;
                let z = extract_property_value(vertex, "z")?;

                vertices.push(Point3f::new(x, y, z));
            }
        }

        let mut faces = Vec::new();
        if let Some(face_element) = ply.payload.get("face") {
            faces.reserve(face_element.len());
            for (fi, face) in face_element.iter().enumerate() {
                let indices = extract_face_indices(face)?;
                match indices.as_slice() {
                    &[a, b, c] => faces.push([a, b, c]),
                    other => {
                        return Err(Error::InvalidData(format!(
                            "only triangular faces are supported, face {} has {} corners",
                            fi,
                            other.len()
                        )))
                    }
                }
            }
        }

        let mesh = TriangleMesh::try_from_vertices_and_faces(vertices, faces)?.with_normals();
        log::debug!(
            "parsed PLY mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

impl MeshReader for PlyReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::parse_mesh(&mut reader)
    }
}

impl PlyWriter {
    /// Write `mesh` to any writer using `options`.
    pub fn write_mesh_to<W: Write>(
        mesh: &TriangleMesh,
        out: &mut W,
        options: &PlyWriteOptions,
    ) -> Result<()> {
        let faces = face_indices_u32(mesh)?;

        let mut ply = Ply::<DefaultElement>::new();
        ply.header.encoding = options.format.into();
        for comment in &options.comments {
            ply.header.comments.push(comment.clone());
        }

        // Define vertex element
        let mut vertex_element = ElementDef::new("vertex".to_string());
        vertex_element.count = mesh.vertex_count();
        for name in ["x", "y", "z"] {
            vertex_element.properties.add(PropertyDef::new(
                name.to_string(),
                PropertyType::Scalar(ScalarType::Float),
            ));
        }
        ply.header.elements.add(vertex_element);

        // Define face element
        let mut face_element = ElementDef::new("face".to_string());
        face_element.count = mesh.triangle_count();
        face_element.properties.add(PropertyDef::new(
            "vertex_indices".to_string(),
            PropertyType::List(ScalarType::UChar, ScalarType::UInt),
        ));
        if options.include_normals {
            for name in ["nx", "ny", "nz"] {
                face_element.properties.add(PropertyDef::new(
                    name.to_string(),
                    PropertyType::Scalar(ScalarType::Float),
                ));
            }
        }
        ply.header.elements.add(face_element);

        let writer = Writer::new();
        match options.format {
            PlyFormat::Ascii => {
                insert_ascii_payload(&mut ply, mesh, &faces, options.include_normals);
                writer.write_ply(out, &mut ply)?;
            }
            // ply-rs prefixes binary lists with the element count, so the
            // body is written here with the per-face list length.
            PlyFormat::BinaryLittleEndian => {
                writer.write_header(out, &ply.header)?;
                write_binary_body::<LittleEndian, W>(out, mesh, &faces, options.include_normals)?;
            }
            PlyFormat::BinaryBigEndian => {
                writer.write_header(out, &ply.header)?;
                write_binary_body::<BigEndian, W>(out, mesh, &faces, options.include_normals)?;
            }
        }
        Ok(())
    }

    /// Write `mesh` to `path` using `options`.
    pub fn write_mesh_with_options<P: AsRef<Path>>(
        mesh: &TriangleMesh,
        path: P,
        options: &PlyWriteOptions,
    ) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_mesh_to(mesh, &mut writer, options)?;
        writer.flush()?;
        Ok(())
    }
}

impl MeshWriter for PlyWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        Self::write_mesh_with_options(mesh, path, &PlyWriteOptions::default())
    }
}

/// Triangle corners as PLY `uint`s, rejecting indices that do not fit
fn face_indices_u32(mesh: &TriangleMesh) -> Result<Vec<[u32; 3]>> {
    mesh.triangles()
        .iter()
        .map(|tri| -> Result<[u32; 3]> {
            let [a, b, c] = tri.indices;
            let convert = |i: usize| {
                u32::try_from(i).map_err(|_| {
                    Error::InvalidData(format!("vertex index {} does not fit in a PLY uint", i))
                })
            };
            Ok([convert(a)?, convert(b)?, convert(c)?])
        })
        .collect()
}

fn insert_ascii_payload(
    ply: &mut Ply<DefaultElement>,
    mesh: &TriangleMesh,
    faces: &[[u32; 3]],
    include_normals: bool,
) {
    let vertices: Vec<DefaultElement> = mesh
        .vertices()
        .iter()
        .map(|v| {
            let mut element = DefaultElement::new();
            element.insert("x".to_string(), Property::Float(v.x));
            element.insert("y".to_string(), Property::Float(v.y));
            element.insert("z".to_string(), Property::Float(v.z));
            element
        })
        .collect();
    ply.payload.insert("vertex".to_string(), vertices);

    let face_elements: Vec<DefaultElement> = faces
        .iter()
        .zip(mesh.triangles())
        .map(|(indices, tri)| {
            let mut element = DefaultElement::new();
            element.insert("vertex_indices".to_string(), Property::ListUInt(indices.to_vec()));
            if include_normals {
                element.insert("nx".to_string(), Property::Float(tri.normal.x));
                element.insert("ny".to_string(), Property::Float(tri.normal.y));
                element.insert("nz".to_string(), Property::Float(tri.normal.z));
            }
            element
        })
        .collect();
    ply.payload.insert("face".to_string(), face_elements);
}

/// Vertex and face records in the property order declared by the header
fn write_binary_body<B: ByteOrder, W: Write>(
    out: &mut W,
    mesh: &TriangleMesh,
    faces: &[[u32; 3]],
    include_normals: bool,
) -> Result<()> {
    for v in mesh.vertices() {
        out.write_f32::<B>(v.x)?;
        out.write_f32::<B>(v.y)?;
        out.write_f32::<B>(v.z)?;
    }

    for (indices, tri) in faces.iter().zip(mesh.triangles()) {
        out.write_u8(3)?;
        for &i in indices {
            out.write_u32::<B>(i)?;
        }
        if include_normals {
            out.write_f32::<B>(tri.normal.x)?;
            out.write_f32::<B>(tri.normal.y)?;
            out.write_f32::<B>(tri.normal.z)?;
        }
    }
    Ok(())
}

/// Extract a property value as f32 from a PLY element
fn extract_property_value(element: &DefaultElement, name: &str) -> Result<f32> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(*val),
        Some(Property::Double(val)) => Ok(*val as f32),
        Some(Property::Char(val)) => Ok(*val as f32),
        Some(Property::UChar(val)) => Ok(*val as f32),
        Some(Property::Short(val)) => Ok(*val as f32),
        Some(Property::UShort(val)) => Ok(*val as f32),
        Some(Property::Int(val)) => Ok(*val as f32),
        Some(Property::UInt(val)) => Ok(*val as f32),
        _ => Err(Error::InvalidData(format!(
            "Property '{}' not found or invalid type",
            name
        ))),
    }
}

/// Extract face indices from a PLY face element
fn extract_face_indices(element: &DefaultElement) -> Result<Vec<usize>> {
    let raw: Vec<i64> = match element
        .get("vertex_indices")
        .or_else(|| element.get("vertex_index"))
    {
        Some(Property::ListChar(v)) => v.iter().map(|&i| i as i64).collect(),
        Some(Property::ListUChar(v)) => v.iter().map(|&i| i as i64).collect(),
        Some(Property::ListShort(v)) => v.iter().map(|&i| i as i64).collect(),
        Some(Property::ListUShort(v)) => v.iter().map(|&i| i as i64).collect(),
        Some(Property::ListInt(v)) => v.iter().map(|&i| i as i64).collect(),
        Some(Property::ListUInt(v)) => v.iter().map(|&i| i as i64).collect(),
        _ => {
            return Err(Error::InvalidData(
                "Face indices not found".to_string(),
            ))
        }
    };

    raw.into_iter()
        .map(|i| {
            usize::try_from(i)
                .map_err(|_| Error::InvalidData(format!("negative vertex index {}", i)))
        })
        .collect()
}
