//! Mesh I/O for clustermesh
//!
//! Reads and writes triangle meshes on disk. PLY is the only supported
//! format; ASCII and both binary encodings are handled by [`ply`].

pub mod ply;

pub use ply::{PlyFormat, PlyReader, PlyWriteOptions, PlyWriter};

use clustermesh_core::{Error, Result, TriangleMesh};
use std::path::Path;

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()>;
}

fn has_ply_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("ply"))
        .unwrap_or(false)
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    if has_ply_extension(path) {
        PlyReader::read_mesh(path)
    } else {
        Err(Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        )))
    }
}

/// Auto-detect format and write mesh
pub fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
    write_mesh_with_options(mesh, path, &PlyWriteOptions::default())
}

/// Write mesh with explicit PLY options; the path must still end in `.ply`.
pub fn write_mesh_with_options<P: AsRef<Path>>(
    mesh: &TriangleMesh,
    path: P,
    options: &PlyWriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    if has_ply_extension(path) {
        PlyWriter::write_mesh_with_options(mesh, path, options)
    } else {
        Err(Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clustermesh_core::Point3f;

    fn make_triangle() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
        .with_normals()
    }

    #[test]
    fn test_dispatch_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.PLY");

        write_mesh(&make_triangle(), &path).unwrap();
        let loaded = read_mesh(&path).unwrap();
        assert_eq!(loaded, make_triangle());
    }

    #[test]
    fn test_unsupported_extensions() {
        let dir = tempfile::tempdir().unwrap();

        for name in ["mesh.obj", "mesh.stl", "mesh"] {
            let path = dir.path().join(name);
            assert!(matches!(read_mesh(&path), Err(Error::UnsupportedFormat(_))));
            assert!(matches!(
                write_mesh(&make_triangle(), &path),
                Err(Error::UnsupportedFormat(_))
            ));
            assert!(!path.exists());
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_mesh(dir.path().join("absent.ply"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
