//! Mesh simplification by uniform-grid vertex clustering
//!
//! This crate reduces triangle meshes by merging every vertex that falls in
//! the same cell of a uniform 3D grid:
//! - Grid cell keys and the cell mapping ([`grid`])
//! - The clustering simplifier itself ([`clustering`])
//! - Progress checkpoints ([`observer`]) and before/after statistics ([`report`])
//! - A per-grid-size cache for display code ([`lod`])

pub mod grid;
pub mod clustering;
pub mod observer;
pub mod report;
pub mod lod;

pub use grid::*;
pub use clustering::*;
pub use observer::*;
pub use report::*;
pub use lod::*;

use clustermesh_core::{TriangleMesh, Result};

/// Simplify a mesh by reducing the number of faces/vertices
pub trait MeshSimplifier {
    /// Build a reduced copy of `mesh`; the input is never modified.
    fn simplify(&self, mesh: &TriangleMesh) -> Result<TriangleMesh>;
}
