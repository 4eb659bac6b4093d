//! Core data structures for clustermesh
//!
//! This crate provides the in-memory geometry model used by the simplifier:
//! points, triangles with cached face normals, triangle meshes and bounding
//! boxes. It performs no I/O.

pub mod point;
pub mod bounds;
pub mod mesh;
pub mod error;

pub use point::*;
pub use bounds::*;
pub use mesh::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
