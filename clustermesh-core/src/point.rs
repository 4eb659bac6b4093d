//! Point types and related functionality

use bytemuck::{Pod, Zeroable};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// A render-ready vertex: position plus the normal of the face it belongs to.
///
/// Laid out as six consecutive `f32`s so a slice of these can be uploaded to a
/// vertex buffer with [`bytemuck::cast_slice`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct ShadedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl ShadedVertex {
    pub fn new(position: Point3f, normal: Vector3f) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            normal: [normal.x, normal.y, normal.z],
        }
    }
}
