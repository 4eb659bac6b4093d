//! Uniform spatial grid over a bounding box

use clustermesh_core::{BoundingBox, Point3f};

/// Integer coordinates of one cell of a [`UniformGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCellKey {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCellKey {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Partition of a bounding box into `grid_size` cells along every axis.
///
/// Cells are uniform per axis, so a non-cubic box gets non-cubic cells.
#[derive(Debug, Clone, Copy)]
pub struct UniformGrid {
    min: [f64; 3],
    extent: [f64; 3],
    grid_size: u32,
}

impl UniformGrid {
    /// `grid_size` must be at least 1 and fit in an `i32`.
    pub fn new(bounds: &BoundingBox, grid_size: u32) -> Self {
        debug_assert!(grid_size >= 1 && grid_size <= i32::MAX as u32);
        let min = [
            bounds.min.x as f64,
            bounds.min.y as f64,
            bounds.min.z as f64,
        ];
        let extent = [
            bounds.max.x as f64 - min[0],
            bounds.max.y as f64 - min[1],
            bounds.max.z as f64 - min[2],
        ];
        Self {
            min,
            extent,
            grid_size,
        }
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Cell containing `p`.
    ///
    /// Points on the max face of the box belong to the last cell. A flat axis
    /// (zero extent) always maps to 0.
    pub fn cell_of(&self, p: &Point3f) -> GridCellKey {
        GridCellKey {
            x: self.axis_cell(0, p.x),
            y: self.axis_cell(1, p.y),
            z: self.axis_cell(2, p.z),
        }
    }

    fn axis_cell(&self, axis: usize, coord: f32) -> i32 {
        let extent = self.extent[axis];
        if extent <= 0.0 {
            return 0;
        }
        let last = self.grid_size as i64 - 1;
        let t = (coord as f64 - self.min[axis]) / extent;
        let cell = (t * self.grid_size as f64).floor() as i64;
        cell.clamp(0, last) as i32
    }
}
