//! Before/after statistics for a simplification run

use clustermesh_core::TriangleMesh;
use std::fmt;

/// Vertex and triangle counts of an input mesh and its simplified version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplificationReport {
    pub input_vertices: usize,
    pub input_triangles: usize,
    pub output_vertices: usize,
    pub output_triangles: usize,
}

impl SimplificationReport {
    pub fn from_meshes(input: &TriangleMesh, output: &TriangleMesh) -> Self {
        Self {
            input_vertices: input.vertex_count(),
            input_triangles: input.triangle_count(),
            output_vertices: output.vertex_count(),
            output_triangles: output.triangle_count(),
        }
    }

    /// Output vertices over input vertices, 0 for an empty input.
    pub fn vertex_ratio(&self) -> f32 {
        ratio(self.output_vertices, self.input_vertices)
    }

    /// Output triangles over input triangles, 0 for an input without triangles.
    pub fn triangle_ratio(&self) -> f32 {
        ratio(self.output_triangles, self.input_triangles)
    }
}

fn ratio(output: usize, input: usize) -> f32 {
    if input == 0 {
        0.0
    } else {
        output as f32 / input as f32
    }
}

impl fmt::Display for SimplificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} vertices, {} -> {} triangles (reduction ratio {:.2}%)",
            self.input_vertices,
            self.output_vertices,
            self.input_triangles,
            self.output_triangles,
            self.vertex_ratio() * 100.0
        )
    }
}
