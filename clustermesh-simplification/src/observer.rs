//! Progress checkpoints reported while a mesh is being clustered
//!
//! Observers only watch; nothing they do can change the simplified mesh.

use clustermesh_core::BoundingBox;

/// A stage boundary inside one simplification run.
#[derive(Debug, Clone, PartialEq)]
pub enum Checkpoint {
    /// The input bounding box is known.
    BoundsComputed { bounds: BoundingBox },
    /// Every input vertex has been assigned to a cell.
    Accumulated {
        input_vertices: usize,
        occupied_cells: usize,
    },
    /// Triangles have been remapped onto cluster representatives.
    Remapped {
        kept_triangles: usize,
        discarded_triangles: usize,
    },
}

/// Receives [`Checkpoint`]s from a simplifier.
pub trait SimplifyObserver {
    fn checkpoint(&mut self, checkpoint: &Checkpoint);
}

impl<F> SimplifyObserver for F
where
    F: FnMut(&Checkpoint),
{
    fn checkpoint(&mut self, checkpoint: &Checkpoint) {
        (*self)(checkpoint)
    }
}

/// Ignores every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SimplifyObserver for NoopObserver {
    fn checkpoint(&mut self, _checkpoint: &Checkpoint) {}
}

/// Forwards checkpoints to the `log` facade at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl SimplifyObserver for LogObserver {
    fn checkpoint(&mut self, checkpoint: &Checkpoint) {
        match checkpoint {
            Checkpoint::BoundsComputed { bounds } => {
                log::debug!("bounds computed: min {}, max {}", bounds.min, bounds.max);
            }
            Checkpoint::Accumulated {
                input_vertices,
                occupied_cells,
            } => {
                log::debug!(
                    "accumulated {} vertices into {} cells",
                    input_vertices,
                    occupied_cells
                );
            }
            Checkpoint::Remapped {
                kept_triangles,
                discarded_triangles,
            } => {
                log::debug!(
                    "remapped triangles: {} kept, {} collapsed",
                    kept_triangles,
                    discarded_triangles
                );
            }
        }
    }
}
