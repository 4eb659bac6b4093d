//! Caching of simplified levels for display code
//!
//! A viewer keeps one source mesh and flips between it and simplified
//! versions at a few grid sizes. [`LodCache`] holds that state so the
//! simplifier itself stays a pure function.

use crate::{GridClusteringSimplifier, MeshSimplifier, SimplificationReport};
use clustermesh_core::{Error, Result, TriangleMesh};
use std::collections::HashMap;
use std::sync::Arc;

/// Source mesh plus memoized simplified levels keyed by grid size.
///
/// Cached levels have their normals derived and are ready to draw.
#[derive(Debug, Clone)]
pub struct LodCache {
    source: Arc<TriangleMesh>,
    levels: HashMap<u32, Arc<TriangleMesh>>,
}

impl LodCache {
    pub fn new(source: TriangleMesh) -> Self {
        Self::from_arc(Arc::new(source))
    }

    pub fn from_arc(source: Arc<TriangleMesh>) -> Self {
        Self {
            source,
            levels: HashMap::new(),
        }
    }

    pub fn source(&self) -> &Arc<TriangleMesh> {
        &self.source
    }

    /// Simplified level for `grid_size`, computed on first request.
    pub fn level(&mut self, grid_size: u32) -> Result<Arc<TriangleMesh>> {
        if let Some(mesh) = self.levels.get(&grid_size) {
            return Ok(Arc::clone(mesh));
        }

        let simplifier = GridClusteringSimplifier::new(grid_size)?;
        let mesh = Arc::new(simplifier.simplify(&self.source)?.with_normals());
        log::info!(
            "grid size {}: {}",
            grid_size,
            SimplificationReport::from_meshes(&self.source, &mesh)
        );

        self.levels.insert(grid_size, Arc::clone(&mesh));
        Ok(mesh)
    }

    /// Level for `grid_size` if it has already been computed.
    pub fn cached(&self, grid_size: u32) -> Option<Arc<TriangleMesh>> {
        self.levels.get(&grid_size).cloned()
    }

    /// Number of cached levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Drop every cached level.
    pub fn invalidate(&mut self) {
        self.levels.clear();
    }

    /// Swap in a new source mesh; cached levels belonged to the old one.
    pub fn replace_source(&mut self, source: TriangleMesh) {
        self.source = Arc::new(source);
        self.invalidate();
    }
}

/// Endless cycle through a fixed list of grid sizes.
///
/// The default walks 16, 32, 8 and starts over.
#[derive(Debug, Clone)]
pub struct GridSizeCycle {
    sizes: Vec<u32>,
    next: usize,
}

impl Default for GridSizeCycle {
    fn default() -> Self {
        Self {
            sizes: vec![16, 32, 8],
            next: 0,
        }
    }
}

impl GridSizeCycle {
    pub fn new(sizes: Vec<u32>) -> Result<Self> {
        if sizes.is_empty() {
            return Err(Error::InvalidConfiguration(
                "grid size cycle needs at least one size".to_string(),
            ));
        }
        for &g in &sizes {
            GridClusteringSimplifier::new(g)?;
        }
        Ok(Self { sizes, next: 0 })
    }

    /// Size the next call to [`Iterator::next`] will return.
    pub fn peek(&self) -> u32 {
        self.sizes[self.next]
    }
}

impl Iterator for GridSizeCycle {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let size = self.sizes[self.next];
        self.next = (self.next + 1) % self.sizes.len();
        Some(size)
    }
}
