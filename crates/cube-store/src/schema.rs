//! Array geometry of the regional cube.
//!
//! Every data array has shape `(model, experiment, region, realm, time)` and
//! is chunked `(1, 1, |region|, 1, time_chunk)`: one file contributes a single
//! model/experiment/realm hyperplane with all regions, so its write touches
//! as few chunks as possible.

use serde::{Deserialize, Serialize};

use cmip_common::{Axis, CoordinateSystem};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

/// Number of dimensions of every data array.
pub const NDIM: usize = 5;

/// Shape and chunking of the cube's data arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeSchema {
    /// Array shape in dimension order.
    pub shape: [u64; NDIM],
    /// Chunk shape in dimension order.
    pub chunk_shape: [u64; NDIM],
    /// Fill value of every data array.
    pub fill_value: f32,
    /// Names of the data arrays.
    pub variables: Vec<String>,
}

impl CubeSchema {
    /// Derive the schema from the registries and store settings.
    pub fn new(coords: &CoordinateSystem, config: &StoreConfig) -> Result<Self> {
        config.validate().map_err(StoreError::Config)?;

        let shape = coords.shape();
        if let Some(axis) = Axis::ALL.into_iter().find(|a| shape[a.dimension_index()] == 0) {
            return Err(StoreError::Config(format!("{axis} axis has no labels")));
        }

        Ok(Self {
            shape,
            chunk_shape: [1, 1, shape[Axis::Region.dimension_index()], 1, config.time_chunk],
            fill_value: config.fill_value,
            variables: config.variables.clone(),
        })
    }

    /// Dimension names in array order.
    pub fn dimension_names() -> [&'static str; NDIM] {
        Axis::ALL.map(|axis| axis.as_str())
    }

    /// Extent of one dimension.
    pub fn extent(&self, axis: Axis) -> u64 {
        self.shape[axis.dimension_index()]
    }

    /// Total number of cells in one data array.
    pub fn num_elements(&self) -> u64 {
        self.shape.iter().product()
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v == name)
    }

    /// Chunk-aligned blocks covering the full extent, clipped at the edges.
    ///
    /// Each item is `(start, shape)`.
    pub fn chunk_blocks(&self) -> ChunkBlocks {
        ChunkBlocks::new(self.shape, self.chunk_shape)
    }

    /// Number of chunks along each dimension.
    pub fn chunk_grid_shape(&self) -> [u64; NDIM] {
        grid_shape(&self.shape, &self.chunk_shape)
    }
}

fn grid_shape(shape: &[u64; NDIM], chunk_shape: &[u64; NDIM]) -> [u64; NDIM] {
    let mut grid = [0; NDIM];
    for d in 0..NDIM {
        grid[d] = shape[d].div_ceil(chunk_shape[d]);
    }
    grid
}

/// Iterator over the chunk-aligned blocks of an array extent.
#[derive(Debug, Clone)]
pub struct ChunkBlocks {
    shape: [u64; NDIM],
    chunk_shape: [u64; NDIM],
    grid: [u64; NDIM],
    next: u64,
    total: u64,
}

impl ChunkBlocks {
    fn new(shape: [u64; NDIM], chunk_shape: [u64; NDIM]) -> Self {
        let grid = grid_shape(&shape, &chunk_shape);
        Self {
            shape,
            chunk_shape,
            grid,
            next: 0,
            total: grid.iter().product(),
        }
    }
}

impl Iterator for ChunkBlocks {
    type Item = ([u64; NDIM], [u64; NDIM]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }

        // Decompose the linear chunk index, last dimension fastest
        let mut rem = self.next;
        let mut start = [0; NDIM];
        let mut extent = [0; NDIM];
        for d in (0..NDIM).rev() {
            let chunk_index = rem % self.grid[d];
            rem /= self.grid[d];
            start[d] = chunk_index * self.chunk_shape[d];
            extent[d] = self.chunk_shape[d].min(self.shape[d] - start[d]);
        }

        self.next += 1;
        Some((start, extent))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.total - self.next) as usize;
        (left, Some(left))
    }
}
