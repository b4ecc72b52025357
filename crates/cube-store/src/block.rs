//! Two-dimensional slices written into a single cube hyperplane.

use std::collections::HashSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Fixed (model, experiment, realm) coordinates of a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hyperplane {
    pub model: u64,
    pub experiment: u64,
    pub realm: u64,
}

impl Hyperplane {
    pub fn new(model: u64, experiment: u64, realm: u64) -> Self {
        Self {
            model,
            experiment,
            realm,
        }
    }
}

/// Values addressed by a list of time and region coordinates.
///
/// `values` is row-major over `(times, regions)`: the value for
/// `times[i]`, `regions[j]` sits at `i * regions.len() + j`. The coordinate
/// lists need not be sorted or contiguous.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceBlock {
    times: Vec<u64>,
    regions: Vec<u64>,
    values: Vec<f32>,
}

impl SliceBlock {
    pub fn new(times: Vec<u64>, regions: Vec<u64>, values: Vec<f32>) -> Result<Self> {
        let expected = times.len() * regions.len();
        if values.len() != expected {
            return Err(StoreError::ShapeMismatch {
                expected,
                found: values.len(),
            });
        }

        check_distinct("time", &times)?;
        check_distinct("region", &regions)?;

        Ok(Self {
            times,
            regions,
            values,
        })
    }

    pub fn times(&self) -> &[u64] {
        &self.times
    }

    pub fn regions(&self) -> &[u64] {
        &self.regions
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of cells addressed by the block.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest `(time, region)` ranges enclosing every addressed cell.
    pub fn bounds(&self) -> Option<(Range<u64>, Range<u64>)> {
        let time = span(&self.times)?;
        let region = span(&self.regions)?;
        Some((time, region))
    }

    /// Whether the block fills its bounding ranges completely.
    pub fn is_dense(&self) -> bool {
        match self.bounds() {
            Some((time, region)) => {
                (time.end - time.start) as usize == self.times.len()
                    && (region.end - region.start) as usize == self.regions.len()
            }
            None => false,
        }
    }

    /// Copy the block into a buffer laid out like the array subset
    /// `[region_origin.., time_origin..]` with `time_len` cells per region row.
    pub fn scatter_into(
        &self,
        buffer: &mut [f32],
        region_origin: u64,
        time_origin: u64,
        time_len: u64,
    ) {
        let nregions = self.regions.len();
        for (i, &t) in self.times.iter().enumerate() {
            for (j, &r) in self.regions.iter().enumerate() {
                let offset = (r - region_origin) * time_len + (t - time_origin);
                buffer[offset as usize] = self.values[i * nregions + j];
            }
        }
    }
}

fn span(coords: &[u64]) -> Option<Range<u64>> {
    let min = *coords.iter().min()?;
    let max = *coords.iter().max()?;
    Some(min..max + 1)
}

fn check_distinct(dimension: &'static str, coords: &[u64]) -> Result<()> {
    let mut seen = HashSet::with_capacity(coords.len());
    for &c in coords {
        if !seen.insert(c) {
            return Err(StoreError::DuplicateCoordinate {
                dimension,
                coordinate: c,
            });
        }
    }
    Ok(())
}
