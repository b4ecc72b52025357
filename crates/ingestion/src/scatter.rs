//! Placement of melted observations into a cube slice.

use std::collections::HashMap;

use cmip_common::{Axis, CoordinateSystem};
use cube_store::SliceBlock;

use crate::error::{IngestionError, Result};
use crate::table::Observation;

/// Resolve every observation to `(time, region)` coordinates and lay them
/// out as a [`SliceBlock`].
///
/// Each distinct time and region found in `rows` addresses one row or
/// column of the block, in order of first appearance. The observations
/// must fill that grid exactly once per cell; gaps or repeats mean the
/// table was not rectangular.
pub fn build_block(coords: &CoordinateSystem, rows: &[Observation], source: &str) -> Result<SliceBlock> {
    let mut times = Axes::default();
    let mut regions = Axes::default();
    let mut placed = Vec::with_capacity(rows.len());

    for row in rows {
        let t = coords.lookup(Axis::Time, &row.time)?;
        let r = coords.lookup(Axis::Region, &row.region)?;
        placed.push((times.slot(t), regions.slot(r), row.value));
    }

    let expected = times.len() * regions.len();
    let non_rectangular = || IngestionError::NonRectangularInput {
        path: source.to_string(),
        expected,
        found: rows.len(),
    };

    if rows.len() != expected {
        return Err(non_rectangular());
    }

    let nregions = regions.len();
    let mut values = vec![0.0f32; expected];
    let mut filled = vec![false; expected];
    for (i, j, value) in placed {
        let offset = i * nregions + j;
        if filled[offset] {
            return Err(non_rectangular());
        }
        filled[offset] = true;
        values[offset] = value;
    }

    Ok(SliceBlock::new(times.into_coords(), regions.into_coords(), values)?)
}

/// Distinct coordinates in first-appearance order.
#[derive(Default)]
struct Axes {
    coords: Vec<u64>,
    slots: HashMap<usize, usize>,
}

impl Axes {
    fn slot(&mut self, coordinate: usize) -> usize {
        *self.slots.entry(coordinate).or_insert_with(|| {
            self.coords.push(coordinate as u64);
            self.coords.len() - 1
        })
    }

    fn len(&self) -> usize {
        self.coords.len()
    }

    fn into_coords(self) -> Vec<u64> {
        self.coords
    }
}
