//! Main Ingester struct for regional time-series ingestion.

use std::io::BufRead;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use cmip_common::Axis;
use cube_store::{Hyperplane, RegionalStore, StoreError};

use crate::drs::FileDescriptor;
use crate::error::Result;
use crate::scatter::build_block;
use crate::table::{read_table, Observation};

/// Result of ingesting one file.
#[derive(Debug, Clone, Serialize)]
pub struct IngestionResult {
    /// Path of the ingested file
    pub path: String,
    pub variable: String,
    pub model: String,
    pub experiment: String,
    pub realm: String,
    /// Number of distinct months in the table
    pub times: usize,
    /// Number of region columns in the table
    pub regions: usize,
    /// Cells written to the cube
    pub cells_written: u64,
}

/// Totals over a list of ingested files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestionSummary {
    pub files: usize,
    pub cells_written: u64,
    pub duration_ms: u64,
}

/// Writes regional CSV files into a [`RegionalStore`].
///
/// Files are processed one at a time, in the order given. A cell written
/// by a later file replaces whatever an earlier file put there.
pub struct Ingester {
    store: RegionalStore,
}

impl Ingester {
    /// Create a new Ingester writing into `store`.
    pub fn new(store: RegionalStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RegionalStore {
        &self.store
    }

    pub fn into_store(self) -> RegionalStore {
        self.store
    }

    /// Ingest a single file from the filesystem.
    ///
    /// The path is validated before the file is opened, so a malformed path
    /// never touches the store.
    pub fn ingest_file(&self, path: &str) -> Result<IngestionResult> {
        let descriptor = FileDescriptor::from_path(path)?;
        debug!(path = %path, header = ?descriptor.header, "Parsed header");

        let rows = read_table(path)?;

        self.ingest(&descriptor, &rows)
    }

    /// Write already-melted `rows` for the file described by `descriptor`.
    pub fn ingest(&self, descriptor: &FileDescriptor, rows: &[Observation]) -> Result<IngestionResult> {
        let drs = &descriptor.drs;
        let coords = self.store.coordinates();

        let model = coords.lookup(Axis::Model, &drs.model)?;
        let experiment = coords.lookup(Axis::Experiment, &drs.experiment)?;
        let realm = coords.lookup(Axis::Realm, &drs.realm)?;

        if !self.store.has_variable(&drs.variable) {
            return Err(StoreError::UnknownVariable(drs.variable.clone()).into());
        }

        let block = build_block(coords, rows, &descriptor.path)?;
        let hyperplane = Hyperplane::new(model as u64, experiment as u64, realm as u64);
        let cells_written = self.store.write_block(&drs.variable, hyperplane, &block)?;

        info!(
            path = %descriptor.path,
            variable = %drs.variable,
            model = %drs.model,
            experiment = %drs.experiment,
            realm = %drs.realm,
            ensemble = %drs.ensemble,
            times = block.times().len(),
            regions = block.regions().len(),
            cells = cells_written,
            "Ingested file"
        );

        Ok(IngestionResult {
            path: descriptor.path.clone(),
            variable: drs.variable.clone(),
            model: drs.model.clone(),
            experiment: drs.experiment.clone(),
            realm: drs.realm.clone(),
            times: block.times().len(),
            regions: block.regions().len(),
            cells_written,
        })
    }

    /// Ingest every path listed in `reader`, one per line.
    ///
    /// Blank lines are skipped. The first failing file aborts the run;
    /// files before it stay written.
    pub fn ingest_list<R: BufRead>(&self, reader: R) -> Result<IngestionSummary> {
        let start = Instant::now();
        let mut summary = IngestionSummary::default();

        for line in reader.lines() {
            let line = line?;
            let path = line.trim();
            if path.is_empty() {
                continue;
            }

            let result = self.ingest_file(path)?;
            summary.files += 1;
            summary.cells_written += result.cells_written;
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            files = summary.files,
            cells = summary.cells_written,
            duration_ms = summary.duration_ms,
            "Ingestion complete"
        );

        Ok(summary)
    }
}
