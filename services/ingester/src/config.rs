//! Ingester configuration.

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::path::PathBuf;

use cube_store::StoreConfig;

/// Runtime configuration of one ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct IngesterConfig {
    /// Store directory, replaced at startup
    pub output: PathBuf,

    /// Array layout and codecs
    pub store: StoreConfig,
}

impl IngesterConfig {
    /// Combine the CLI output path with `ZARR_*` environment settings.
    pub fn from_env(output: PathBuf) -> Result<Self> {
        let store = StoreConfig::from_env();
        store
            .validate()
            .map_err(|e| anyhow!("Invalid store configuration: {}", e))?;

        Ok(Self { output, store })
    }

    /// Name printed on success.
    pub fn store_name(&self) -> String {
        self.output.display().to_string()
    }
}
