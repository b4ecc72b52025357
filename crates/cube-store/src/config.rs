//! Configuration for the cube store.

use serde::{Deserialize, Serialize};

use cmip_common::cmip6;

/// Storage settings for a regional cube.
///
/// Only the on-disk encoding is configurable. Axes, the fill value and the
/// tracked variables are fixed by the coordinate system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Compression codec for data chunks.
    pub compression: ZarrCompression,

    /// Compression level (1-9).
    pub compression_level: u8,

    /// Byte shuffle before compression.
    pub shuffle: bool,

    /// Append a crc32c checksum to every chunk.
    pub checksum: bool,

    /// Months per chunk along the time axis.
    pub time_chunk: u64,

    /// Byte width of the fixed-width coordinate labels.
    pub label_width: usize,

    /// Value stored in cells without an observation.
    pub fill_value: f32,

    /// Variables that get a data array.
    pub variables: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            compression: ZarrCompression::BloscZstd,
            compression_level: 5,
            shuffle: true,
            checksum: true,
            time_chunk: 12 * 50,
            label_width: 50,
            fill_value: cmip6::FILL_VALUE,
            variables: cmip6::VARIABLES.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl StoreConfig {
    /// Settings from `ZARR_COMPRESSION`, `ZARR_COMPRESSION_LEVEL`,
    /// `ZARR_SHUFFLE` and `ZARR_CHECKSUM`, defaults for anything unset or
    /// unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            compression: env_var("ZARR_COMPRESSION")
                .map(|v| ZarrCompression::from_str(&v))
                .unwrap_or(defaults.compression),
            compression_level: env_var("ZARR_COMPRESSION_LEVEL")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.compression_level),
            shuffle: env_flag("ZARR_SHUFFLE").unwrap_or(defaults.shuffle),
            checksum: env_flag("ZARR_CHECKSUM").unwrap_or(defaults.checksum),
            ..defaults
        }
    }

    /// Reject settings the store cannot be built with.
    pub fn validate(&self) -> Result<(), String> {
        if self.time_chunk == 0 {
            return Err("time chunk length must be positive".to_string());
        }
        if self.label_width == 0 {
            return Err("label width must be positive".to_string());
        }

        if self.compression != ZarrCompression::None
            && (self.compression_level == 0 || self.compression_level > 9)
        {
            return Err(format!(
                "compression level {} outside 1-9",
                self.compression_level
            ));
        }
        if self.variables.is_empty() {
            return Err("no variables configured".to_string());
        }

        Ok(())
    }
}

/// Compression codec for Zarr chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZarrCompression {
    /// No compression.
    None,
    /// Blosc with LZ4.
    BloscLz4,
    /// Blosc with Zstd.
    #[default]
    BloscZstd,
}

impl ZarrCompression {
    /// Case-insensitive; unrecognised names select Zstd.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "none" => Self::None,
            "lz4" | "blosc_lz4" => Self::BloscLz4,
            _ => Self::BloscZstd,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::BloscLz4 => "blosc_lz4",
            Self::BloscZstd => "blosc_zstd",
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn env_flag(name: &str) -> Option<bool> {
    env_var(name).map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
}

impl std::fmt::Display for ZarrCompression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
