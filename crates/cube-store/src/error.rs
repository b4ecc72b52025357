//! Error types for the cube store.

use thiserror::Error;

use cmip_common::CoordinateError;

/// Errors that can occur while creating, writing or reading a cube.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Zarr format error.
    #[error("Zarr format error: {0}")]
    Zarr(String),

    /// Storage/IO error.
    #[error("storage error: {0}")]
    Storage(String),

    /// No data array exists for the variable.
    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    /// Block values do not match the block coordinates.
    #[error("block shape mismatch: expected {expected} values, got {found}")]
    ShapeMismatch { expected: usize, found: usize },

    /// A coordinate lies outside the array extent.
    #[error("coordinate {coordinate} is outside the {dimension} extent {extent}")]
    OutOfBounds {
        dimension: &'static str,
        coordinate: u64,
        extent: u64,
    },

    /// A block addresses the same coordinate twice.
    #[error("duplicate {dimension} coordinate {coordinate} in block")]
    DuplicateCoordinate {
        dimension: &'static str,
        coordinate: u64,
    },

    /// A label does not fit the fixed label width.
    #[error("label '{label}' exceeds {width} bytes")]
    LabelTooLong { label: String, width: usize },

    /// Invalid metadata in the store.
    #[error("invalid store metadata: {0}")]
    InvalidMetadata(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Coordinate registry error.
    #[error(transparent)]
    Coordinates(#[from] CoordinateError),
}

impl StoreError {
    /// Create a Zarr error.
    pub fn zarr(msg: impl ToString) -> Self {
        Self::Zarr(msg.to_string())
    }

    /// Create a storage error.
    pub fn storage(msg: impl ToString) -> Self {
        Self::Storage(msg.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidMetadata(err.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
