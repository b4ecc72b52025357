//! Error types for the ingestion crate.

use thiserror::Error;

use cmip_common::CoordinateError;
use cube_store::StoreError;

/// Errors that can occur during ingestion.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Path does not follow the DRS convention: {0}")]
    MalformedPath(String),

    #[error(transparent)]
    UnknownLabel(#[from] CoordinateError),

    #[error("Non-rectangular table in {path}: expected {expected} values, found {found}")]
    NonRectangularInput {
        path: String,
        expected: usize,
        found: usize,
    },

    #[error("No 'date' column in {0}")]
    MissingDateColumn(String),

    #[error("Failed to parse table in {path}: {message}")]
    TableParse { path: String, message: String },

    #[error("Failed to write cube: {0}")]
    Store(#[from] StoreError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestionError>;
