//! Error types for coordinate resolution.

use thiserror::Error;

use crate::axis::Axis;

/// Result type alias using CoordinateError.
pub type CoordinateResult<T> = Result<T, CoordinateError>;

/// Errors raised while building or querying coordinate registries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("Unknown {axis} label: '{label}'")]
    UnknownLabel { axis: Axis, label: String },

    #[error("Duplicate {axis} label: '{label}'")]
    DuplicateLabel { axis: Axis, label: String },

    #[error("Invalid time range: {first_year}..={last_year}")]
    InvalidTimeRange { first_year: i32, last_year: i32 },
}

impl CoordinateError {
    pub fn unknown_label(axis: Axis, label: impl Into<String>) -> Self {
        Self::UnknownLabel {
            axis,
            label: label.into(),
        }
    }
}
