//! Shared test utilities for the cmip6-regional workspace.
//!
//! This crate provides:
//! - Small coordinate systems that keep test stores tiny
//! - Writers for DRS-style regional CSV files (15 header lines + table)
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{small_coordinates, RegionalCsv};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Assert that every value in a slice equals the sentinel.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_all_fill;
///
/// assert_all_fill!(store.read_variable("tas").unwrap(), 9999.0);
/// ```
#[macro_export]
macro_rules! assert_all_fill {
    ($values:expr, $fill:expr) => {{
        let fill: f32 = $fill;
        if let Some((i, v)) = $values.iter().enumerate().find(|(_, v)| **v != fill) {
            panic!("cell {} holds {} instead of the fill value {}", i, v, fill);
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_all_fill_passes() {
        assert_all_fill!(vec![9999.0_f32; 4], 9999.0);
    }

    #[test]
    #[should_panic(expected = "cell 2 holds")]
    fn test_assert_all_fill_fails() {
        assert_all_fill!(vec![9999.0_f32, 9999.0, 1.5], 9999.0);
    }
}
