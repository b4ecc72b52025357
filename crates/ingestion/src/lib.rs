//! Regional time-series ingestion library.
//!
//! Turns DRS-named CSV files of monthly regional means into writes against
//! a [`cube_store::RegionalStore`]:
//!
//! - path and header parsing ([`drs`])
//! - table reading and reshaping to long form ([`table`])
//! - label resolution and slice layout ([`scatter`])
//! - the per-file and per-list driver ([`Ingester`])

pub mod drs;
pub mod error;
mod ingester;
pub mod scatter;
pub mod table;

// Re-exports
pub use drs::{parse_header, parse_header_lines, parse_path, DrsFields, FileDescriptor, HEADER_LINES};
pub use error::{IngestionError, Result};
pub use ingester::{IngestionResult, IngestionSummary, Ingester};
pub use scatter::build_block;
pub use table::{read_table, read_table_from, Observation, DATE_COLUMN};
