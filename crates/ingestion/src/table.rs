//! Reading the regional table and reshaping it to long form.
//!
//! The table starts after the header block. It has a `date` column (at any
//! position) and one column per region:
//!
//! ```text
//! date,world,SAH,...
//! 2015-01,12.3,30.1,...
//! ```
//!
//! Melting turns every `(row, region column)` cell into one
//! [`Observation`].

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::drs::HEADER_LINES;
use crate::error::{IngestionError, Result};

/// Name of the time column.
pub const DATE_COLUMN: &str = "date";

/// One `(time, region, value)` triple of a melted table.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub time: String,
    pub region: String,
    pub value: f32,
}

/// Read the table of the file at `path`, skipping the header block.
pub fn read_table(path: impl AsRef<Path>) -> Result<Vec<Observation>> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);

    let mut skipped = String::new();
    for _ in 0..HEADER_LINES {
        skipped.clear();
        if reader.read_line(&mut skipped)? == 0 {
            break;
        }
    }

    read_table_from(reader, &path.display().to_string())
}

/// Read and melt a table whose first line is the column header.
pub fn read_table_from<R: Read>(input: R, source: &str) -> Result<Vec<Observation>> {
    let parse_error = |message: String| IngestionError::TableParse {
        path: source.to_string(),
        message,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let columns = reader
        .headers()
        .map_err(|e| parse_error(e.to_string()))?
        .clone();

    let date_index = columns
        .iter()
        .position(|c| c == DATE_COLUMN)
        .ok_or_else(|| IngestionError::MissingDateColumn(source.to_string()))?;

    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record.map_err(|e| parse_error(e.to_string()))?);
    }

    melt(&columns, date_index, &records).map_err(parse_error)
}

/// Reshape wide records to long form, one region column at a time.
///
/// Cells missing from short rows produce no observation. Empty cells read
/// as NaN.
fn melt(
    columns: &StringRecord,
    date_index: usize,
    records: &[StringRecord],
) -> std::result::Result<Vec<Observation>, String> {
    let mut observations = Vec::with_capacity(records.len() * columns.len().saturating_sub(1));

    for (col, region) in columns.iter().enumerate() {
        if col == date_index {
            continue;
        }

        for (row, record) in records.iter().enumerate() {
            let (Some(time), Some(cell)) = (record.get(date_index), record.get(col)) else {
                continue;
            };

            let value = parse_value(cell).ok_or_else(|| {
                format!(
                    "row {} column '{}': '{}' is not a number",
                    row + 1,
                    region,
                    cell
                )
            })?;

            observations.push(Observation {
                time: time.to_string(),
                region: region.to_string(),
                value,
            });
        }
    }

    Ok(observations)
}

fn parse_value(cell: &str) -> Option<f32> {
    if cell.is_empty() {
        return Some(f32::NAN);
    }
    cell.parse().ok()
}
