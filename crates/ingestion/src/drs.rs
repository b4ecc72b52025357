//! Metadata extraction from DRS-style paths and file headers.
//!
//! Input files are laid out as
//!
//! ```text
//! .../<project>_<variable>_<realm>/<project>_<model>_<experiment>_<ensemble>.csv
//! ```
//!
//! and start with a block of `#key: value` header lines.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{IngestionError, Result};

/// Number of free-text header lines before the table.
pub const HEADER_LINES: usize = 15;

static DRS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^.*/[^_]+_(?P<variable>[^_]+)_(?P<realm>[^_]+)/(?P<project>[^_]+)_(?P<model>[^_]+)_(?P<experiment>[^_]+)_(?P<ensemble>[^_]+)\.csv$",
    )
    .expect("DRS pattern is valid")
});

/// Categorical fields encoded in a file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrsFields {
    pub variable: String,
    pub realm: String,
    pub project: String,
    pub model: String,
    pub experiment: String,
    pub ensemble: String,
}

/// Everything known about one input file before its table is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub path: String,
    pub drs: DrsFields,
    /// Free-text header fields. Informational only.
    pub header: BTreeMap<String, String>,
}

impl FileDescriptor {
    /// Parse the path and read the header of `path`.
    pub fn from_path(path: &str) -> Result<Self> {
        let drs = parse_path(path)?;
        let header = parse_header(path)?;
        Ok(Self {
            path: path.to_string(),
            drs,
            header,
        })
    }
}

/// Extract the DRS fields from `path`.
///
/// The whole path must match; partial matches are rejected.
pub fn parse_path(path: &str) -> Result<DrsFields> {
    let caps = DRS_PATTERN
        .captures(path)
        .ok_or_else(|| IngestionError::MalformedPath(path.to_string()))?;

    let field = |name: &str| caps[name].to_string();

    Ok(DrsFields {
        variable: field("variable"),
        realm: field("realm"),
        project: field("project"),
        model: field("model"),
        experiment: field("experiment"),
        ensemble: field("ensemble"),
    })
}

/// Read the header block of the file at `path`.
pub fn parse_header(path: impl AsRef<Path>) -> Result<BTreeMap<String, String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::with_capacity(HEADER_LINES);
    for line in reader.lines().take(HEADER_LINES) {
        lines.push(line?);
    }
    Ok(parse_header_lines(lines.iter().map(String::as_str)))
}

/// Split header lines into key/value pairs.
///
/// The key is the text before the first `": "` with one leading `#`
/// removed; the value is the remainder. Lines without the separator yield
/// an empty value. Later duplicates replace earlier ones.
pub fn parse_header_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, String> {
    lines
        .into_iter()
        .map(|line| {
            let line = line.trim_end_matches('\r');
            let (key, value) = line.split_once(": ").unwrap_or((line, ""));
            let key = key.strip_prefix('#').unwrap_or(key);
            (key.to_string(), value.to_string())
        })
        .collect()
}
