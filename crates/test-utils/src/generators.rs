//! Writers for synthetic regional time-series files.
//!
//! Files follow the DRS-style layout consumed by the ingester:
//!
//! ```text
//! <root>/<project>_<variable>_<realm>/<project>_<model>_<experiment>_<ensemble>.csv
//! ```
//!
//! with 15 free-text header lines followed by a table holding a `date`
//! column and one column per region.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Number of header lines preceding the table.
pub const HEADER_LINES: usize = 15;

/// Builder for one regional CSV file.
#[derive(Debug, Clone)]
pub struct RegionalCsv {
    pub project: String,
    pub variable: String,
    pub realm: String,
    pub model: String,
    pub experiment: String,
    pub ensemble: String,
    regions: Vec<String>,
    rows: Vec<(String, Vec<String>)>,
    date_position: usize,
}

impl RegionalCsv {
    pub fn new(variable: &str, realm: &str, model: &str, experiment: &str) -> Self {
        Self {
            project: "CMIP6".to_string(),
            variable: variable.to_string(),
            realm: realm.to_string(),
            model: model.to_string(),
            experiment: experiment.to_string(),
            ensemble: "r1i1p1f1".to_string(),
            regions: Vec::new(),
            rows: Vec::new(),
            date_position: 0,
        }
    }

    pub fn ensemble(mut self, ensemble: &str) -> Self {
        self.ensemble = ensemble.to_string();
        self
    }

    /// Region columns, in file order.
    pub fn regions(mut self, regions: &[&str]) -> Self {
        self.regions = regions.iter().map(|r| r.to_string()).collect();
        self
    }

    /// Place the `date` column at `position` among the columns.
    pub fn date_column_at(mut self, position: usize) -> Self {
        self.date_position = position;
        self
    }

    /// Append a row with one value per region.
    pub fn row(mut self, date: &str, values: &[f32]) -> Self {
        let fields = values.iter().map(|v| v.to_string()).collect();
        self.rows.push((date.to_string(), fields));
        self
    }

    /// Append a row with arbitrary cell text (may be short or non-numeric).
    pub fn raw_row(mut self, date: &str, fields: &[&str]) -> Self {
        let fields = fields.iter().map(|f| f.to_string()).collect();
        self.rows.push((date.to_string(), fields));
        self
    }

    /// Path of the file relative to the dataset root.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}_{}_{}",
            self.project, self.variable, self.realm
        ))
        .join(format!(
            "{}_{}_{}_{}.csv",
            self.project, self.model, self.experiment, self.ensemble
        ))
    }

    /// The free-text header block.
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "#title: Regionally aggregated monthly means".to_string(),
            format!("#project: {}", self.project),
            format!("#variable: {}", self.variable),
            format!("#realm: {}", self.realm),
            format!("#model: {}", self.model),
            format!("#experiment: {}", self.experiment),
            format!("#ensemble: {}", self.ensemble),
            "#frequency: mon".to_string(),
            "#region_set: IPCC AR6 reference regions".to_string(),
            "#aggregation: area-weighted spatial mean".to_string(),
            "#missing_value: NaN".to_string(),
            "#source: synthetic test fixture".to_string(),
            "#note: time: calendar month".to_string(),
            "#contact: nobody@example.org".to_string(),
        ];
        lines.push("#".to_string());
        debug_assert_eq!(lines.len(), HEADER_LINES);
        lines
    }

    /// Full file contents.
    pub fn render(&self) -> String {
        let mut out = self.header_lines().join("\n");
        out.push('\n');

        let mut columns = self.regions.clone();
        let date_position = self.date_position.min(columns.len());
        columns.insert(date_position, "date".to_string());
        out.push_str(&columns.join(","));
        out.push('\n');

        for (date, fields) in &self.rows {
            let mut cells = fields.clone();
            let position = date_position.min(cells.len());
            cells.insert(position, date.clone());
            out.push_str(&cells.join(","));
            out.push('\n');
        }

        out
    }

    /// Write the file below `root`, creating the DRS directory.
    pub fn write_to(&self, root: &Path) -> io::Result<PathBuf> {
        let path = root.join(self.relative_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, self.render())?;
        Ok(path)
    }
}

/// Predictable value for `(time_index, region_index)`: `time * 100 + region`.
pub fn pattern_value(time_index: usize, region_index: usize) -> f32 {
    (time_index * 100 + region_index) as f32
}
