//! Label registries for categorical axes.
//!
//! A registry is an ordered, immutable bijection between string labels and
//! the dense coordinates `0..N`. The registry size is the length of the
//! corresponding array axis.

use chrono::{Datelike, Months, NaiveDate};
use std::collections::HashMap;

use crate::axis::Axis;
use crate::error::{CoordinateError, CoordinateResult};

/// Ordered label → coordinate mapping for one axis.
#[derive(Debug, Clone)]
pub struct Registry {
    axis: Axis,
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry; coordinates follow the order of `labels`.
    pub fn new<I, S>(axis: Axis, labels: I) -> CoordinateResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(labels.len());

        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(CoordinateError::DuplicateLabel {
                    axis,
                    label: label.clone(),
                });
            }
        }

        Ok(Self {
            axis,
            labels,
            index,
        })
    }

    /// Build the monthly time registry for the closed year range.
    ///
    /// Labels are `YYYY-MM`, generated year-major then month-minor, so
    /// consecutive coordinates are consecutive months.
    pub fn monthly(first_year: i32, last_year: i32) -> CoordinateResult<Self> {
        let invalid = || CoordinateError::InvalidTimeRange {
            first_year,
            last_year,
        };

        if first_year > last_year {
            return Err(invalid());
        }

        let mut month = NaiveDate::from_ymd_opt(first_year, 1, 1).ok_or_else(invalid)?;
        let mut labels = Vec::with_capacity(((last_year - first_year + 1) * 12) as usize);

        while month.year() <= last_year {
            labels.push(month.format("%Y-%m").to_string());
            month = month.checked_add_months(Months::new(1)).ok_or_else(invalid)?;
        }

        Self::new(Axis::Time, labels)
    }

    /// Axis this registry describes.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Coordinate of `label`.
    pub fn lookup(&self, label: &str) -> CoordinateResult<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| CoordinateError::unknown_label(self.axis, label))
    }

    /// Label at `coordinate`, if in range.
    pub fn label(&self, coordinate: usize) -> Option<&str> {
        self.labels.get(coordinate).map(String::as_str)
    }

    /// All labels in coordinate order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }
}
