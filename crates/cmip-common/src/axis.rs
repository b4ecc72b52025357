//! Cube axes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One categorical axis of the regional cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Model,
    Experiment,
    Region,
    Realm,
    Time,
}

impl Axis {
    /// All axes in array dimension order.
    pub const ALL: [Axis; 5] = [
        Axis::Model,
        Axis::Experiment,
        Axis::Region,
        Axis::Realm,
        Axis::Time,
    ];

    /// Dimension name used in the array store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Model => "model",
            Axis::Experiment => "experiment",
            Axis::Region => "region",
            Axis::Realm => "realm",
            Axis::Time => "time",
        }
    }

    /// Position of this axis in the 5-D data arrays.
    pub fn dimension_index(&self) -> usize {
        match self {
            Axis::Model => 0,
            Axis::Experiment => 1,
            Axis::Region => 2,
            Axis::Realm => 3,
            Axis::Time => 4,
        }
    }

    /// Parse a dimension name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.as_str() == name)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
