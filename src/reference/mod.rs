//! Read-only reference data loaded once at startup

pub mod loader;

pub use loader::{load_default_reference, load_reference, load_reference_from_reader, DEFAULT_REFERENCE_PATH};

use serde::{Deserialize, Serialize};

/// One period of reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub label: String,
    pub media_spend: Option<f64>,
    pub reach: Option<f64>,
}

/// Reference periods in file order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTable {
    pub rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.label.clone()).collect()
    }

    /// Media spend per period, with blank cells replaced by `default_spend`
    pub fn spend_or(&self, default_spend: f64) -> Vec<f64> {
        self.rows.iter().map(|r| r.media_spend.unwrap_or(default_spend)).collect()
    }

    /// Reach per period, if every row has one
    pub fn reach(&self) -> Option<Vec<f64>> {
        self.rows.iter().map(|r| r.reach).collect()
    }
}
