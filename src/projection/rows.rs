//! Output structures for projections

use serde::{Deserialize, Serialize};

/// A single row of projection output for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRow {
    pub label: String,

    // Spend
    pub media_spend: f64,
    pub spend_difference: f64,

    // Growth chain
    pub upweight: f64,
    pub effectiveness_gain: f64,
    pub natural_growth: f64,
    pub improvement: f64,

    // Channel split
    pub brand_spend: f64,
    pub performance_spend: f64,
    pub brand_effect: f64,
    pub performance_effect: f64,

    // Impact components
    pub base: f64,
    pub media: f64,
    pub long_term_media_impact: f64,

    // Summary
    pub total: f64,
    pub cumulative_total: f64,
}

impl PeriodRow {
    /// Create a new row with zeroed metrics
    pub fn new(label: impl Into<String>, media_spend: f64) -> Self {
        Self {
            label: label.into(),
            media_spend,
            spend_difference: 0.0,
            upweight: 0.0,
            effectiveness_gain: 0.0,
            natural_growth: 0.0,
            improvement: 0.0,
            brand_spend: 0.0,
            performance_spend: 0.0,
            brand_effect: 0.0,
            performance_effect: 0.0,
            base: 0.0,
            media: 0.0,
            long_term_media_impact: 0.0,
            total: 0.0,
            cumulative_total: 0.0,
        }
    }
}

/// How the spend list was reconciled with the period list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum Alignment {
    Exact,
    /// Spend was shorter; this many rows used the default spend
    Padded(usize),
    /// Spend was longer; this many trailing values were dropped
    Truncated(usize),
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionTable {
    /// Rows in input period order
    pub rows: Vec<PeriodRow>,

    pub alignment: Alignment,
}

impl ProjectionTable {
    pub fn new(alignment: Alignment) -> Self {
        Self {
            rows: Vec::new(),
            alignment,
        }
    }

    /// Add a period row
    pub fn add_row(&mut self, row: PeriodRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_spend: f64 = self.rows.iter().map(|r| r.media_spend).sum();
        let total_impact: f64 = self.rows.iter().map(|r| r.total).sum();
        let total_improvement: f64 = self.rows.iter().map(|r| r.improvement).sum();

        let final_cumulative_total = self.rows.last().map(|r| r.cumulative_total).unwrap_or(0.0);
        let final_upweight = self.rows.last().map(|r| r.upweight).unwrap_or(0.0);

        ProjectionSummary {
            periods: self.rows.len(),
            total_spend,
            total_impact,
            total_improvement,
            final_upweight,
            final_cumulative_total,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub periods: usize,
    pub total_spend: f64,
    pub total_impact: f64,
    pub total_improvement: f64,
    pub final_upweight: f64,
    pub final_cumulative_total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_empty_table() {
        let table = ProjectionTable::new(Alignment::Exact);
        let summary = table.summary();
        assert_eq!(summary.periods, 0);
        assert_eq!(summary.final_cumulative_total, 0.0);
    }

    #[test]
    fn test_summary_totals() {
        let mut table = ProjectionTable::new(Alignment::Exact);
        for (i, label) in ["2024", "2025-26"].iter().enumerate() {
            let mut row = PeriodRow::new(*label, 100.0);
            row.total = 10.0 * (i + 1) as f64;
            row.cumulative_total = 5.0 + row.total;
            table.add_row(row);
        }

        let summary = table.summary();
        assert_eq!(summary.periods, 2);
        assert_eq!(summary.total_spend, 200.0);
        assert_eq!(summary.total_impact, 30.0);
        assert_eq!(summary.final_cumulative_total, 25.0);
    }

    #[test]
    fn test_alignment_serializes_with_row_count() {
        let json = serde_json::to_string(&Alignment::Padded(2)).unwrap();
        assert_eq!(json, r#"{"kind":"padded","rows":2}"#);
    }
}
