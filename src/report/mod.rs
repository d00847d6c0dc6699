//! Presentation boundary: display tables, chart series, JSON reports

pub mod chart;
pub mod table;

pub use chart::{ChartPoint, ChartSeries};
pub use table::{format_thousands, ordered_rows, Column, DisplayTable, TableOrder};

use crate::params::Parameters;
use crate::projection::{Alignment, PeriodRow, ProjectionSummary, ProjectionTable};
use serde::Serialize;

/// Everything one projection pass produces, for machine-readable output
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport<'a> {
    pub variant: &'a str,
    pub parameters: &'a Parameters,
    pub alignment: Alignment,
    pub summary: ProjectionSummary,
    pub rows: &'a [PeriodRow],
    pub chart: ChartSeries,
}

impl<'a> ProjectionReport<'a> {
    pub fn new(variant: &'a str, parameters: &'a Parameters, table: &'a ProjectionTable) -> Self {
        Self {
            variant,
            parameters,
            alignment: table.alignment,
            summary: table.summary(),
            rows: &table.rows,
            chart: ChartSeries::cumulative_impact(table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionEngine;

    #[test]
    fn test_report_json_shape() {
        let params = Parameters::default();
        let labels = vec!["2024".to_string(), "2025-26".to_string()];
        let table = ProjectionEngine::default().project(&labels, &[1.0], &params).unwrap();

        let report = ProjectionReport::new("compounding", &params, &table);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["variant"], "compounding");
        assert_eq!(value["alignment"]["kind"], "padded");
        assert_eq!(value["rows"].as_array().unwrap().len(), 2);
        assert_eq!(value["chart"]["points"][0]["label"], "2024");
        assert_eq!(value["summary"]["periods"], 2);
    }
}
