//! Line-chart series handed to an external charting tool

use super::table::{ordered_rows, TableOrder};
use crate::error::Result;
use crate::projection::ProjectionTable;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One x/y point of a line chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// A named line series, optionally with a vertical marker at one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub y_axis: String,
    pub points: Vec<ChartPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl ChartSeries {
    pub fn new(title: impl Into<String>, y_axis: impl Into<String>, points: Vec<ChartPoint>) -> Self {
        Self {
            title: title.into(),
            y_axis: y_axis.into(),
            points,
            marker: None,
        }
    }

    /// Cumulative total by period, in time order
    pub fn cumulative_impact(table: &ProjectionTable) -> Self {
        let points = ordered_rows(table, TableOrder::Chronological)
            .into_iter()
            .map(|row| ChartPoint {
                label: row.label.clone(),
                value: row.cumulative_total,
            })
            .collect();

        Self::new("Cumulative Impact of Media Over Time", "Cumulative Total", points)
    }

    /// Write the points as a two-column CSV (`label,value`)
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for point in &self.points {
            csv_writer.serialize(point)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
