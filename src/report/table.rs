//! Projection table formatting for display

use crate::projection::{PeriodRow, ProjectionTable, ProjectionVariant};
use serde::Serialize;

/// Row order for the displayed table
///
/// Periods arrive in time order and labels are free text, so ordering never
/// looks at the label itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOrder {
    /// Same order the periods were supplied in
    Chronological,
    /// Supplied order reversed (latest period first)
    LatestFirst,
}

impl TableOrder {
    /// Order a variant's table is shown in when the caller asks for none
    pub fn default_for(variant: &ProjectionVariant) -> Self {
        match variant {
            ProjectionVariant::Compounding { .. } => TableOrder::LatestFirst,
            ProjectionVariant::SpendScaled | ProjectionVariant::Classic { .. } => TableOrder::Chronological,
        }
    }

    /// An explicit order wins over the variant default
    pub fn resolve(requested: Option<TableOrder>, variant: &ProjectionVariant) -> Self {
        requested.unwrap_or_else(|| Self::default_for(variant))
    }
}

/// A displayable column of the projection table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Column {
    Period,
    MediaSpend,
    SpendDifference,
    Upweight,
    EffectivenessGain,
    NaturalGrowth,
    Improvement,
    BrandSpend,
    PerformanceSpend,
    BrandEffect,
    PerformanceEffect,
    Base,
    Media,
    LongTermMediaImpact,
    Total,
    CumulativeTotal,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Period => "Period",
            Column::MediaSpend => "Media Spend",
            Column::SpendDifference => "Spend Difference",
            Column::Upweight => "Upweight",
            Column::EffectivenessGain => "Effectiveness Gain",
            Column::NaturalGrowth => "Natural Growth",
            Column::Improvement => "Improvement",
            Column::BrandSpend => "Brand",
            Column::PerformanceSpend => "Performance",
            Column::BrandEffect => "Brand Effectiveness",
            Column::PerformanceEffect => "Performance Effectiveness",
            Column::Base => "Base",
            Column::Media => "Media",
            Column::LongTermMediaImpact => "Long Term Media Impact",
            Column::Total => "Totals",
            Column::CumulativeTotal => "Cumulative Total",
        }
    }

    /// Numeric value of the column, `None` for the label column
    pub fn value(&self, row: &PeriodRow) -> Option<f64> {
        let value = match self {
            Column::Period => return None,
            Column::MediaSpend => row.media_spend,
            Column::SpendDifference => row.spend_difference,
            Column::Upweight => row.upweight,
            Column::EffectivenessGain => row.effectiveness_gain,
            Column::NaturalGrowth => row.natural_growth,
            Column::Improvement => row.improvement,
            Column::BrandSpend => row.brand_spend,
            Column::PerformanceSpend => row.performance_spend,
            Column::BrandEffect => row.brand_effect,
            Column::PerformanceEffect => row.performance_effect,
            Column::Base => row.base,
            Column::Media => row.media,
            Column::LongTermMediaImpact => row.long_term_media_impact,
            Column::Total => row.total,
            Column::CumulativeTotal => row.cumulative_total,
        };
        Some(value)
    }

    /// Columns a variant actually populates
    pub fn for_variant(variant: &ProjectionVariant) -> Vec<Column> {
        use Column::*;
        match variant {
            ProjectionVariant::Compounding { .. } => vec![
                Period, MediaSpend, Upweight, EffectivenessGain, NaturalGrowth, Improvement,
                BrandEffect, PerformanceEffect, Base, Media, LongTermMediaImpact, Total, CumulativeTotal,
            ],
            ProjectionVariant::SpendScaled => vec![
                Period, MediaSpend, SpendDifference, Upweight, EffectivenessGain, NaturalGrowth, Improvement,
                BrandSpend, PerformanceSpend, BrandEffect, PerformanceEffect, Base, Media, LongTermMediaImpact,
                Total, CumulativeTotal,
            ],
            ProjectionVariant::Classic { .. } => vec![
                Period, MediaSpend, Upweight, EffectivenessGain, NaturalGrowth, BrandEffect,
                PerformanceEffect, Base, Media, Total, CumulativeTotal,
            ],
        }
    }
}

/// Format a number with thousands separators and no decimals, e.g. `1,774,080`
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) if rest.chars().any(|c| c != '0') => ("-", rest),
        Some(rest) => ("", rest),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}", sign, grouped)
}

/// Projection table with every cell formatted for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DisplayTable {
    pub fn build(table: &ProjectionTable, columns: &[Column], order: TableOrder) -> Self {
        let headers = columns.iter().map(|c| c.header().to_string()).collect();

        let rows = ordered_rows(table, order)
            .into_iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| match column.value(row) {
                        Some(value) => format_thousands(value),
                        None => row.label.clone(),
                    })
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    /// Render as a right-aligned plain-text table
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        let format_line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{:>width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ")
        };

        let header_line = format_line(self.headers.as_slice());
        let mut out = String::new();
        out.push_str(&header_line);
        out.push('\n');
        out.push_str(&"-".repeat(header_line.len()));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format_line(row.as_slice()));
            out.push('\n');
        }
        out
    }
}

/// Rows of `table` in the requested order
pub fn ordered_rows(table: &ProjectionTable, order: TableOrder) -> Vec<&PeriodRow> {
    match order {
        TableOrder::Chronological => table.rows.iter().collect(),
        TableOrder::LatestFirst => table.rows.iter().rev().collect(),
    }
}
