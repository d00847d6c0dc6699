//! Cumulative reach curve and its point of diminishing returns

use crate::error::{PlannerError, Result};
use crate::report::{ChartPoint, ChartSeries};
use serde::{Deserialize, Serialize};

/// Marginal reach below this share of the peak counts as diminishing returns
pub const DEFAULT_DIMINISHING_THRESHOLD: f64 = 0.2;

/// Cumulative paid and owned reach over a planning flight
const DEFAULT_CURVE: [(&str, f64); 10] = [
    ("Jan", 4_111_111.0),
    ("Feb", 7_400_000.0),
    ("Mar", 9_866_667.0),
    ("Apr", 11_511_111.0),
    ("May", 12_744_444.0),
    ("Jun", 13_566_667.0),
    ("Jul", 13_977_778.0),
    ("Aug", 14_388_889.0),
    ("Sep", 14_594_444.0),
    ("Oct", 14_800_000.0),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReachPoint {
    pub label: String,
    /// Cumulative reach to date
    pub reach: f64,
    /// Reach added in this period
    pub marginal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReachCurve {
    pub points: Vec<ReachPoint>,
}

impl ReachCurve {
    /// Build a curve from labels and cumulative reach values of equal length
    pub fn from_points(labels: &[String], reach: &[f64]) -> Result<Self> {
        if labels.is_empty() {
            return Err(PlannerError::InvalidParameter("reach curve has no periods".to_string()));
        }
        if labels.len() != reach.len() {
            return Err(PlannerError::InvalidParameter(format!(
                "reach curve has {} labels but {} values",
                labels.len(),
                reach.len()
            )));
        }

        let mut previous = 0.0;
        let points = labels
            .iter()
            .zip(reach)
            .map(|(label, &value)| {
                let point = ReachPoint {
                    label: label.clone(),
                    reach: value,
                    marginal: value - previous,
                };
                previous = value;
                point
            })
            .collect();

        Ok(Self { points })
    }

    /// The built-in ten-month curve
    pub fn default_curve() -> Self {
        let points = DEFAULT_CURVE
            .iter()
            .scan(0.0, |previous, &(label, reach)| {
                let marginal = reach - *previous;
                *previous = reach;
                Some(ReachPoint {
                    label: label.to_string(),
                    reach,
                    marginal,
                })
            })
            .collect();

        Self { points }
    }

    /// First period after the peak whose marginal reach drops below
    /// `threshold` times the peak marginal reach
    pub fn diminishing_returns_index(&self, threshold: f64) -> Option<usize> {
        let (peak_idx, peak) = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.marginal))
            .fold(None, |best: Option<(usize, f64)>, (i, m)| match best {
                Some((_, b)) if b >= m => best,
                _ => Some((i, m)),
            })?;

        if peak <= 0.0 {
            return None;
        }

        self.points
            .iter()
            .enumerate()
            .skip(peak_idx + 1)
            .find(|(_, p)| p.marginal < threshold * peak)
            .map(|(i, _)| i)
    }

    /// Chart series of cumulative reach with the diminishing-returns marker
    pub fn series(&self, threshold: f64) -> ChartSeries {
        let points = self
            .points
            .iter()
            .map(|p| ChartPoint {
                label: p.label.clone(),
                value: p.reach,
            })
            .collect();

        let mut series = ChartSeries::new("Cumulative Paid & Owned Reach", "Reach", points);
        series.marker = self
            .diminishing_returns_index(threshold)
            .map(|i| self.points[i].label.clone());
        series
    }
}
