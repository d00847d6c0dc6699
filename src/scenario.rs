//! Scenario runner for what-if batches
//!
//! Holds the reference periods and spend once, then runs many parameter
//! sets against them. Each run builds its own table; nothing is shared
//! between runs, so batches can go through rayon.

use crate::error::{PlannerError, Result};
use crate::params::{Parameters, SliderRange};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionTable};
use crate::reference::ReferenceTable;
use rayon::prelude::*;
use serde::Serialize;

/// Final outcome of one point in a parameter sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub budget_upweight: f64,
    pub total_impact: f64,
    pub final_cumulative_total: f64,
}

/// Most points a single budget upweight sweep may produce
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Budget upweight multipliers from `from_pct` to `to_pct` (inclusive) in `step_pct` steps
///
/// Both ends are clamped to the budget upweight slider range first. A grid
/// with more than `MAX_SWEEP_POINTS` points is rejected before anything is
/// allocated.
pub fn sweep_upweights(from_pct: f64, to_pct: f64, step_pct: f64) -> Result<Vec<f64>> {
    if !from_pct.is_finite() || !to_pct.is_finite() || !step_pct.is_finite() {
        return Err(PlannerError::InvalidParameter(
            "sweep bounds and step must be finite numbers".to_string(),
        ));
    }
    if step_pct <= 0.0 {
        return Err(PlannerError::InvalidParameter(format!("sweep step {} must be positive", step_pct)));
    }

    let range = SliderRange::BUDGET_UPWEIGHT_PCT;
    let from = range.clamp(from_pct)?;
    let to = range.clamp(to_pct)?;
    if to < from {
        return Err(PlannerError::InvalidParameter(format!(
            "sweep end {}% is below its start {}%",
            to, from
        )));
    }

    let steps = ((to - from) / step_pct).floor();
    if steps >= MAX_SWEEP_POINTS as f64 {
        return Err(PlannerError::InvalidParameter(format!(
            "sweep from {}% to {}% in {}% steps exceeds {} points",
            from, to, step_pct, MAX_SWEEP_POINTS
        )));
    }

    let steps = steps as usize;
    Ok((0..=steps).map(|i| (from + step_pct * i as f64).min(to) / 100.0).collect())
}

/// Pre-loaded scenario runner
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
    periods: Vec<String>,
    spend: Vec<f64>,
}

impl ScenarioRunner {
    pub fn new(config: ProjectionConfig, periods: Vec<String>, spend: Vec<f64>) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
            periods,
            spend,
        }
    }

    /// Create runner from the periods and spend of a reference table
    pub fn from_reference(config: ProjectionConfig, reference: &ReferenceTable) -> Self {
        let spend = reference.spend_or(config.default_media_spend);
        Self::new(config, reference.labels(), spend)
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.engine.config()
    }

    /// Run a single projection
    pub fn run(&self, params: &Parameters) -> Result<ProjectionTable> {
        self.engine.project(&self.periods, &self.spend, params)
    }

    /// Run projections for several parameter sets, in input order
    pub fn run_batch(&self, params: &[Parameters]) -> Result<Vec<ProjectionTable>> {
        params.par_iter().map(|p| self.run(p)).collect()
    }

    /// Vary budget upweight while holding every other parameter fixed
    pub fn sweep_budget_upweight(&self, base: &Parameters, upweights: &[f64]) -> Result<Vec<SweepPoint>> {
        upweights
            .par_iter()
            .map(|&budget_upweight| {
                let params = Parameters { budget_upweight, ..*base };
                let summary = self.run(&params)?.summary();
                Ok(SweepPoint {
                    budget_upweight,
                    total_impact: summary.total_impact,
                    final_cumulative_total: summary.final_cumulative_total,
                })
            })
            .collect()
    }
}
