//! Core projection engine for period-by-period media impact projections

use super::rows::{Alignment, PeriodRow, ProjectionTable};
use super::state::ProjectionState;
use crate::error::{PlannerError, Result};
use crate::params::Parameters;

/// Upweight of the first period in the compounding projection
pub const DEFAULT_UPWEIGHT_ANCHOR: f64 = 600_000.0;

/// Upweight of the first period in the spend-scaled projection
pub const SPEND_SCALED_UPWEIGHT_ANCHOR: f64 = 600.0;

/// Cumulative total reported for the first period of the compounding projection
pub const DEFAULT_CUMULATIVE_SEED: f64 = 4_300_000.0;

/// Periods between a natural-growth value and the upweight it is measured against
pub const DEFAULT_LOOKBACK_PERIODS: usize = 3;

/// Spend used for periods the operator supplied no spend for
pub const DEFAULT_MEDIA_SPEND: f64 = 32_000_000.0;

/// Weight on performance effect inside the media component
pub const DEFAULT_PERFORMANCE_WEIGHT: f64 = 2.0;

/// Share of spend counted as base contribution in the classic projection
pub const CLASSIC_BASE_SHARE: f64 = 0.4;

/// Formula set used to derive each period
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionVariant {
    /// Upweight compounds from a fixed anchor; components are measured
    /// against the anchor plus prior brand effect
    Compounding {
        /// Period 0 effectiveness gain and natural growth equal the anchor
        anchor_first_period: bool,
        /// Multiplier on performance effect in the media component
        performance_weight: f64,
    },
    /// Upweight compounds from a small anchor; components scale with spend
    SpendScaled,
    /// Everything is a fixed share of the period's own spend
    Classic {
        /// Share of spend counted as base contribution
        base_share: f64,
    },
}

/// How the cumulative total of period 0 is set
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CumulativeSeed {
    /// Period 0 reports this constant; its own total is not added
    Fixed(f64),
    /// Period 0 reports its own total (a plain running sum)
    FirstTotal,
}

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    pub variant: ProjectionVariant,

    /// Upweight of period 0 (ignored by the classic variant)
    pub upweight_anchor: f64,

    /// Lookback depth of the improvement term
    pub lookback_periods: usize,

    pub cumulative_seed: CumulativeSeed,

    /// Spend used to pad a spend list shorter than the period list
    pub default_media_spend: f64,
}

impl ProjectionConfig {
    /// Compounding projection with the anchor constants of the impact tool
    pub fn compounding() -> Self {
        Self {
            variant: ProjectionVariant::Compounding {
                anchor_first_period: true,
                performance_weight: DEFAULT_PERFORMANCE_WEIGHT,
            },
            upweight_anchor: DEFAULT_UPWEIGHT_ANCHOR,
            lookback_periods: DEFAULT_LOOKBACK_PERIODS,
            cumulative_seed: CumulativeSeed::Fixed(DEFAULT_CUMULATIVE_SEED),
            default_media_spend: DEFAULT_MEDIA_SPEND,
        }
    }

    /// Spend-scaled projection
    pub fn spend_scaled() -> Self {
        Self {
            variant: ProjectionVariant::SpendScaled,
            upweight_anchor: SPEND_SCALED_UPWEIGHT_ANCHOR,
            lookback_periods: DEFAULT_LOOKBACK_PERIODS,
            cumulative_seed: CumulativeSeed::FirstTotal,
            default_media_spend: DEFAULT_MEDIA_SPEND,
        }
    }

    /// Classic fixed-share projection
    pub fn classic() -> Self {
        Self {
            variant: ProjectionVariant::Classic {
                base_share: CLASSIC_BASE_SHARE,
            },
            upweight_anchor: 0.0,
            lookback_periods: DEFAULT_LOOKBACK_PERIODS,
            cumulative_seed: CumulativeSeed::FirstTotal,
            default_media_spend: DEFAULT_MEDIA_SPEND,
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::compounding()
    }
}

/// Reconcile a spend list with the period count
///
/// The period list is authoritative: extra spend values are dropped and
/// missing ones are filled with `default_spend`.
pub fn align_spend(period_count: usize, spend: &[f64], default_spend: f64) -> (Vec<f64>, Alignment) {
    let mut aligned: Vec<f64> = spend.iter().copied().take(period_count).collect();

    let alignment = if spend.len() > period_count {
        Alignment::Truncated(spend.len() - period_count)
    } else if spend.len() < period_count {
        aligned.resize(period_count, default_spend);
        Alignment::Padded(period_count - spend.len())
    } else {
        Alignment::Exact
    };

    (aligned, alignment)
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run a projection over `periods` with per-period `spend`
    ///
    /// Rows come back in the same order as `periods`.
    pub fn project(&self, periods: &[String], spend: &[f64], params: &Parameters) -> Result<ProjectionTable> {
        if periods.is_empty() {
            return Err(PlannerError::NoPeriods);
        }

        let (spend, alignment) = align_spend(periods.len(), spend, self.config.default_media_spend);
        match alignment {
            Alignment::Exact => {}
            Alignment::Padded(n) => log::warn!(
                "{} period(s) had no media spend; using {:.0}",
                n,
                self.config.default_media_spend
            ),
            Alignment::Truncated(n) => log::warn!("dropping {} media spend value(s) beyond the last period", n),
        }
        log::debug!("projecting {} periods with {:?}", periods.len(), self.config.variant);

        let mut table = ProjectionTable::new(alignment);
        let mut state = ProjectionState::new();

        for (label, &media_spend) in periods.iter().zip(&spend) {
            // Advance state to the next period
            state.advance();

            let row = self.calculate_period(label, media_spend, params, &mut state);
            table.add_row(row);
        }

        Ok(table)
    }

    /// Calculate all fields for a single period
    fn calculate_period(&self, label: &str, media_spend: f64, params: &Parameters, state: &mut ProjectionState) -> PeriodRow {
        let mut row = PeriodRow::new(label, media_spend);
        row.spend_difference = state.prior_spend.map(|prior| media_spend - prior).unwrap_or(0.0);

        match &self.config.variant {
            ProjectionVariant::Compounding { anchor_first_period, performance_weight } => {
                self.compounding_period(params, state, *anchor_first_period, *performance_weight, &mut row)
            }
            ProjectionVariant::SpendScaled => self.spend_scaled_period(params, state, &mut row),
            ProjectionVariant::Classic { base_share } => self.classic_period(params, state, *base_share, &mut row),
        }

        row.cumulative_total = if state.period_index == 0 {
            match self.config.cumulative_seed {
                CumulativeSeed::Fixed(seed) => seed,
                CumulativeSeed::FirstTotal => row.total,
            }
        } else {
            state.cumulative_total + row.total
        };

        state.close_period(media_spend, row.brand_effect, row.cumulative_total);
        row
    }

    /// Upweight for the current period: anchor at period 0, then compounding
    fn compounded_upweight(&self, params: &Parameters, state: &mut ProjectionState) -> f64 {
        let upweight = if state.period_index == 0 {
            self.config.upweight_anchor
        } else {
            state.prior_upweight() * params.budget_upweight
        };
        state.record_upweight(upweight);
        upweight
    }

    /// Natural growth measured against the upweight `lookback_periods` back
    fn improvement(&self, natural_growth: f64, state: &ProjectionState) -> f64 {
        if state.period_index == 0 {
            0.0
        } else {
            natural_growth - state.lookback_upweight(self.config.lookback_periods)
        }
    }

    fn compounding_period(
        &self,
        params: &Parameters,
        state: &mut ProjectionState,
        anchor_first_period: bool,
        performance_weight: f64,
        row: &mut PeriodRow,
    ) {
        row.upweight = self.compounded_upweight(params, state);

        if state.period_index == 0 && anchor_first_period {
            row.effectiveness_gain = self.config.upweight_anchor;
            row.natural_growth = self.config.upweight_anchor;
        } else {
            row.effectiveness_gain = row.upweight * params.effectiveness;
            row.natural_growth = row.effectiveness_gain * params.natural_growth;
        }

        row.improvement = self.improvement(row.natural_growth, state);
        row.brand_spend = row.media_spend * params.brand_share();
        row.performance_spend = row.media_spend * params.performance_share();
        row.brand_effect = row.improvement * params.brand_share();
        row.performance_effect = row.improvement * params.performance_share();

        // Base and long-term impact lag brand effect by one period
        let anchor = state.anchor_upweight();
        let prior_brand = if state.period_index == 0 {
            row.brand_effect
        } else {
            state.prior_brand_effect
        };

        row.base = (anchor + prior_brand) * params.base_contribution;
        row.long_term_media_impact = (anchor + prior_brand) * params.lt_media_contribution;
        row.media = (anchor + row.performance_effect * performance_weight) * params.media_contribution;
        row.total = row.base + row.media + row.long_term_media_impact;
    }

    fn spend_scaled_period(&self, params: &Parameters, state: &mut ProjectionState, row: &mut PeriodRow) {
        row.upweight = self.compounded_upweight(params, state);
        row.effectiveness_gain = row.upweight * params.effectiveness;
        row.natural_growth = row.effectiveness_gain * params.natural_growth;
        row.improvement = self.improvement(row.natural_growth, state);

        row.brand_spend = row.media_spend * params.brand_share();
        row.performance_spend = row.media_spend * params.performance_share();
        row.brand_effect = row.brand_spend * row.effectiveness_gain;
        row.performance_effect = row.performance_spend * row.effectiveness_gain;

        row.base = row.media_spend * params.base_contribution;
        row.media = row.media_spend * params.media_contribution;
        row.long_term_media_impact = row.media_spend * params.lt_media_contribution;
        row.total = row.base + row.media + row.long_term_media_impact;
    }

    fn classic_period(&self, params: &Parameters, state: &mut ProjectionState, base_share: f64, row: &mut PeriodRow) {
        row.upweight = row.media_spend * params.budget_upweight;
        state.record_upweight(row.upweight);
        row.effectiveness_gain = row.upweight * params.effectiveness;
        row.natural_growth = row.media_spend * params.natural_growth;

        row.brand_spend = row.media_spend * params.brand_share();
        row.performance_spend = row.media_spend * params.performance_share();
        row.brand_effect = row.effectiveness_gain * params.brand_share() * params.brand_effectiveness;
        row.performance_effect =
            row.effectiveness_gain * params.performance_share() * params.performance_effectiveness;

        row.base = row.media_spend * base_share;
        row.media = row.brand_effect + row.performance_effect;
        // Natural growth stands in for the long-term component here
        row.total = row.base + row.media + row.natural_growth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn five_years() -> Vec<String> {
        labels(&["2024", "2025-26", "2026-27", "2027-28", "2028-29"])
    }

    #[test]
    fn test_worked_example() {
        let engine = ProjectionEngine::new(ProjectionConfig::compounding());
        let params = Parameters {
            budget_upweight: 1.28,
            effectiveness: 2.2,
            natural_growth: 1.05,
            ..Default::default()
        };

        let table = engine
            .project(&labels(&["2024", "2025-26"]), &[32_000_000.0, 32_000_000.0], &params)
            .unwrap();
        let rows = &table.rows;

        assert_relative_eq!(rows[0].upweight, 600_000.0);
        assert_relative_eq!(rows[1].upweight, 768_000.0, max_relative = 1e-12);
        assert_relative_eq!(rows[0].effectiveness_gain, 600_000.0);
        assert_relative_eq!(rows[1].effectiveness_gain, 1_689_600.0, max_relative = 1e-12);
        assert_relative_eq!(rows[0].natural_growth, 600_000.0);
        assert_relative_eq!(rows[1].natural_growth, 1_774_080.0, max_relative = 1e-12);
        assert_eq!(rows[0].improvement, 0.0);
        assert_relative_eq!(rows[1].improvement, 1_174_080.0, max_relative = 1e-12);
    }

    #[test]
    fn test_compounding_components() {
        let engine = ProjectionEngine::new(ProjectionConfig::compounding());
        let params = Parameters::default();

        let table = engine
            .project(&labels(&["2024", "2025-26", "2026-27"]), &[], &params)
            .unwrap();
        let rows = &table.rows;

        // Period 0 has no brand effect, so components sit on the anchor alone
        assert_relative_eq!(rows[0].base, 600_000.0 * 0.4);
        assert_relative_eq!(rows[0].long_term_media_impact, 600_000.0 * 0.3);
        assert_relative_eq!(rows[0].media, 600_000.0 * 0.3);
        assert_relative_eq!(rows[0].cumulative_total, DEFAULT_CUMULATIVE_SEED);

        // Period 1 still uses period 0's brand effect
        assert_relative_eq!(rows[1].base, 600_000.0 * 0.4);
        let expected_media = (600_000.0 + rows[1].performance_effect * 2.0) * 0.3;
        assert_relative_eq!(rows[1].media, expected_media, max_relative = 1e-12);

        // Period 2 picks up period 1's brand effect
        let expected_base = (600_000.0 + rows[1].brand_effect) * 0.4;
        assert_relative_eq!(rows[2].base, expected_base, max_relative = 1e-12);
        assert_relative_eq!(rows[2].total, rows[2].base + rows[2].media + rows[2].long_term_media_impact);
    }

    #[test]
    fn test_lookback_uses_upweight_three_periods_back() {
        let engine = ProjectionEngine::new(ProjectionConfig::compounding());
        let params = Parameters::default();

        let table = engine.project(&five_years(), &[], &params).unwrap();
        let rows = &table.rows;

        for i in 1..4 {
            assert_relative_eq!(rows[i].improvement, rows[i].natural_growth - rows[0].upweight, max_relative = 1e-12);
        }
        assert_relative_eq!(rows[4].improvement, rows[4].natural_growth - rows[1].upweight, max_relative = 1e-12);
    }

    #[test]
    fn test_configurable_lookback() {
        let config = ProjectionConfig {
            lookback_periods: 1,
            ..ProjectionConfig::compounding()
        };
        let table = ProjectionEngine::new(config)
            .project(&five_years(), &[], &Parameters::default())
            .unwrap();

        assert_relative_eq!(
            table.rows[3].improvement,
            table.rows[3].natural_growth - table.rows[2].upweight,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_unit_upweight_is_constant() {
        let engine = ProjectionEngine::default();
        let params = Parameters { budget_upweight: 1.0, ..Default::default() };

        let table = engine.project(&five_years(), &[], &params).unwrap();
        assert!(table.rows.iter().all(|r| r.upweight == DEFAULT_UPWEIGHT_ANCHOR));
    }

    #[test]
    fn test_single_period() {
        let engine = ProjectionEngine::default();
        let table = engine
            .project(&labels(&["2024"]), &[32_000_000.0], &Parameters::default())
            .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].improvement, 0.0);
        assert_eq!(table.rows[0].spend_difference, 0.0);
        assert_eq!(table.alignment, Alignment::Exact);
    }

    #[test]
    fn test_no_periods_is_an_error() {
        let engine = ProjectionEngine::default();
        let result = engine.project(&[], &[1.0], &Parameters::default());
        assert!(matches!(result, Err(PlannerError::NoPeriods)));
    }

    #[test]
    fn test_short_spend_is_padded() {
        let engine = ProjectionEngine::default();
        let table = engine
            .project(&five_years(), &[1.0, 2.0, 3.0], &Parameters::default())
            .unwrap();

        assert_eq!(table.len(), 5);
        assert_eq!(table.alignment, Alignment::Padded(2));
        assert_eq!(table.rows[3].media_spend, DEFAULT_MEDIA_SPEND);
        assert_eq!(table.rows[4].media_spend, DEFAULT_MEDIA_SPEND);
        assert_eq!(table.rows[3].spend_difference, DEFAULT_MEDIA_SPEND - 3.0);
    }

    #[test]
    fn test_long_spend_is_truncated() {
        let engine = ProjectionEngine::default();
        let table = engine
            .project(&labels(&["a", "b"]), &[1.0, 2.0, 3.0, 4.0], &Parameters::default())
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.alignment, Alignment::Truncated(2));
        assert_eq!(table.rows[1].media_spend, 2.0);
    }

    #[test]
    fn test_spend_scaled_variant() {
        let engine = ProjectionEngine::new(ProjectionConfig::spend_scaled());
        let params = Parameters {
            brand_allocation: 50.0,
            base_contribution: 0.5,
            media_contribution: 0.5,
            lt_media_contribution: 0.5,
            ..Default::default()
        };
        let spend = [32_000_000.0, 34_000_000.0];

        let table = engine.project(&labels(&["2025-26", "2026-27"]), &spend, &params).unwrap();
        let rows = &table.rows;

        assert_relative_eq!(rows[0].upweight, 600.0);
        assert_relative_eq!(rows[0].effectiveness_gain, 600.0 * 2.2, max_relative = 1e-12);
        assert_relative_eq!(rows[0].brand_spend, 16_000_000.0);
        assert_relative_eq!(rows[0].brand_effect, 16_000_000.0 * 600.0 * 2.2, max_relative = 1e-12);
        assert_relative_eq!(rows[0].total, 32_000_000.0 * 1.5, max_relative = 1e-12);
        assert_relative_eq!(rows[0].cumulative_total, rows[0].total);
        assert_relative_eq!(rows[1].cumulative_total, rows[0].total + rows[1].total, max_relative = 1e-12);
        assert_relative_eq!(rows[1].spend_difference, 2_000_000.0);
    }

    #[test]
    fn test_classic_variant() {
        let engine = ProjectionEngine::new(ProjectionConfig::classic());
        let params = Parameters {
            budget_upweight: 0.10,
            effectiveness: 2.2,
            natural_growth: 0.05,
            brand_allocation: 60.0,
            brand_effectiveness: 0.6,
            performance_effectiveness: 0.4,
            ..Default::default()
        };

        let table = engine.project(&five_years(), &[32_000_000.0; 5], &params).unwrap();
        let row = &table.rows[0];

        let upweight = 3_200_000.0;
        let gain = upweight * 2.2;
        assert_relative_eq!(row.upweight, upweight, max_relative = 1e-12);
        assert_relative_eq!(row.effectiveness_gain, gain, max_relative = 1e-12);
        assert_relative_eq!(row.natural_growth, 1_600_000.0, max_relative = 1e-12);
        assert_relative_eq!(row.brand_effect, gain * 0.6 * 0.6, max_relative = 1e-12);
        assert_relative_eq!(row.performance_effect, gain * 0.4 * 0.4, max_relative = 1e-12);
        assert_relative_eq!(row.base, 12_800_000.0, max_relative = 1e-12);
        assert_relative_eq!(row.total, row.base + row.media + row.natural_growth, max_relative = 1e-12);

        // Flat spend gives a flat total
        let last = table.rows.last().unwrap();
        assert_relative_eq!(last.cumulative_total, row.total * 5.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_spend_propagates() {
        let engine = ProjectionEngine::new(ProjectionConfig::classic());
        let table = engine.project(&five_years(), &[0.0; 5], &Parameters::default()).unwrap();

        for row in &table.rows {
            assert_eq!(row.upweight, 0.0);
            assert_eq!(row.total, 0.0);
            assert_eq!(row.cumulative_total, 0.0);
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_recurrences_hold(
            periods in 1usize..10,
            upweight_pct in 0u32..500,
            effectiveness_pct in 0u32..500,
            growth_pct in 0u32..500,
            brand in 0u32..=100,
            spend_len in 0usize..12,
        ) {
            let params = Parameters {
                budget_upweight: upweight_pct as f64 / 100.0,
                effectiveness: effectiveness_pct as f64 / 100.0,
                natural_growth: growth_pct as f64 / 100.0,
                brand_allocation: brand as f64,
                ..Default::default()
            };
            let labels: Vec<String> = (0..periods).map(|i| format!("{}", 2024 + i)).collect();
            let spend: Vec<f64> = (0..spend_len).map(|i| 1_000_000.0 * i as f64).collect();

            for config in [ProjectionConfig::compounding(), ProjectionConfig::spend_scaled(), ProjectionConfig::classic()] {
                let engine = ProjectionEngine::new(config.clone());
                let table = engine.project(&labels, &spend, &params).unwrap();
                prop_assert_eq!(table.len(), periods);
                prop_assert_eq!(table.rows[0].improvement, 0.0);

                if let CumulativeSeed::Fixed(seed) = config.cumulative_seed {
                    prop_assert_eq!(table.rows[0].cumulative_total, seed);
                }

                for i in 1..periods {
                    let prev = &table.rows[i - 1];
                    let row = &table.rows[i];
                    prop_assert_eq!(row.cumulative_total, prev.cumulative_total + row.total);
                    if !matches!(config.variant, ProjectionVariant::Classic { .. }) {
                        prop_assert_eq!(row.upweight, prev.upweight * params.budget_upweight);
                    }
                }

                // Same inputs, same table
                let again = engine.project(&labels, &spend, &params).unwrap();
                prop_assert_eq!(&table, &again);
            }
        }
    }
}
