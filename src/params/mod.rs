//! Scenario parameters and the input boundary that resolves them

mod inputs;
pub mod parse;

pub use inputs::{RawInputs, ResolvedInputs, SliderRange, SliderRanges};
pub use parse::{parse_period_labels, parse_spend_list, parse_split_preset};

use serde::{Deserialize, Serialize};

/// Fully-resolved scalar parameters for one projection pass
///
/// All ratios are plain multipliers (1.28 rather than 128 %). Allocation is
/// kept as a percentage because the display shows it that way. The
/// performance allocation is always derived from the brand allocation so the
/// two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Period-over-period growth applied to the upweight baseline
    pub budget_upweight: f64,

    /// Multiplier converting upweight into effectiveness gain
    pub effectiveness: f64,

    /// Multiplier converting effectiveness gain into natural growth
    pub natural_growth: f64,

    /// Brand share of the split, 0-100
    pub brand_allocation: f64,

    pub base_contribution: f64,
    pub media_contribution: f64,
    pub lt_media_contribution: f64,

    /// Classic variant only: response weight of the brand channel (0-1)
    pub brand_effectiveness: f64,

    /// Classic variant only: response weight of the performance channel (0-1)
    pub performance_effectiveness: f64,
}

impl Parameters {
    /// Performance share of the split, always `100 - brand_allocation`
    pub fn performance_allocation(&self) -> f64 {
        100.0 - self.brand_allocation
    }

    pub fn brand_share(&self) -> f64 {
        self.brand_allocation / 100.0
    }

    pub fn performance_share(&self) -> f64 {
        self.performance_allocation() / 100.0
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            budget_upweight: 1.28,
            effectiveness: 2.2,
            natural_growth: 1.05,
            brand_allocation: 60.0,
            base_contribution: 0.40,
            media_contribution: 0.30,
            lt_media_contribution: 0.30,
            brand_effectiveness: 0.6,
            performance_effectiveness: 0.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocations_are_complementary() {
        let mut params = Parameters::default();
        for brand in [0.0, 20.0, 60.0, 100.0] {
            params.brand_allocation = brand;
            assert_eq!(params.brand_allocation + params.performance_allocation(), 100.0);
        }
    }

    #[test]
    fn test_shares() {
        let params = Parameters { brand_allocation: 60.0, ..Default::default() };
        assert!((params.brand_share() - 0.6).abs() < 1e-12);
        assert!((params.performance_share() - 0.4).abs() < 1e-12);
    }
}
