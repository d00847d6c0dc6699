//! Slider-style raw inputs and their resolution into `Parameters`

use super::parse::{parse_period_labels, parse_spend_list, parse_split_preset};
use super::Parameters;
use crate::error::{PlannerError, Result};
use crate::projection::ProjectionVariant;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inclusive range of a slider control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

impl SliderRange {
    pub const BUDGET_UPWEIGHT_PCT: SliderRange = SliderRange { name: "budget upweight", min: 0.0, max: 500.0 };
    pub const EFFECTIVENESS_PCT: SliderRange = SliderRange { name: "effectiveness", min: 0.0, max: 500.0 };
    pub const NATURAL_GROWTH_PCT: SliderRange = SliderRange { name: "natural growth", min: 0.0, max: 500.0 };
    pub const ALLOCATION_PCT: SliderRange = SliderRange { name: "brand allocation", min: 0.0, max: 100.0 };
    pub const CONTRIBUTION_PCT: SliderRange = SliderRange { name: "contribution", min: 0.0, max: 100.0 };
    pub const CHANNEL_EFFECTIVENESS: SliderRange = SliderRange { name: "channel effectiveness", min: 0.0, max: 1.0 };

    pub const CLASSIC_BUDGET_UPWEIGHT_PCT: SliderRange = SliderRange { name: "budget upweight", min: 0.0, max: 100.0 };
    pub const CLASSIC_EFFECTIVENESS_PCT: SliderRange = SliderRange { name: "effectiveness", min: 10.0, max: 500.0 };
    pub const CLASSIC_NATURAL_GROWTH_PCT: SliderRange = SliderRange { name: "natural growth", min: 0.0, max: 20.0 };

    /// Clamp a value into the range; NaN is a malformed input, not a slider position
    pub fn clamp(&self, value: f64) -> Result<f64> {
        if value.is_nan() {
            return Err(PlannerError::InvalidParameter(format!("{} is not a number", self.name)));
        }
        let clamped = value.clamp(self.min, self.max);
        if clamped != value {
            log::debug!("{} {} clamped to {}", self.name, value, clamped);
        }
        Ok(clamped)
    }
}

/// Ranges of the sliders whose bounds depend on the projection variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRanges {
    pub budget_upweight: SliderRange,
    pub effectiveness: SliderRange,
    pub natural_growth: SliderRange,
}

impl SliderRanges {
    pub const STANDARD: SliderRanges = SliderRanges {
        budget_upweight: SliderRange::BUDGET_UPWEIGHT_PCT,
        effectiveness: SliderRange::EFFECTIVENESS_PCT,
        natural_growth: SliderRange::NATURAL_GROWTH_PCT,
    };

    /// Classic sliders: upweight 0-100 %, effectiveness 0.1x-5.0x, growth 0-20 %
    pub const CLASSIC: SliderRanges = SliderRanges {
        budget_upweight: SliderRange::CLASSIC_BUDGET_UPWEIGHT_PCT,
        effectiveness: SliderRange::CLASSIC_EFFECTIVENESS_PCT,
        natural_growth: SliderRange::CLASSIC_NATURAL_GROWTH_PCT,
    };

    pub fn for_variant(variant: &ProjectionVariant) -> Self {
        match variant {
            ProjectionVariant::Classic { .. } => Self::CLASSIC,
            ProjectionVariant::Compounding { .. } | ProjectionVariant::SpendScaled => Self::STANDARD,
        }
    }
}

/// Raw operator inputs, expressed the way the sliders show them
///
/// Percent fields are in percent (128 means 1.28x). Missing fields in a JSON
/// scenario file take the same defaults the sliders start at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    #[serde(default = "default_budget_upweight_pct")]
    pub budget_upweight_pct: f64,

    #[serde(default = "default_effectiveness_pct")]
    pub effectiveness_pct: f64,

    #[serde(default = "default_natural_growth_pct")]
    pub natural_growth_pct: f64,

    #[serde(default = "default_brand_allocation_pct")]
    pub brand_allocation_pct: f64,

    /// Preset such as "60/40"; overrides `brand_allocation_pct` when set
    #[serde(default)]
    pub split: Option<String>,

    #[serde(default = "default_base_contribution_pct")]
    pub base_contribution_pct: f64,

    #[serde(default = "default_media_contribution_pct")]
    pub media_contribution_pct: f64,

    #[serde(default = "default_lt_media_contribution_pct")]
    pub lt_media_contribution_pct: f64,

    #[serde(default = "default_brand_effectiveness")]
    pub brand_effectiveness: f64,

    #[serde(default = "default_performance_effectiveness")]
    pub performance_effectiveness: f64,

    /// Comma-separated period labels
    #[serde(default)]
    pub periods: Option<String>,

    /// Comma-separated media spend per period
    #[serde(default)]
    pub spend: Option<String>,
}

fn default_budget_upweight_pct() -> f64 { 128.0 }
fn default_effectiveness_pct() -> f64 { 220.0 }
fn default_natural_growth_pct() -> f64 { 105.0 }
fn default_brand_allocation_pct() -> f64 { 60.0 }
fn default_base_contribution_pct() -> f64 { 40.0 }
fn default_media_contribution_pct() -> f64 { 30.0 }
fn default_lt_media_contribution_pct() -> f64 { 30.0 }
fn default_brand_effectiveness() -> f64 { 0.6 }
fn default_performance_effectiveness() -> f64 { 0.4 }

impl Default for RawInputs {
    fn default() -> Self {
        Self {
            budget_upweight_pct: default_budget_upweight_pct(),
            effectiveness_pct: default_effectiveness_pct(),
            natural_growth_pct: default_natural_growth_pct(),
            brand_allocation_pct: default_brand_allocation_pct(),
            split: None,
            base_contribution_pct: default_base_contribution_pct(),
            media_contribution_pct: default_media_contribution_pct(),
            lt_media_contribution_pct: default_lt_media_contribution_pct(),
            brand_effectiveness: default_brand_effectiveness(),
            performance_effectiveness: default_performance_effectiveness(),
            periods: None,
            spend: None,
        }
    }
}

impl RawInputs {
    /// Slider starting positions of the spend-scaled projection
    pub fn spend_scaled_defaults() -> Self {
        Self {
            brand_allocation_pct: 50.0,
            base_contribution_pct: 50.0,
            media_contribution_pct: 50.0,
            lt_media_contribution_pct: 50.0,
            ..Default::default()
        }
    }

    /// Slider starting positions of the classic projection
    pub fn classic_defaults() -> Self {
        Self {
            budget_upweight_pct: 10.0,
            natural_growth_pct: 5.0,
            split: Some("50/50".to_string()),
            ..Default::default()
        }
    }
}

/// Inputs after validation: parameters plus any operator-supplied periods and spend
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInputs {
    pub params: Parameters,
    pub periods: Option<Vec<String>>,
    pub spend: Option<Vec<f64>>,
}

impl RawInputs {
    /// Load a scenario from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate and clamp into a `Parameters` value using the standard slider ranges
    pub fn resolve(&self) -> Result<ResolvedInputs> {
        self.resolve_with(&SliderRanges::STANDARD)
    }

    /// Validate and clamp with the slider ranges of `variant`
    pub fn resolve_for(&self, variant: &ProjectionVariant) -> Result<ResolvedInputs> {
        self.resolve_with(&SliderRanges::for_variant(variant))
    }

    pub fn resolve_with(&self, ranges: &SliderRanges) -> Result<ResolvedInputs> {
        let brand_pct = match &self.split {
            Some(preset) => parse_split_preset(preset)?,
            None => self.brand_allocation_pct,
        };

        let params = Parameters {
            budget_upweight: ranges.budget_upweight.clamp(self.budget_upweight_pct)? / 100.0,
            effectiveness: ranges.effectiveness.clamp(self.effectiveness_pct)? / 100.0,
            natural_growth: ranges.natural_growth.clamp(self.natural_growth_pct)? / 100.0,
            brand_allocation: SliderRange::ALLOCATION_PCT.clamp(brand_pct)?,
            base_contribution: SliderRange::CONTRIBUTION_PCT.clamp(self.base_contribution_pct)? / 100.0,
            media_contribution: SliderRange::CONTRIBUTION_PCT.clamp(self.media_contribution_pct)? / 100.0,
            lt_media_contribution: SliderRange::CONTRIBUTION_PCT.clamp(self.lt_media_contribution_pct)? / 100.0,
            brand_effectiveness: SliderRange::CHANNEL_EFFECTIVENESS.clamp(self.brand_effectiveness)?,
            performance_effectiveness: SliderRange::CHANNEL_EFFECTIVENESS.clamp(self.performance_effectiveness)?,
        };

        let periods = self.periods.as_deref().map(parse_period_labels).transpose()?;
        let spend = self.spend.as_deref().map(parse_spend_list).transpose()?;

        Ok(ResolvedInputs { params, periods, spend })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionConfig;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_resolve_to_default_parameters() {
        let resolved = RawInputs::default().resolve().unwrap();
        let expected = Parameters::default();

        assert_relative_eq!(resolved.params.budget_upweight, expected.budget_upweight);
        assert_relative_eq!(resolved.params.effectiveness, expected.effectiveness);
        assert_relative_eq!(resolved.params.natural_growth, expected.natural_growth);
        assert_relative_eq!(resolved.params.brand_allocation, expected.brand_allocation);
        assert_relative_eq!(resolved.params.base_contribution, expected.base_contribution);
        assert!(resolved.periods.is_none());
        assert!(resolved.spend.is_none());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let raw = RawInputs {
            budget_upweight_pct: 900.0,
            effectiveness_pct: -20.0,
            brand_allocation_pct: 140.0,
            media_contribution_pct: 101.0,
            performance_effectiveness: 3.0,
            ..Default::default()
        };
        let params = raw.resolve().unwrap().params;

        assert_relative_eq!(params.budget_upweight, 5.0);
        assert_relative_eq!(params.effectiveness, 0.0);
        assert_relative_eq!(params.brand_allocation, 100.0);
        assert_relative_eq!(params.performance_allocation(), 0.0);
        assert_relative_eq!(params.media_contribution, 1.0);
        assert_relative_eq!(params.performance_effectiveness, 1.0);
    }

    #[test]
    fn test_classic_defaults() {
        let params = RawInputs::classic_defaults().resolve().unwrap().params;
        assert_relative_eq!(params.budget_upweight, 0.10);
        assert_relative_eq!(params.natural_growth, 0.05);
        assert_relative_eq!(params.brand_allocation, 50.0);
        assert_relative_eq!(params.brand_effectiveness, 0.6);
    }

    #[test]
    fn test_classic_uses_its_own_slider_ranges() {
        let raw = RawInputs {
            budget_upweight_pct: 300.0,
            natural_growth_pct: 50.0,
            effectiveness_pct: 2.0,
            ..RawInputs::classic_defaults()
        };

        let params = raw.resolve_for(&ProjectionConfig::classic().variant).unwrap().params;
        assert_relative_eq!(params.budget_upweight, 1.0);
        assert_relative_eq!(params.natural_growth, 0.2);
        assert_relative_eq!(params.effectiveness, 0.1);

        // Same inputs stay inside the wider compounding ranges
        let params = raw.resolve_for(&ProjectionConfig::compounding().variant).unwrap().params;
        assert_relative_eq!(params.budget_upweight, 3.0);
        assert_relative_eq!(params.natural_growth, 0.5);
        assert_relative_eq!(params.effectiveness, 0.02);
    }

    #[test]
    fn test_nan_is_rejected() {
        let raw = RawInputs { natural_growth_pct: f64::NAN, ..Default::default() };
        assert!(matches!(raw.resolve(), Err(PlannerError::InvalidParameter(_))));
    }

    #[test]
    fn test_split_preset_overrides_allocation() {
        let raw = RawInputs {
            brand_allocation_pct: 20.0,
            split: Some("70/30".to_string()),
            ..Default::default()
        };
        let params = raw.resolve().unwrap().params;
        assert_relative_eq!(params.brand_allocation, 70.0);
        assert_relative_eq!(params.performance_allocation(), 30.0);
    }

    #[test]
    fn test_json_scenario_uses_slider_defaults() {
        let raw = RawInputs::from_json_str(
            r#"{ "budget_upweight_pct": 155, "periods": "Jan,Feb", "spend": "100,200" }"#,
        )
        .unwrap();

        assert_eq!(raw.budget_upweight_pct, 155.0);
        assert_eq!(raw.effectiveness_pct, 220.0);

        let resolved = raw.resolve().unwrap();
        assert_eq!(resolved.periods.unwrap(), vec!["Jan", "Feb"]);
        assert_eq!(resolved.spend.unwrap(), vec![100.0, 200.0]);
    }

    #[test]
    fn test_json_with_malformed_number_is_rejected() {
        let err = RawInputs::from_json_str(r#"{ "effectiveness_pct": "high" }"#).unwrap_err();
        assert!(matches!(err, PlannerError::SerializationError(_)));
    }
}
