//! Parsing of the free-text inputs: period labels, spend lists, split presets

use crate::error::{PlannerError, Result};

/// Split a comma-separated list of period labels, e.g. `"2024, 2025-26"`
///
/// Whitespace around each label is trimmed and empty entries are skipped.
pub fn parse_period_labels(text: &str) -> Result<Vec<String>> {
    let labels: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect();

    if labels.is_empty() {
        return Err(PlannerError::InvalidParameter(format!(
            "no period labels in {:?}",
            text
        )));
    }

    Ok(labels)
}

/// Parse a comma-separated list of per-period spend values
///
/// Underscores are accepted as digit separators (`32_000_000`). Negative
/// values are clamped to zero; anything non-numeric is rejected.
pub fn parse_spend_list(text: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();

    for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let cleaned = entry.replace('_', "");
        let value: f64 = cleaned.parse().map_err(|_| {
            PlannerError::InvalidParameter(format!("media spend {:?} is not a number", entry))
        })?;
        if !value.is_finite() {
            return Err(PlannerError::InvalidParameter(format!(
                "media spend {:?} is not finite",
                entry
            )));
        }
        values.push(value.max(0.0));
    }

    Ok(values)
}

/// Parse a brand/performance split preset such as `"70/30"`
///
/// Returns the brand percentage. Both halves must be numeric and sum to 100.
pub fn parse_split_preset(preset: &str) -> Result<f64> {
    let invalid = || PlannerError::InvalidParameter(format!("split preset {:?} is not of the form BRAND/PERFORMANCE", preset));

    let (brand, performance) = preset.split_once('/').ok_or_else(invalid)?;
    let brand: f64 = brand.trim().parse().map_err(|_| invalid())?;
    let performance: f64 = performance.trim().parse().map_err(|_| invalid())?;

    if !(0.0..=100.0).contains(&brand) || (brand + performance - 100.0).abs() > 1e-9 {
        return Err(PlannerError::InvalidParameter(format!(
            "split preset {:?} must be two shares summing to 100",
            preset
        )));
    }

    Ok(brand)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_labels_trimmed() {
        let labels = parse_period_labels(" 2024,2025-26 , 2026-27,").unwrap();
        assert_eq!(labels, vec!["2024", "2025-26", "2026-27"]);
    }

    #[test]
    fn test_period_labels_empty_rejected() {
        assert!(matches!(parse_period_labels(" , ,"), Err(PlannerError::InvalidParameter(_))));
    }

    #[test]
    fn test_spend_list() {
        let spend = parse_spend_list("32_000_000, 30000000,-5").unwrap();
        assert_eq!(spend, vec![32_000_000.0, 30_000_000.0, 0.0]);
    }

    #[test]
    fn test_spend_list_rejects_text() {
        let err = parse_spend_list("32000000,lots").unwrap_err();
        assert!(err.to_string().contains("lots"));
        assert!(parse_spend_list("inf").is_err());
    }

    #[test]
    fn test_split_presets() {
        assert_eq!(parse_split_preset("50/50").unwrap(), 50.0);
        assert_eq!(parse_split_preset("80 / 20").unwrap(), 80.0);
        assert!(parse_split_preset("80").is_err());
        assert!(parse_split_preset("70/40").is_err());
        assert!(parse_split_preset("a/b").is_err());
    }
}
