//! Running state carried from one period to the next

/// State of the projection between periods
///
/// Holds only what later periods are allowed to read: the previous period's
/// values and the upweight history for the lookback term.
#[derive(Debug, Clone, Default)]
pub struct ProjectionState {
    /// Index of the current period (0-based)
    pub period_index: usize,

    /// Media spend of the previous period
    pub prior_spend: Option<f64>,

    /// Brand effect of the previous period
    pub prior_brand_effect: f64,

    /// Cumulative total through the previous period
    pub cumulative_total: f64,

    /// Upweight of every period computed so far
    upweight_history: Vec<f64>,
}

impl ProjectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the next period; called before each period is calculated
    pub fn advance(&mut self) {
        if !self.upweight_history.is_empty() {
            self.period_index += 1;
        }
    }

    /// Record the current period's upweight
    pub fn record_upweight(&mut self, upweight: f64) {
        debug_assert_eq!(self.upweight_history.len(), self.period_index);
        self.upweight_history.push(upweight);
    }

    /// Upweight of the previous period (or the anchor when at period 0)
    pub fn prior_upweight(&self) -> f64 {
        let idx = self.period_index.saturating_sub(1);
        self.upweight_history.get(idx).copied().unwrap_or(0.0)
    }

    /// Upweight of period 0
    pub fn anchor_upweight(&self) -> f64 {
        self.upweight_history.first().copied().unwrap_or(0.0)
    }

    /// Upweight `lookback` periods back, clamped to period 0
    pub fn lookback_upweight(&self, lookback: usize) -> f64 {
        let idx = self.period_index.saturating_sub(lookback);
        self.upweight_history.get(idx).copied().unwrap_or(0.0)
    }

    /// Save this period's values for the next one
    pub fn close_period(&mut self, spend: f64, brand_effect: f64, cumulative_total: f64) {
        self.prior_spend = Some(spend);
        self.prior_brand_effect = brand_effect;
        self.cumulative_total = cumulative_total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_history(history: &[f64]) -> ProjectionState {
        let mut state = ProjectionState::new();
        for &u in history {
            state.advance();
            state.record_upweight(u);
        }
        state
    }

    #[test]
    fn test_lookback_clamps_to_first_period() {
        let state = state_with_history(&[10.0, 20.0]);
        assert_eq!(state.period_index, 1);
        assert_eq!(state.lookback_upweight(3), 10.0);
        assert_eq!(state.lookback_upweight(1), 10.0);
        assert_eq!(state.lookback_upweight(0), 20.0);
    }

    #[test]
    fn test_lookback_after_enough_history() {
        let state = state_with_history(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(state.period_index, 4);
        assert_eq!(state.lookback_upweight(3), 2.0);
        assert_eq!(state.prior_upweight(), 4.0);
        assert_eq!(state.anchor_upweight(), 1.0);
    }

    #[test]
    fn test_single_period_has_no_underflow() {
        let state = state_with_history(&[600_000.0]);
        assert_eq!(state.period_index, 0);
        assert_eq!(state.prior_upweight(), 600_000.0);
        assert_eq!(state.lookback_upweight(3), 600_000.0);
    }
}
