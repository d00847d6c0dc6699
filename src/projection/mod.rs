//! Projection engine for period-by-period media impact tables

mod state;
mod engine;
mod rows;

pub use engine::{
    align_spend, CumulativeSeed, ProjectionConfig, ProjectionEngine, ProjectionVariant,
    CLASSIC_BASE_SHARE, DEFAULT_CUMULATIVE_SEED, DEFAULT_LOOKBACK_PERIODS, DEFAULT_MEDIA_SPEND,
    DEFAULT_PERFORMANCE_WEIGHT, DEFAULT_UPWEIGHT_ANCHOR, SPEND_SCALED_UPWEIGHT_ANCHOR,
};
pub use rows::{Alignment, PeriodRow, ProjectionSummary, ProjectionTable};
