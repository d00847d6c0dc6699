//! Media Spend Planner - what-if projection calculators for media spend
//!
//! This library provides:
//! - Period-by-period impact projections (compounding, spend-scaled, classic)
//! - Slider-style input resolution with range clamping
//! - Reference period tables loaded from CSV
//! - Display tables and chart series for external rendering
//! - Cumulative reach curves with a diminishing-returns marker
//! - Batch and sweep runs over many parameter sets

pub mod error;
pub mod params;
pub mod projection;
pub mod reach;
pub mod reference;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{PlannerError, Result};
pub use params::{Parameters, RawInputs};
pub use projection::{PeriodRow, ProjectionConfig, ProjectionEngine, ProjectionTable};
pub use reach::ReachCurve;
pub use reference::ReferenceTable;
pub use scenario::ScenarioRunner;
