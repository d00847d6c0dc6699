//! Error types for the planner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Projection needs at least one period")]
    NoPeriods,

    #[error("Reference data error: {0}")]
    ReferenceData(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
