// src/error.rs

use thiserror::Error;

/// Errors raised by the planner and its data boundary.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid delivery frequency: {value} (expected 2..=5)")]
    InvalidFrequency { value: i64 },

    #[error("Cannot compute the frequency mix of an empty ledger")]
    EmptyLedger,

    #[error("Store index {index} out of range for a ledger of {len} stores")]
    StoreIndexOutOfRange { index: usize, len: usize },

    #[error("Unknown store code: {code}")]
    UnknownStore { code: String },

    #[error("No target mix for planning year {year}")]
    UnknownPlanningYear { year: String },

    #[error("Constraint {field} = {value} is outside {min}..={max}")]
    ConstraintOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid store record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
