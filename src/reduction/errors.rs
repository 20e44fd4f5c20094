//! Error types for chord reduction
//!
//! Structural errors (malformed measures, missing time signatures) are
//! reported to the caller; `DurationDrift` is an internal error that
//! shouldn't occur in normal operation.

use thiserror::Error;

/// Top-level reduction error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReduceError {
    /// Events with non-positive duration, negative offset or overlaps
    #[error("Malformed measure {measure}: {reason}")]
    MalformedMeasure { measure: usize, reason: String },

    /// Reduced durations no longer add up to the measure (indicates a bug)
    #[error("Duration drift in measure {measure}: expected {expected}, got {actual}")]
    DurationDrift {
        measure: usize,
        expected: f64,
        actual: f64,
    },

    /// No time signature governs this measure
    #[error("No time signature in context for measure {measure}")]
    MissingTimeSignature { measure: usize },

    /// Configuration outside its allowed range
    #[error("Invalid reduction options: {0}")]
    InvalidOptions(String),

    #[error("Invalid pitch name: {0}")]
    InvalidPitch(String),

    #[error("Invalid time signature: {0}")]
    InvalidTimeSignature(String),

    /// JSON (de)serialization failure at the API boundary
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ReduceError {
    fn from(err: serde_json::Error) -> Self {
        ReduceError::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReduceError>;
