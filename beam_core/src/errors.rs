//! # Error Types
//!
//! Structured error types for beam_core. Every variant carries enough context
//! for a caller to render a useful message or branch on the failure
//! programmatically. No error is recovered inside the solver: each one ends
//! the current `analyze` or `combine` call.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::errors::{CalcError, CalcResult};
//!
//! fn check_span(span_m: f64) -> CalcResult<()> {
//!     if span_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "span_m",
//!             span_m.to_string(),
//!             "Span must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_span(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for beam_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Best available pivot fell below the singularity threshold during
    /// elimination. Usually means the supports leave a rigid-body mode free.
    #[error("Singular stiffness system at pivot {pivot_index} (|pivot| = {pivot_magnitude:e}) - check supports and inputs")]
    SingularSystem {
        pivot_index: usize,
        pivot_magnitude: f64,
    },

    /// Case results were sampled on different grids and cannot be superposed
    #[error("Incompatible sampling for load case '{case_id}': {reason}")]
    IncompatibleSampling { case_id: String, reason: String },

    /// A combination was requested with no case results
    #[error("No load case results to combine for combination '{combo_id}'")]
    EmptyCaseSet { combo_id: String },

    /// An input value is invalid (out of range, inconsistent geometry, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A combination references a load case the project does not define
    #[error("Load combination '{combo_id}' references unknown load case '{case_id}'")]
    UnknownLoadCase { combo_id: String, case_id: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create a SingularSystem error
    pub fn singular_system(pivot_index: usize, pivot_magnitude: f64) -> Self {
        CalcError::SingularSystem {
            pivot_index,
            pivot_magnitude,
        }
    }

    /// Create an IncompatibleSampling error
    pub fn incompatible_sampling(case_id: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::IncompatibleSampling {
            case_id: case_id.into(),
            reason: reason.into(),
        }
    }

    /// Create an EmptyCaseSet error
    pub fn empty_case_set(combo_id: impl Into<String>) -> Self {
        CalcError::EmptyCaseSet {
            combo_id: combo_id.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownLoadCase error
    pub fn unknown_load_case(combo_id: impl Into<String>, case_id: impl Into<String>) -> Self {
        CalcError::UnknownLoadCase {
            combo_id: combo_id.into(),
            case_id: case_id.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came out of the numerical pipeline itself
    /// (as opposed to input validation or file handling)
    pub fn is_analysis_failure(&self) -> bool {
        matches!(
            self,
            CalcError::SingularSystem { .. }
                | CalcError::IncompatibleSampling { .. }
                | CalcError::EmptyCaseSet { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::SingularSystem { .. } => "SINGULAR_SYSTEM",
            CalcError::IncompatibleSampling { .. } => "INCOMPATIBLE_SAMPLING",
            CalcError::EmptyCaseSet { .. } => "EMPTY_CASE_SET",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownLoadCase { .. } => "UNKNOWN_LOAD_CASE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Reject zero, negative and NaN values for a named field
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    // Also rejects NaN
    if !(value > 0.0) {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be positive",
        ));
    }
    Ok(())
}
