//! Error types for trial-design input.
//!
//! These are contract violations by the caller. Business-rule findings are
//! reported as [`crate::Issue`] values instead.

use thiserror::Error;

/// Errors raised when an endpoint record is structurally incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// A required field is absent or blank.
    #[error("endpoint record is missing required field `{field}`")]
    MissingField { field: &'static str },

    /// The data type text names none of the supported data types.
    #[error("endpoint '{endpoint}' has unrecognized data type '{value}'")]
    UnknownDataType { endpoint: String, value: String },
}

/// Result type for model construction.
pub type Result<T> = std::result::Result<T, ModelError>;
