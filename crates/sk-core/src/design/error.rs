//! Design-specific error types

use crate::data::DataError;
use thiserror::Error;

/// Errors that can occur while specifying a model or building its design
#[derive(Debug, Error)]
pub enum DesignError {
    /// Variable not found in the DataFrame (or observation)
    #[error("variable '{variable}' not found; available: {available:?}")]
    VariableNotFound {
        variable: String,
        available: Vec<String>,
    },

    /// Variable has the wrong type for its role
    #[error("variable '{variable}' has type {actual}, expected {expected}")]
    TypeMismatch {
        variable: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Variable contains missing values
    #[error("variable '{variable}' contains missing values")]
    MissingValues { variable: String },

    /// Categorical value not among the levels seen at fit time
    #[error("unknown level '{level}' for variable '{variable}'; known levels: {known:?}")]
    UnknownLevel {
        variable: String,
        level: String,
        known: Vec<String>,
    },

    /// The response also appears among the predictors
    #[error("response '{variable}' also appears among the predictors")]
    ResponseReused { variable: String },

    /// A predictor is listed more than once
    #[error("duplicate predictor '{variable}'")]
    DuplicatePredictor { variable: String },

    /// Data-related errors that bubble up from the data layer
    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Result type alias for design operations
pub type DesignResult<T> = std::result::Result<T, DesignError>;
