//! Model-related error types

use thiserror::Error;

use sk_core::data::DataError;
use sk_core::design::DesignError;

/// Model-related errors
#[derive(Debug, Error)]
pub enum ModelError {
    /// Design specification or encoding error
    #[error("design error: {0}")]
    Design(#[from] DesignError),

    /// Data-related error
    #[error("data error: {0}")]
    Data(#[from] DataError),

    /// Insufficient data for model fitting
    #[error("not enough data: {n_samples} observations for {n_parameters} parameters")]
    InsufficientData {
        n_samples: usize,
        n_parameters: usize,
    },

    /// The design matrix is rank-deficient, typically from collinear or
    /// constant predictors
    #[error("singular design matrix: {message}")]
    SingularDesign { message: String },

    /// Numerical computation error
    #[error("numerical error in {operation}: {message}")]
    Numerical { operation: String, message: String },
}
