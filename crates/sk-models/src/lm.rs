//! Ordinary least-squares linear models
//!
//! Models are specified by a response name and an ordered predictor list;
//! categorical predictors expand into indicator columns against their
//! reference level. A fitted model is immutable and supports prediction on
//! single observations with confidence or prediction intervals.

pub mod ols;
pub mod prediction;


// Re-exports
pub use ols::{FittedLinearModel, LinearModel};
pub use prediction::{IntervalType, Prediction};

use serde::{Deserialize, Serialize};

use crate::base::Result;
use sk_core::data::DataFrame;

/// Linear model configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FitConfig {
    /// Confidence level for coefficient and prediction intervals
    pub confidence_level: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
        }
    }
}

/// Convenience function for OLS regression
pub fn lm(df: &DataFrame, response: &str, predictors: &[&str]) -> Result<FittedLinearModel> {
    LinearModel::new(response, predictors)?.fit(df)
}
