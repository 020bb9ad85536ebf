//! Coefficient estimates

use serde::{Deserialize, Serialize};

/// A single coefficient estimate with its inference statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coefficient {
    /// Design-matrix column name ("(Intercept)", "runtime", "genre[Drama]", ...)
    pub term: String,
    /// Point estimate
    pub estimate: f64,
    /// Standard error
    pub std_error: f64,
    /// t statistic
    pub t_value: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Lower bound of the confidence interval
    pub ci_lower: f64,
    /// Upper bound of the confidence interval
    pub ci_upper: f64,
}

impl Coefficient {
    /// Whether this is the intercept term
    pub fn is_intercept(&self) -> bool {
        self.term == sk_core::design::INTERCEPT
    }
}
