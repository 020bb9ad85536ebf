//! Interval estimation for single-observation prediction

use serde::{Deserialize, Serialize};

/// Type of interval to compute for a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntervalType {
    /// Confidence interval for the mean response E[Y|X=x₀].
    /// Narrower - only accounts for uncertainty in coefficient estimates.
    Confidence,

    /// Prediction interval for a new observation Y|X=x₀.
    /// Wider - also accounts for residual variance.
    #[default]
    Prediction,
}

/// A point prediction with its interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Prediction {
    /// Point estimate
    pub fit: f64,
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
    /// Standard error of the prediction
    pub se: f64,
}

impl Prediction {
    /// Interval width
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}
