//! Goodness-of-fit and residual summaries

use serde::{Deserialize, Serialize};

use sk_core::data::Vector;

/// Model-level fit statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModelStatistics {
    /// R-squared
    pub r_squared: f64,
    /// Adjusted R-squared
    pub adj_r_squared: f64,
    /// Residual standard error
    pub residual_std_error: f64,
    /// F statistic; absent for intercept-only models
    pub f_statistic: Option<f64>,
    /// F statistic p-value
    pub f_p_value: Option<f64>,
    /// Residual degrees of freedom (n - p)
    pub df_residual: usize,
    /// Model degrees of freedom (slopes, excluding intercept)
    pub df_model: usize,
}

/// Five-number summary of the residuals
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResidualSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl ResidualSummary {
    pub fn from_residuals(residuals: &Vector) -> Self {
        Self {
            min: residuals.iter().fold(f64::INFINITY, |a, &b| a.min(b)),
            q1: quantile(residuals, 0.25),
            median: quantile(residuals, 0.5),
            q3: quantile(residuals, 0.75),
            max: residuals.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)),
        }
    }
}

fn quantile(data: &Vector, q: f64) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }

    let mut sorted: Vec<f64> = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let index = (sorted.len() as f64 - 1.0) * q;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let weight = index - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}
