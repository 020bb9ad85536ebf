//! Human-readable model summaries

use std::fmt;

use serde::{Deserialize, Serialize};

use super::coefficient::Coefficient;
use super::statistics::{ModelStatistics, ResidualSummary};

/// Complete summary of a fitted linear model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Model formula, e.g. "imdb_rating ~ critics_score + genre"
    pub formula: String,
    /// Number of observations
    pub n_obs: usize,
    /// Coefficient table, intercept first
    pub coefficients: Vec<Coefficient>,
    /// Fit statistics
    pub statistics: ModelStatistics,
    /// Residual quartiles
    pub residuals: ResidualSummary,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Call: {}", self.formula)?;
        writeln!(f)?;

        writeln!(f, "Residuals:")?;
        writeln!(
            f,
            "{:>10} {:>10} {:>10} {:>10} {:>10}",
            "Min", "1Q", "Median", "3Q", "Max"
        )?;
        writeln!(
            f,
            "{:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            self.residuals.min,
            self.residuals.q1,
            self.residuals.median,
            self.residuals.q3,
            self.residuals.max
        )?;
        writeln!(f)?;

        writeln!(f, "Coefficients:")?;
        writeln!(
            f,
            "{:<24} {:>12} {:>12} {:>10} {:>12}",
            "Term", "Estimate", "Std. Error", "t value", "Pr(>|t|)"
        )?;
        for coefficient in &self.coefficients {
            writeln!(
                f,
                "{:<24} {:>12.6} {:>12.6} {:>10.4} {:>12.6}",
                coefficient.term,
                coefficient.estimate,
                coefficient.std_error,
                coefficient.t_value,
                coefficient.p_value
            )?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Residual standard error: {:.4} on {} degrees of freedom",
            self.statistics.residual_std_error, self.statistics.df_residual
        )?;
        writeln!(
            f,
            "Multiple R-squared: {:.4}, Adjusted R-squared: {:.4}",
            self.statistics.r_squared, self.statistics.adj_r_squared
        )?;

        if let (Some(f_stat), Some(f_p)) = (self.statistics.f_statistic, self.statistics.f_p_value)
        {
            writeln!(
                f,
                "F-statistic: {:.4} on {} and {} DF, p-value: {:.6}",
                f_stat, self.statistics.df_model, self.statistics.df_residual, f_p
            )?;
        }

        Ok(())
    }
}
