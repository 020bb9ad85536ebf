//! Ordinary Least Squares (OLS) fitting
//!
//! Coefficients are estimated by SVD least squares; the SVD rank doubles as
//! the singularity check, so a collinear design fails instead of silently
//! producing a degenerate solution.

use ndarray_linalg::{Inverse, LeastSquaresSvd};
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};
use tracing::debug;

use crate::base::{
    Coefficient, ModelError, ModelStatistics, ModelSummary, ResidualSummary, Result,
};
use crate::lm::prediction::{IntervalType, Prediction};
use crate::lm::FitConfig;
use sk_core::data::{DataFrame, Matrix, Vector};
use sk_core::design::{encode_observation, Design, ModelSpec, Observation, TermEncoding};

/// An unfitted OLS model specification
#[derive(Debug, Clone)]
pub struct LinearModel {
    spec: ModelSpec,
    config: FitConfig,
}

impl LinearModel {
    /// Create a linear model for `response` on the given predictors
    pub fn new(response: &str, predictors: &[&str]) -> Result<Self> {
        Ok(Self {
            spec: ModelSpec::new(response, predictors)?,
            config: FitConfig::default(),
        })
    }

    /// Create a linear model from an existing specification
    pub fn from_spec(spec: ModelSpec) -> Self {
        Self {
            spec,
            config: FitConfig::default(),
        }
    }

    /// Set configuration
    pub fn config(mut self, config: FitConfig) -> Self {
        self.config = config;
        self
    }

    /// Fit the model by ordinary least squares
    pub fn fit(&self, df: &DataFrame) -> Result<FittedLinearModel> {
        let Design {
            matrix: x,
            response: y,
            column_names,
            terms,
        } = self.spec.design(df)?;

        let n = x.nrows();
        let p = x.ncols();

        if n <= p {
            return Err(ModelError::InsufficientData {
                n_samples: n,
                n_parameters: p,
            });
        }

        let solved = x.least_squares(&y).map_err(|e| ModelError::Numerical {
            operation: "least_squares".to_string(),
            message: e.to_string(),
        })?;

        if (solved.rank as usize) < p {
            return Err(ModelError::SingularDesign {
                message: format!("design matrix has rank {} for {} columns", solved.rank, p),
            });
        }

        let coefficients = solved.solution;

        // (X'X)^{-1}, needed for standard errors and interval prediction
        let xtx = x.t().dot(&x);
        let xtx_inv = xtx.inv().map_err(|e| ModelError::SingularDesign {
            message: e.to_string(),
        })?;

        let fitted_values = x.dot(&coefficients);
        let residuals = &y - &fitted_values;

        let rss = residuals.mapv(|r| r * r).sum();
        let y_bar = y.mean().unwrap_or(0.0);
        let tss = y.iter().map(|&v| (v - y_bar).powi(2)).sum::<f64>();

        let r_squared = 1.0 - rss / tss;
        let adj_r_squared =
            1.0 - (1.0 - r_squared) * ((n as f64 - 1.0) / (n as f64 - p as f64));
        let residual_std_error = (rss / (n as f64 - p as f64)).sqrt();

        // Standard errors = sqrt(diag(σ² (X'X)^{-1}))
        let sigma2 = rss / (n as f64 - p as f64);
        let standard_errors = xtx_inv.diag().mapv(|v| (v * sigma2).sqrt().max(1e-12));

        let df_residual = n - p;
        let t_dist = StudentsT::new(0.0, 1.0, df_residual as f64).map_err(|e| {
            ModelError::Numerical {
                operation: "t_distribution".to_string(),
                message: e.to_string(),
            }
        })?;

        let t_values: Vector = coefficients
            .iter()
            .zip(standard_errors.iter())
            .map(|(&coefficient, &se)| coefficient / se)
            .collect();

        let p_values: Vector = t_values
            .iter()
            .map(|&t| (2.0 * (1.0 - t_dist.cdf(t.abs()))).clamp(0.0, 1.0))
            .collect();

        let alpha = 1.0 - self.config.confidence_level;
        let t_critical = t_dist.inverse_cdf(1.0 - alpha / 2.0);

        let ci_lower: Vector = coefficients
            .iter()
            .zip(standard_errors.iter())
            .map(|(&coefficient, &se)| coefficient - t_critical * se)
            .collect();
        let ci_upper: Vector = coefficients
            .iter()
            .zip(standard_errors.iter())
            .map(|(&coefficient, &se)| coefficient + t_critical * se)
            .collect();

        let (f_statistic, f_p_value) = if p > 1 {
            let (f_stat, f_p) = f_statistic(rss, tss, n, p)?;
            (Some(f_stat), Some(f_p))
        } else {
            (None, None)
        };

        let statistics = ModelStatistics {
            r_squared,
            adj_r_squared,
            residual_std_error,
            f_statistic,
            f_p_value,
            df_residual,
            df_model: p - 1,
        };

        debug!(
            formula = %self.spec,
            n,
            p,
            r_squared,
            adj_r_squared,
            "fitted linear model"
        );

        Ok(FittedLinearModel {
            spec: self.spec.clone(),
            config: self.config,
            terms,
            column_names,
            coefficients,
            standard_errors,
            t_values,
            p_values,
            ci_lower,
            ci_upper,
            fitted_values,
            residuals,
            xtx_inv,
            statistics,
        })
    }
}

/// Compute the overall F statistic and its p-value
fn f_statistic(rss: f64, tss: f64, n: usize, p: usize) -> Result<(f64, f64)> {
    let df_model = (p - 1) as f64;
    let df_residual = (n - p) as f64;
    let ess = tss - rss;

    let f_stat = (ess / df_model) / (rss / df_residual);

    let f_dist = FisherSnedecor::new(df_model, df_residual).map_err(|e| ModelError::Numerical {
        operation: "f_distribution".to_string(),
        message: e.to_string(),
    })?;

    Ok((f_stat, (1.0 - f_dist.cdf(f_stat)).clamp(0.0, 1.0)))
}

/// A fitted OLS model; immutable once created
#[derive(Debug, Clone)]
pub struct FittedLinearModel {
    spec: ModelSpec,
    config: FitConfig,
    terms: Vec<TermEncoding>,
    column_names: Vec<String>,
    coefficients: Vector,
    standard_errors: Vector,
    t_values: Vector,
    p_values: Vector,
    ci_lower: Vector,
    ci_upper: Vector,
    fitted_values: Vector,
    residuals: Vector,
    xtx_inv: Matrix,
    statistics: ModelStatistics,
}

impl FittedLinearModel {
    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    /// Coefficient vector, intercept first
    pub fn coefficients(&self) -> &Vector {
        &self.coefficients
    }

    /// One name per coefficient
    pub fn coefficient_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn standard_errors(&self) -> &Vector {
        &self.standard_errors
    }

    pub fn fitted_values(&self) -> &Vector {
        &self.fitted_values
    }

    pub fn residuals(&self) -> &Vector {
        &self.residuals
    }

    pub fn r_squared(&self) -> f64 {
        self.statistics.r_squared
    }

    pub fn adj_r_squared(&self) -> f64 {
        self.statistics.adj_r_squared
    }

    pub fn statistics(&self) -> &ModelStatistics {
        &self.statistics
    }

    /// Number of observations used in the fit
    pub fn n_obs(&self) -> usize {
        self.fitted_values.len()
    }

    /// Coefficient table with inference statistics
    pub fn to_coefficients(&self) -> Vec<Coefficient> {
        self.column_names
            .iter()
            .enumerate()
            .map(|(i, term)| Coefficient {
                term: term.clone(),
                estimate: self.coefficients[i],
                std_error: self.standard_errors[i],
                t_value: self.t_values[i],
                p_value: self.p_values[i],
                ci_lower: self.ci_lower[i],
                ci_upper: self.ci_upper[i],
            })
            .collect()
    }

    /// Full model summary
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            formula: self.spec.to_string(),
            n_obs: self.n_obs(),
            coefficients: self.to_coefficients(),
            statistics: self.statistics,
            residuals: ResidualSummary::from_residuals(&self.residuals),
        }
    }

    /// Predict a single new observation with a prediction interval at the
    /// model's configured confidence level
    pub fn predict(&self, obs: &Observation) -> Result<Prediction> {
        self.predict_with_interval(obs, IntervalType::Prediction, self.config.confidence_level)
    }

    /// Predict with an explicit interval type and confidence level
    pub fn predict_with_interval(
        &self,
        obs: &Observation,
        interval: IntervalType,
        level: f64,
    ) -> Result<Prediction> {
        let x0 = encode_observation(&self.terms, obs)?;
        let fit = x0.dot(&self.coefficients);

        // x₀'(X'X)⁻¹x₀: leverage of the new point
        let h = x0.dot(&self.xtx_inv.dot(&x0));
        let sigma = self.statistics.residual_std_error;

        let se = match interval {
            IntervalType::Confidence => sigma * h.sqrt(),
            IntervalType::Prediction => sigma * (1.0 + h).sqrt(),
        };

        let t_dist = StudentsT::new(0.0, 1.0, self.statistics.df_residual as f64).map_err(|e| {
            ModelError::Numerical {
                operation: "t_distribution".to_string(),
                message: e.to_string(),
            }
        })?;
        let t_critical = t_dist.inverse_cdf(1.0 - (1.0 - level) / 2.0);

        Ok(Prediction {
            fit,
            lower: fit - t_critical * se,
            upper: fit + t_critical * se,
            se,
        })
    }
}
