//! Statistical models for StatKit
//!
//! Ordinary least-squares regression with categorical predictors and
//! prediction intervals, greedy forward predictor selection by adjusted R²,
//! and the chi-square test of independence.

pub mod base;
pub mod contingency;
pub mod error;
pub mod lm;
pub mod stepwise;

pub use base::{Coefficient, ModelStatistics, ModelSummary, ResidualSummary};
pub use contingency::{chi_square_test, ChiSquareTest, ContingencyTable, TestError};
pub use error::ModelError;
pub use lm::{lm, FitConfig, FittedLinearModel, IntervalType, LinearModel, Prediction};
pub use stepwise::{
    forward_select, forward_select_with, ForwardSelection, SelectionConfig, SelectionError,
    SelectionStep,
};
