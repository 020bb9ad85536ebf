//! Forward stepwise predictor selection
//!
//! Grows a predictor set one variable per round, each round refitting every
//! remaining candidate alongside the already-accepted predictors and keeping
//! the one with the highest adjusted R². Selection stops when no candidate
//! strictly beats the running best score.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::ModelError;
use crate::lm::LinearModel;
use sk_core::data::DataFrame;

/// Forward-selection configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Score the first accepted predictor must strictly exceed.
    ///
    /// The default of 0.0 requires a positive adjusted R² from the very first
    /// predictor; use `f64::NEG_INFINITY` to make the first acceptance
    /// unconditional.
    pub initial_threshold: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            initial_threshold: 0.0,
        }
    }
}

/// One accepted predictor and the adjusted R² achieved with it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionStep {
    pub predictor: String,
    pub adj_r_squared: f64,
}

/// Result of a forward-selection run: accepted steps in acceptance order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForwardSelection {
    pub steps: Vec<SelectionStep>,
}

impl ForwardSelection {
    /// Accepted predictor names, in acceptance order
    pub fn selected(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.predictor.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Adjusted R² at the final accepted step
    pub fn final_adj_r_squared(&self) -> Option<f64> {
        self.steps.last().map(|step| step.adj_r_squared)
    }
}

/// Errors raised by forward selection
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("candidate set is empty")]
    EmptyCandidates,

    #[error("response '{0}' also appears among the candidates")]
    ResponseAmongCandidates(String),

    #[error("duplicate candidate '{0}'")]
    DuplicateCandidate(String),

    #[error("column '{0}' not found in the data")]
    UnknownColumn(String),

    #[error("column '{0}' contains missing values")]
    MissingValues(String),

    /// A candidate's fit failed; the whole selection aborts rather than
    /// skipping the candidate, since a fit failure signals a structural
    /// problem with the candidate set.
    #[error("fit failed for candidate '{candidate}': {source}")]
    CandidateFit {
        candidate: String,
        #[source]
        source: ModelError,
    },
}

/// Forward selection with the default configuration
pub fn forward_select(
    df: &DataFrame,
    response: &str,
    candidates: &[&str],
) -> Result<ForwardSelection, SelectionError> {
    forward_select_with(df, response, candidates, SelectionConfig::default())
}

/// Forward selection with an explicit configuration
pub fn forward_select_with(
    df: &DataFrame,
    response: &str,
    candidates: &[&str],
    config: SelectionConfig,
) -> Result<ForwardSelection, SelectionError> {
    validate(df, response, candidates)?;

    let mut selected: Vec<String> = Vec::new();
    let mut remaining: Vec<String> = candidates.iter().map(|s| s.to_string()).collect();
    let mut steps: Vec<SelectionStep> = Vec::new();
    let mut best = config.initial_threshold;
    let mut round = 0usize;

    while !remaining.is_empty() {
        round += 1;

        // Stable argmax over the remaining candidates: ties go to the first
        // candidate in the given ordering.
        let mut round_best_idx = 0usize;
        let mut round_best_score = f64::NEG_INFINITY;

        for (i, candidate) in remaining.iter().enumerate() {
            let mut predictors: Vec<&str> = selected.iter().map(String::as_str).collect();
            predictors.push(candidate);

            let model = LinearModel::new(response, &predictors)
                .and_then(|model| model.fit(df))
                .map_err(|source| SelectionError::CandidateFit {
                    candidate: candidate.clone(),
                    source,
                })?;

            let score = model.adj_r_squared();
            if score > round_best_score {
                round_best_idx = i;
                round_best_score = score;
            }
        }

        if !(round_best_score > best) {
            debug!(
                round,
                best_score = round_best_score,
                threshold = best,
                "no candidate improves adjusted R²; stopping"
            );
            break;
        }

        let winner = remaining.remove(round_best_idx);
        debug!(
            round,
            predictor = %winner,
            adj_r_squared = round_best_score,
            "accepted predictor"
        );

        best = round_best_score;
        steps.push(SelectionStep {
            predictor: winner.clone(),
            adj_r_squared: round_best_score,
        });
        selected.push(winner);
    }

    Ok(ForwardSelection { steps })
}

fn validate(df: &DataFrame, response: &str, candidates: &[&str]) -> Result<(), SelectionError> {
    if candidates.is_empty() {
        return Err(SelectionError::EmptyCandidates);
    }

    let mut seen: Vec<&str> = Vec::with_capacity(candidates.len());
    for &candidate in candidates {
        if candidate == response {
            return Err(SelectionError::ResponseAmongCandidates(response.to_string()));
        }
        if seen.contains(&candidate) {
            return Err(SelectionError::DuplicateCandidate(candidate.to_string()));
        }
        seen.push(candidate);
    }

    for name in std::iter::once(response).chain(candidates.iter().copied()) {
        let series = df
            .get_column(name)
            .ok_or_else(|| SelectionError::UnknownColumn(name.to_string()))?;

        if series.has_missing() {
            return Err(SelectionError::MissingValues(name.to_string()));
        }
    }

    Ok(())
}
