//! Tests for forward stepwise selection

use approx::assert_abs_diff_eq;

use super::*;
use crate::lm::lm;
use sk_core::data::{DataFrameBuilder, Series};

/// y is 2x plus a small disturbance; junk is an alternating column with no
/// real explanatory power on its own
fn one_signal_frame() -> DataFrame {
    DataFrameBuilder::new()
        .with_column("x", Series::float(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]))
        .unwrap()
        .with_column("junk", Series::float(vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0]))
        .unwrap()
        .with_column("y", Series::float(vec![2.2, 4.2, 5.8, 7.8, 9.8, 12.2]))
        .unwrap()
        .build()
        .unwrap()
}

/// y = 1 + 2a + 30b: b dominates the variance, a mops up the rest
fn two_signal_frame() -> DataFrame {
    let a = vec![1.0, 2.0, 3.0, 4.0, 1.0, 2.0, 3.0, 4.0];
    let b = vec![1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0];
    let y: Vec<f64> = a
        .iter()
        .zip(b.iter())
        .map(|(&a, &b)| 1.0 + 2.0 * a + 30.0 * b)
        .collect();

    DataFrameBuilder::new()
        .with_column("a", Series::float(a))
        .unwrap()
        .with_column("b", Series::float(b))
        .unwrap()
        .with_column("y", Series::float(y))
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn test_single_improving_candidate() {
    let df = one_signal_frame();

    let selection = forward_select(&df, "y", &["junk", "x"]).unwrap();

    // Only x improves the fit. junk loses the first round (its adjusted R²
    // alone is negative) and is discarded in the second: its marginal gain
    // does not cover the extra-parameter penalty.
    assert_eq!(selection.selected(), vec!["x"]);
    assert!(selection.final_adj_r_squared().unwrap() > 0.99);
}

#[test]
fn test_selection_order_and_steps() {
    let df = two_signal_frame();

    let selection = forward_select(&df, "y", &["a", "b"]).unwrap();

    // b explains more variance alone, so it is accepted first even though a
    // comes first in the candidate ordering
    assert_eq!(selection.selected(), vec!["b", "a"]);
    assert_eq!(selection.len(), 2);

    // Scores improve monotonically across steps
    assert!(selection.steps[1].adj_r_squared > selection.steps[0].adj_r_squared);
    assert_abs_diff_eq!(selection.steps[1].adj_r_squared, 1.0, epsilon = 1e-10);
}

#[test]
fn test_no_duplicates_and_subset() {
    let df = two_signal_frame();
    let candidates = ["a", "b"];

    let selection = forward_select(&df, "y", &candidates).unwrap();
    let selected = selection.selected();

    for name in &selected {
        assert!(candidates.contains(name));
    }

    let mut deduped = selected.clone();
    deduped.dedup();
    assert_eq!(deduped.len(), selected.len());
}

#[test]
fn test_final_score_matches_full_refit() {
    let df = two_signal_frame();

    let selection = forward_select(&df, "y", &["a", "b"]).unwrap();
    let refit = lm(&df, "y", &selection.selected()).unwrap();

    assert_abs_diff_eq!(
        selection.final_adj_r_squared().unwrap(),
        refit.adj_r_squared(),
        epsilon = 1e-12
    );
}

#[test]
fn test_tie_breaks_by_candidate_order() {
    // Twin columns hold identical values, so their single-predictor scores
    // tie bit-for-bit and the first candidate in the ordering wins the round.
    // The second round then aborts on the collinear leftover twin, which
    // reveals which one was accepted first.
    let values = vec![0.0, 1.0, 0.0, 2.0, 0.0];
    let df = DataFrameBuilder::new()
        .with_column("a", Series::float(values.clone()))
        .unwrap()
        .with_column("twin", Series::float(values))
        .unwrap()
        .with_column("y", Series::float(vec![1.0, 2.0, 1.0, 3.0, 1.0]))
        .unwrap()
        .build()
        .unwrap();

    match forward_select(&df, "y", &["a", "twin"]) {
        Err(SelectionError::CandidateFit { candidate, .. }) => assert_eq!(candidate, "twin"),
        other => panic!("expected CandidateFit, got {:?}", other.map(|_| ())),
    }

    match forward_select(&df, "y", &["twin", "a"]) {
        Err(SelectionError::CandidateFit { candidate, .. }) => assert_eq!(candidate, "a"),
        other => panic!("expected CandidateFit, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_initial_threshold() {
    // junk has exactly zero correlation with y, so its adjusted R² is negative
    let df = DataFrameBuilder::new()
        .with_column("junk", Series::float(vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0]))
        .unwrap()
        .with_column("y", Series::float(vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0]))
        .unwrap()
        .build()
        .unwrap();

    // Default threshold of 0.0 rejects it
    let selection = forward_select(&df, "y", &["junk"]).unwrap();
    assert!(selection.is_empty());
    assert!(selection.final_adj_r_squared().is_none());

    // An unconditional first acceptance takes it anyway
    let config = SelectionConfig {
        initial_threshold: f64::NEG_INFINITY,
    };
    let selection = forward_select_with(&df, "y", &["junk"], config).unwrap();
    assert_eq!(selection.selected(), vec!["junk"]);
    assert!(selection.final_adj_r_squared().unwrap() < 0.0);
}

#[test]
fn test_invalid_inputs() {
    let df = one_signal_frame();

    assert!(matches!(
        forward_select(&df, "y", &[]),
        Err(SelectionError::EmptyCandidates)
    ));

    assert!(matches!(
        forward_select(&df, "y", &["x", "y"]),
        Err(SelectionError::ResponseAmongCandidates(_))
    ));

    assert!(matches!(
        forward_select(&df, "y", &["x", "x"]),
        Err(SelectionError::DuplicateCandidate(_))
    ));

    assert!(matches!(
        forward_select(&df, "y", &["x", "nope"]),
        Err(SelectionError::UnknownColumn(_))
    ));
}

#[test]
fn test_missing_values_rejected() {
    let df = DataFrameBuilder::new()
        .with_column("x", Series::float(vec![1.0, f64::NAN, 3.0]))
        .unwrap()
        .with_column("y", Series::float(vec![1.0, 2.0, 3.0]))
        .unwrap()
        .build()
        .unwrap();

    assert!(matches!(
        forward_select(&df, "y", &["x"]),
        Err(SelectionError::MissingValues(ref column)) if column == "x"
    ));
}

#[test]
fn test_collinear_candidate_aborts_selection() {
    // x2 = 2·x1: each fits alone, but the pair is singular. The selection
    // aborts and names the candidate whose fit failed.
    let df = DataFrameBuilder::new()
        .with_column("x1", Series::float(vec![1.0, 2.0, 3.0, 4.0, 5.0]))
        .unwrap()
        .with_column("x2", Series::float(vec![2.0, 4.0, 6.0, 8.0, 10.0]))
        .unwrap()
        .with_column("y", Series::float(vec![1.0, 2.0, 3.0, 4.0, 5.0]))
        .unwrap()
        .build()
        .unwrap();

    let result = forward_select(&df, "y", &["x1", "x2"]);
    match result {
        Err(SelectionError::CandidateFit { candidate, source }) => {
            assert_eq!(candidate, "x2");
            assert!(matches!(source, ModelError::SingularDesign { .. }));
        }
        other => panic!("expected CandidateFit, got {:?}", other.map(|_| ())),
    }
}
