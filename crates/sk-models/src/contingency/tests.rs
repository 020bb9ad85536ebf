//! Tests for the chi-square independence test

use approx::assert_abs_diff_eq;

use super::*;
use sk_core::data::{DataFrameBuilder, Series};

#[test]
fn test_two_by_two_example() {
    let table = ContingencyTable::from_counts(&[vec![10, 20], vec![30, 40]]).unwrap();
    let test = chi_square_test(&table).unwrap();

    // Margins 30/70 and 40/60 over a total of 100
    assert_abs_diff_eq!(test.expected[(0, 0)], 12.0, epsilon = 1e-12);
    assert_abs_diff_eq!(test.expected[(0, 1)], 18.0, epsilon = 1e-12);
    assert_abs_diff_eq!(test.expected[(1, 0)], 28.0, epsilon = 1e-12);
    assert_abs_diff_eq!(test.expected[(1, 1)], 42.0, epsilon = 1e-12);

    // Σ (obs − exp)² / exp = 4/12 + 4/18 + 4/28 + 4/42
    let statistic = 4.0 / 12.0 + 4.0 / 18.0 + 4.0 / 28.0 + 4.0 / 42.0;
    assert_abs_diff_eq!(test.statistic, statistic, epsilon = 1e-12);

    assert_eq!(test.df, 1);
    assert!(test.p_value > 0.0 && test.p_value < 1.0);
}

#[test]
fn test_statistic_zero_iff_independent() {
    // Rows are exact multiples of each other: observed == expected
    let table = ContingencyTable::from_counts(&[vec![10, 20], vec![30, 60]]).unwrap();
    let test = chi_square_test(&table).unwrap();

    assert_abs_diff_eq!(test.statistic, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(test.p_value, 1.0, epsilon = 1e-12);

    for i in 0..2 {
        for j in 0..2 {
            assert_abs_diff_eq!(
                test.expected[(i, j)],
                table.counts()[(i, j)],
                epsilon = 1e-12
            );
        }
    }
}

#[test]
fn test_statistic_non_negative() {
    let tables = [
        vec![vec![1, 2], vec![3, 4]],
        vec![vec![5, 5], vec![5, 5]],
        vec![vec![10, 1], vec![1, 10]],
        vec![vec![7, 2, 9], vec![4, 8, 3]],
    ];

    for counts in &tables {
        let table = ContingencyTable::from_counts(counts).unwrap();
        let test = chi_square_test(&table).unwrap();
        assert!(test.statistic >= 0.0);
        assert!((0.0..=1.0).contains(&test.p_value));
    }
}

#[test]
fn test_p_value_decreases_with_statistic() {
    // Same margins structure, increasing departure from independence
    let mild = ContingencyTable::from_counts(&[vec![26, 24], vec![24, 26]]).unwrap();
    let strong = ContingencyTable::from_counts(&[vec![40, 10], vec![10, 40]]).unwrap();

    let mild = chi_square_test(&mild).unwrap();
    let strong = chi_square_test(&strong).unwrap();

    assert_eq!(mild.df, strong.df);
    assert!(strong.statistic > mild.statistic);
    assert!(strong.p_value < mild.p_value);
}

#[test]
fn test_degenerate_tables() {
    // A single row cannot be tested
    let flat = ContingencyTable::from_counts(&[vec![10, 20]]).unwrap();
    assert!(matches!(
        chi_square_test(&flat),
        Err(TestError::DegenerateDimensions { nrows: 1, ncols: 2 })
    ));

    // A single column cannot be tested
    let thin = ContingencyTable::from_counts(&[vec![10], vec![20]]).unwrap();
    assert!(matches!(
        chi_square_test(&thin),
        Err(TestError::DegenerateDimensions { nrows: 2, ncols: 1 })
    ));

    // A zero row forces zero expected counts
    let zero_row = ContingencyTable::from_counts(&[vec![0, 0], vec![1, 2]]).unwrap();
    assert!(matches!(
        chi_square_test(&zero_row),
        Err(TestError::ZeroExpectedCell { row: 0, .. })
    ));

    // An all-zero table has no observations at all
    let empty = ContingencyTable::from_counts(&[vec![0, 0], vec![0, 0]]).unwrap();
    assert!(matches!(
        chi_square_test(&empty),
        Err(TestError::ZeroExpectedCell { .. })
    ));
}

#[test]
fn test_ragged_counts_rejected() {
    let result = ContingencyTable::from_counts(&[vec![1, 2, 3], vec![4, 5]]);
    assert!(matches!(result, Err(TestError::Data(_))));
}

#[test]
fn test_crosstab() {
    let df = DataFrameBuilder::new()
        .with_column(
            "device",
            Series::categorical(&["phone", "laptop", "phone", "phone", "laptop", "laptop"]),
        )
        .unwrap()
        .with_column(
            "satisfied",
            Series::str(vec![
                "yes".to_string(),
                "no".to_string(),
                "yes".to_string(),
                "no".to_string(),
                "yes".to_string(),
                "no".to_string(),
            ]),
        )
        .unwrap()
        .build()
        .unwrap();

    let table = ContingencyTable::crosstab(&df, "device", "satisfied").unwrap();

    assert_eq!(table.shape(), (2, 2));
    assert_eq!(table.row_labels(), &["laptop", "phone"]);
    assert_eq!(table.col_labels(), &["no", "yes"]);

    // laptop: 2 no, 1 yes; phone: 1 no, 2 yes
    assert_eq!(table.counts()[(0, 0)], 2.0);
    assert_eq!(table.counts()[(0, 1)], 1.0);
    assert_eq!(table.counts()[(1, 0)], 1.0);
    assert_eq!(table.counts()[(1, 1)], 2.0);

    let test = chi_square_test(&table).unwrap();
    assert_eq!(test.df, 1);
}

#[test]
fn test_crosstab_type_errors() {
    let df = DataFrameBuilder::new()
        .with_column("num", Series::float(vec![1.0, 2.0]))
        .unwrap()
        .with_column("cat", Series::categorical(&["a", "b"]))
        .unwrap()
        .build()
        .unwrap();

    assert!(matches!(
        ContingencyTable::crosstab(&df, "num", "cat"),
        Err(TestError::NotCategorical { .. })
    ));

    assert!(matches!(
        ContingencyTable::crosstab(&df, "missing", "cat"),
        Err(TestError::Data(_))
    ));
}
