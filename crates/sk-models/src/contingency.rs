//! Chi-square test of independence on contingency tables

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use ndarray::Array2;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use thiserror::Error;

use sk_core::data::{DataError, DataFrame, Matrix, Series, SeriesValue};

/// Errors raised by contingency-table construction and testing
#[derive(Debug, Error)]
pub enum TestError {
    /// The test needs at least two levels per variable
    #[error("contingency table must be at least 2×2, got {nrows}×{ncols}")]
    DegenerateDimensions { nrows: usize, ncols: usize },

    /// An expected count of zero makes the statistic undefined
    #[error("expected count is zero in cell ({row}, {col})")]
    ZeroExpectedCell { row: usize, col: usize },

    /// Crosstab requires categorical or string columns
    #[error("column '{column}' has type {actual}, expected categorical or string")]
    NotCategorical {
        column: String,
        actual: &'static str,
    },

    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("numerical error: {0}")]
    Numerical(String),
}

/// A two-dimensional table of observed counts
#[derive(Debug, Clone)]
pub struct ContingencyTable {
    counts: Matrix,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
}

impl ContingencyTable {
    /// Build a table from raw counts; rows must be of equal length
    pub fn from_counts(counts: &[Vec<u64>]) -> Result<Self, TestError> {
        let nrows = counts.len();
        let ncols = counts.first().map(|row| row.len()).unwrap_or(0);

        for row in counts {
            if row.len() != ncols {
                return Err(TestError::Data(DataError::DimensionMismatch {
                    expected: format!("{} columns per row", ncols),
                    actual: format!("{} columns", row.len()),
                }));
            }
        }

        let mut matrix = Array2::zeros((nrows, ncols));
        for (i, row) in counts.iter().enumerate() {
            for (j, &count) in row.iter().enumerate() {
                matrix[(i, j)] = count as f64;
            }
        }

        Ok(Self {
            counts: matrix,
            row_labels: (0..nrows).map(|i| i.to_string()).collect(),
            col_labels: (0..ncols).map(|j| j.to_string()).collect(),
        })
    }

    /// Cross-tabulate two categorical (or string) columns of a frame
    pub fn crosstab(df: &DataFrame, rows: &str, cols: &str) -> Result<Self, TestError> {
        let row_series = df
            .get_column(rows)
            .ok_or_else(|| DataError::ColumnNotFound(rows.to_string()))?;
        let col_series = df
            .get_column(cols)
            .ok_or_else(|| DataError::ColumnNotFound(cols.to_string()))?;

        let row_labels = level_order(row_series, rows)?;
        let col_labels = level_order(col_series, cols)?;

        let mut counts = Array2::zeros((row_labels.len(), col_labels.len()));

        for idx in 0..df.nrows() {
            let (Some(SeriesValue::Str(row_label)), Some(SeriesValue::Str(col_label))) =
                (row_series.get(idx), col_series.get(idx))
            else {
                continue;
            };

            let i = row_labels.iter().position(|label| *label == row_label);
            let j = col_labels.iter().position(|label| *label == col_label);

            if let (Some(i), Some(j)) = (i, j) {
                counts[(i, j)] += 1.0;
            }
        }

        Ok(Self {
            counts,
            row_labels,
            col_labels,
        })
    }

    pub fn counts(&self) -> &Matrix {
        &self.counts
    }

    pub fn shape(&self) -> (usize, usize) {
        self.counts.dim()
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }
}

/// Level order for crosstab axes: declared order for categorical columns,
/// sorted unique values for string columns
fn level_order(series: &Series, column: &str) -> Result<Vec<String>, TestError> {
    match series {
        Series::Categorical(_, levels) => Ok(levels.clone()),
        Series::Str(values) => Ok(values
            .iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()),
        other => Err(TestError::NotCategorical {
            column: column.to_string(),
            actual: other.dtype(),
        }),
    }
}

/// Result of a chi-square independence test
#[derive(Debug, Clone)]
pub struct ChiSquareTest {
    /// Test statistic Σ (observed − expected)² / expected
    pub statistic: f64,
    /// Degrees of freedom, (rows − 1) × (columns − 1)
    pub df: usize,
    /// Upper-tail probability
    pub p_value: f64,
    /// Expected counts under independence
    pub expected: Matrix,
}

/// Chi-square test of independence between the table's row and column
/// variables
pub fn chi_square_test(table: &ContingencyTable) -> Result<ChiSquareTest, TestError> {
    let observed = table.counts();
    let (nrows, ncols) = observed.dim();

    if nrows < 2 || ncols < 2 {
        return Err(TestError::DegenerateDimensions { nrows, ncols });
    }

    let row_totals: Vec<f64> = (0..nrows).map(|i| observed.row(i).sum()).collect();
    let col_totals: Vec<f64> = (0..ncols).map(|j| observed.column(j).sum()).collect();
    let grand_total: f64 = row_totals.iter().sum();

    if grand_total == 0.0 {
        return Err(TestError::ZeroExpectedCell { row: 0, col: 0 });
    }

    let mut expected = Matrix::zeros((nrows, ncols));
    let mut statistic = 0.0;

    for i in 0..nrows {
        for j in 0..ncols {
            let e = row_totals[i] * col_totals[j] / grand_total;
            if e == 0.0 {
                return Err(TestError::ZeroExpectedCell { row: i, col: j });
            }
            expected[(i, j)] = e;

            let delta = observed[(i, j)] - e;
            statistic += delta * delta / e;
        }
    }

    let df = (nrows - 1) * (ncols - 1);
    let chi_dist =
        ChiSquared::new(df as f64).map_err(|e| TestError::Numerical(e.to_string()))?;
    let p_value = (1.0 - chi_dist.cdf(statistic)).clamp(0.0, 1.0);

    Ok(ChiSquareTest {
        statistic,
        df,
        p_value,
        expected,
    })
}
