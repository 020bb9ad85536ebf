//! DataFrame implementation for tabular data
//!
//! A DataFrame is a 2-dimensional labeled data structure with columns of
//! potentially different types. Frames are value types: every operation
//! returns a new frame and never mutates its input.

use super::*;

use indexmap::IndexMap;
use ndarray::{stack, Axis};
use rand::seq::SliceRandom;

/// Main DataFrame structure
#[derive(Clone, Debug)]
pub struct DataFrame {
    pub(crate) columns: IndexMap<String, Series>,
    pub(crate) nrows: usize,
}

impl DataFrame {
    /// Create an empty DataFrame
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
            nrows: 0,
        }
    }

    /// Create DataFrame from columns
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Series)>,
        S: Into<String>,
    {
        let mut builder = DataFrameBuilder::new();

        for (name, series) in columns.into_iter() {
            builder = builder.with_column(name, series)?;
        }

        builder.build()
    }

    /// Get the shape of the DataFrame (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.columns.len())
    }

    /// Get the number of rows
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Get the number of columns
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    /// Get a reference to a column
    pub fn get_column(&self, name: &str) -> Option<&Series> {
        self.columns.get(name)
    }

    /// Check if column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Select specific columns
    pub fn select<I, S>(&self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = DataFrameBuilder::new();

        for name in names.into_iter() {
            let name = name.as_ref();
            match self.columns.get(name) {
                Some(series) => {
                    builder = builder.with_column(name, series.clone())?;
                }
                None => {
                    return Err(DataError::ColumnNotFound(name.to_string()));
                }
            }
        }

        builder.build()
    }

    /// Filter rows with a boolean mask
    pub fn filter(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.nrows {
            return Err(DataError::DimensionMismatch {
                expected: format!("mask length {}", self.nrows),
                actual: format!("mask length {}", mask.len()),
            });
        }

        let mut builder = DataFrameBuilder::new();

        for (name, series) in &self.columns {
            let filtered = series.filter(mask)?;
            builder = builder.with_column(name.clone(), filtered)?;
        }

        builder.build()
    }

    /// Filter rows with a predicate
    pub fn filter_with<F>(&self, predicate: F) -> Result<Self>
    where
        F: Fn(&Row) -> bool,
    {
        let mut mask = Vec::with_capacity(self.nrows);

        for i in 0..self.nrows {
            let row = self.get_row(i)?;
            mask.push(predicate(&row));
        }

        self.filter(&mask)
    }

    /// Add a new column
    pub fn with_column<S: Into<String>>(mut self, name: S, series: Series) -> Result<Self> {
        let name = name.into();

        if self.columns.contains_key(&name) {
            return Err(DataError::DuplicateColumn(name));
        }

        if !self.columns.is_empty() && series.len() != self.nrows {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} rows", self.nrows),
                actual: format!("{} rows", series.len()),
            });
        }

        if self.columns.is_empty() {
            self.nrows = series.len();
        }

        self.columns.insert(name, series);

        Ok(self)
    }

    /// Replace an existing column, keeping its position
    pub fn replace_column<S: Into<String>>(&self, name: S, series: Series) -> Result<Self> {
        let name = name.into();

        if !self.columns.contains_key(&name) {
            return Err(DataError::ColumnNotFound(name));
        }

        if series.len() != self.nrows {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} rows", self.nrows),
                actual: format!("{} rows", series.len()),
            });
        }

        let mut df = self.clone();
        df.columns.insert(name, series);
        Ok(df)
    }

    /// Drop columns
    pub fn drop<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let mut df = self.clone();

        for name in names {
            let name = name.as_ref();
            if df.columns.shift_remove(name).is_none() {
                return Err(DataError::ColumnNotFound(name.to_string()));
            }
        }

        if df.columns.is_empty() {
            df.nrows = 0;
        }

        Ok(df)
    }

    /// Get a row as a Row view
    pub fn get_row(&self, idx: usize) -> Result<Row<'_>> {
        if idx >= self.nrows {
            return Err(DataError::IndexOutOfBounds {
                index: idx,
                len: self.nrows,
            });
        }

        Ok(Row {
            df: self,
            row_idx: idx,
        })
    }

    /// Iterate over rows
    pub fn rows(&self) -> RowIter<'_> {
        RowIter {
            df: self,
            current: 0,
        }
    }

    /// Get numeric columns as a matrix, in column order
    pub fn numeric_matrix(&self) -> Result<Matrix> {
        let float_cols: Vec<FloatArray> = self
            .columns
            .values()
            .filter(|s| !matches!(s, Series::Str(_) | Series::Categorical(_, _)))
            .map(|s| s.to_float())
            .collect::<Result<_>>()?;

        if float_cols.is_empty() {
            return Ok(Matrix::zeros((self.nrows, 0)));
        }

        let views: Vec<ndarray::ArrayView1<f64>> = float_cols.iter().map(|arr| arr.view()).collect();

        stack(Axis(1), &views).map_err(|e| DataError::DimensionMismatch {
            expected: "columns of equal length".to_string(),
            actual: e.to_string(),
        })
    }

    /// Compute the correlation matrix of the numeric columns
    pub fn corr(&self) -> Result<Matrix> {
        let matrix = self.numeric_matrix()?;
        let nrows = matrix.nrows() as f64;

        if nrows <= 1.0 {
            return Ok(Matrix::zeros((0, 0)));
        }

        let means = matrix.mean_axis(Axis(0)).unwrap_or_default();
        let centered = &matrix - &means;
        let cov = centered.t().dot(&centered) / (nrows - 1.0);

        let stds = cov.diag().mapv(|v| v.sqrt());
        let mut corr = Matrix::zeros(cov.dim());

        for i in 0..corr.nrows() {
            for j in 0..corr.ncols() {
                if stds[i] > 0.0 && stds[j] > 0.0 {
                    corr[(i, j)] = cov[(i, j)] / (stds[i] * stds[j]);
                } else {
                    corr[(i, j)] = f64::NAN;
                }
            }
        }

        Ok(corr)
    }

    /// Descriptive statistics per column
    pub fn describe(&self) -> Vec<(String, SeriesStats)> {
        self.columns
            .iter()
            .map(|(name, series)| (name.clone(), series.describe()))
            .collect()
    }

    /// Sample rows without replacement, optionally seeded
    pub fn sample(&self, n: usize, seed: Option<u64>) -> Result<Self> {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        if n > self.nrows {
            return Err(DataError::InvalidParameter(format!(
                "sample size {} exceeds {} rows",
                n, self.nrows
            )));
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut indices: Vec<usize> = (0..self.nrows).collect();
        indices.shuffle(&mut rng);
        indices.truncate(n);

        let mut mask = vec![false; self.nrows];
        for &idx in &indices {
            mask[idx] = true;
        }

        self.filter(&mask)
    }
}

impl Default for DataFrame {
    fn default() -> Self {
        Self::new()
    }
}

/// Row view into a DataFrame
pub struct Row<'a> {
    df: &'a DataFrame,
    row_idx: usize,
}

impl<'a> Row<'a> {
    /// Get a value from the row
    pub fn get(&self, col: &str) -> Result<Option<SeriesValue>> {
        match self.df.columns.get(col) {
            Some(series) => Ok(series.get(self.row_idx)),
            None => Err(DataError::ColumnNotFound(col.to_string())),
        }
    }

    /// Get value as float
    pub fn get_float(&self, col: &str) -> Result<Option<f64>> {
        match self.get(col)? {
            Some(SeriesValue::Float(v)) => Ok(Some(v)),
            Some(SeriesValue::Int(v)) => Ok(Some(v as f64)),
            Some(SeriesValue::Bool(v)) => Ok(Some(if v { 1.0 } else { 0.0 })),
            _ => Ok(None),
        }
    }

    /// Get value as integer
    pub fn get_int(&self, col: &str) -> Result<Option<i64>> {
        match self.get(col)? {
            Some(SeriesValue::Int(v)) => Ok(Some(v)),
            Some(SeriesValue::Float(v)) => Ok(Some(v as i64)),
            Some(SeriesValue::Bool(v)) => Ok(Some(if v { 1 } else { 0 })),
            _ => Ok(None),
        }
    }

    /// Get value as boolean
    pub fn get_bool(&self, col: &str) -> Result<Option<bool>> {
        match self.get(col)? {
            Some(SeriesValue::Bool(v)) => Ok(Some(v)),
            _ => Ok(None),
        }
    }

    /// Get value as string (string or categorical columns)
    pub fn get_str(&self, col: &str) -> Result<Option<String>> {
        match self.get(col)? {
            Some(SeriesValue::Str(v)) => Ok(Some(v)),
            _ => Ok(None),
        }
    }
}

/// Iterator over rows
pub struct RowIter<'a> {
    df: &'a DataFrame,
    current: usize,
}

impl<'a> Iterator for RowIter<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.df.nrows {
            let row = Row {
                df: self.df,
                row_idx: self.current,
            };
            self.current += 1;
            Some(row)
        } else {
            None
        }
    }
}

impl std::fmt::Display for DataFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DataFrame({} rows × {} cols)", self.nrows, self.ncols())
    }
}
