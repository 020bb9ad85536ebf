//! Tabular data structures
//!
//! This module provides the foundational data structures for statistical
//! computing: typed columns, data frames, and composable cleaning steps.

mod builder;
mod dataframe;
mod series;
mod transform;


// Re-exports
pub use builder::DataFrameBuilder;
pub use dataframe::{DataFrame, Row, RowIter};
pub use series::{Series, SeriesStats, SeriesValue};
pub use transform::{
    Bucketize, DropColumns, DropMissing, FilterRows, Pipeline, RecodeLevels, ToCategorical,
    Transform,
};

// Type aliases for common use cases
pub type FloatArray = ndarray::Array1<f64>;
pub type IntArray = ndarray::Array1<i64>;
pub type BoolArray = ndarray::Array1<bool>;
pub type StrArray = Vec<String>;
pub type Matrix = ndarray::Array2<f64>;
pub type Vector = ndarray::Array1<f64>;

/// Error types specific to data operations
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("index out of bounds: index {index}, length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("operation requires numeric data, got {0}")]
    NonNumericData(&'static str),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
