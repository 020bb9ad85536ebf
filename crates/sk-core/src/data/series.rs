//! Series data structure for holding homogeneous data
//!
//! A Series is a one-dimensional, typed column. Categorical series carry an
//! ordered level list whose first entry is the reference (baseline) level used
//! when the column is expanded into indicator variables.

use super::*;

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A Series is a typed, one-dimensional array of data
#[derive(Clone, Debug, PartialEq)]
pub enum Series {
    /// Floating point numbers; `NaN` encodes a missing value
    Float(FloatArray),
    /// Integer numbers (i64)
    Int(IntArray),
    /// Boolean values
    Bool(BoolArray),
    /// Free-form strings; must be declared categorical before modeling
    Str(StrArray),
    /// Categorical data: codes into the level list, levels[0] is the reference
    Categorical(Array1<u32>, Vec<String>),
}

impl Series {
    /// Create a new Float series
    pub fn float(data: impl Into<FloatArray>) -> Self {
        Series::Float(data.into())
    }

    /// Create a new Int series
    pub fn int(data: impl Into<IntArray>) -> Self {
        Series::Int(data.into())
    }

    /// Create a new Bool series
    pub fn bool(data: impl Into<BoolArray>) -> Self {
        Series::Bool(data.into())
    }

    /// Create a new Str series
    pub fn str(data: impl Into<StrArray>) -> Self {
        Series::Str(data.into())
    }

    /// Create a categorical series. Levels are the sorted unique labels and
    /// the first sorted level becomes the reference.
    pub fn categorical<T: AsRef<str>>(data: &[T]) -> Self {
        let levels: Vec<String> = data
            .iter()
            .map(|s| s.as_ref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let level_index: HashMap<&str, u32> = levels
            .iter()
            .enumerate()
            .map(|(i, level)| (level.as_str(), i as u32))
            .collect();

        let codes: Array1<u32> = data.iter().map(|s| level_index[s.as_ref()]).collect();

        Series::Categorical(codes, levels)
    }

    /// Create a categorical series with an explicit reference level
    pub fn categorical_with_reference<T: AsRef<str>>(data: &[T], reference: &str) -> Result<Self> {
        Series::categorical(data).relevel(reference)
    }

    /// Return a categorical series re-ordered so `reference` is the baseline
    /// level. Fails if the level is not present.
    pub fn relevel(&self, reference: &str) -> Result<Series> {
        let (codes, levels) = match self {
            Series::Categorical(codes, levels) => (codes, levels),
            other => return Err(DataError::NonNumericData(other.dtype())),
        };

        let position = levels
            .iter()
            .position(|level| level == reference)
            .ok_or_else(|| {
                DataError::InvalidParameter(format!(
                    "reference level '{}' not among levels {:?}",
                    reference, levels
                ))
            })?;

        if position == 0 {
            return Ok(self.clone());
        }

        let mut new_levels = Vec::with_capacity(levels.len());
        new_levels.push(levels[position].clone());
        new_levels.extend(
            levels
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != position)
                .map(|(_, level)| level.clone()),
        );

        // Old code -> new code
        let remap: Vec<u32> = (0..levels.len())
            .map(|old| {
                if old == position {
                    0
                } else if old < position {
                    old as u32 + 1
                } else {
                    old as u32
                }
            })
            .collect();

        let new_codes = codes.mapv(|code| remap[code as usize]);

        Ok(Series::Categorical(new_codes, new_levels))
    }

    /// Level list for categorical series
    pub fn levels(&self) -> Option<&[String]> {
        match self {
            Series::Categorical(_, levels) => Some(levels),
            _ => None,
        }
    }

    /// Reference (baseline) level for categorical series
    pub fn reference_level(&self) -> Option<&str> {
        self.levels().and_then(|levels| levels.first()).map(|s| s.as_str())
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        match self {
            Series::Float(arr) => arr.len(),
            Series::Int(arr) => arr.len(),
            Series::Bool(arr) => arr.len(),
            Series::Str(arr) => arr.len(),
            Series::Categorical(arr, _) => arr.len(),
        }
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the type name of the series
    pub fn dtype(&self) -> &'static str {
        match self {
            Series::Float(_) => "float64",
            Series::Int(_) => "int64",
            Series::Bool(_) => "bool",
            Series::Str(_) => "string",
            Series::Categorical(_, _) => "categorical",
        }
    }

    /// Whether the series contains missing values (`NaN` in float columns)
    pub fn has_missing(&self) -> bool {
        match self {
            Series::Float(arr) => arr.iter().any(|v| v.is_nan()),
            _ => false,
        }
    }

    /// Get a value at index
    pub fn get(&self, idx: usize) -> Option<SeriesValue> {
        if idx >= self.len() {
            return None;
        }

        match self {
            Series::Float(arr) => arr.get(idx).map(|&v| SeriesValue::Float(v)),
            Series::Int(arr) => arr.get(idx).map(|&v| SeriesValue::Int(v)),
            Series::Bool(arr) => arr.get(idx).map(|&v| SeriesValue::Bool(v)),
            Series::Str(arr) => arr.get(idx).map(|v| SeriesValue::Str(v.clone())),
            Series::Categorical(arr, levels) => arr
                .get(idx)
                .and_then(|&code| levels.get(code as usize))
                .map(|level| SeriesValue::Str(level.clone())),
        }
    }

    /// Filter the series with a boolean mask
    pub fn filter(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.len() {
            return Err(DataError::DimensionMismatch {
                expected: format!("mask length {}", self.len()),
                actual: format!("mask length {}", mask.len()),
            });
        }

        fn keep<'a, T: Clone + 'a>(
            values: impl Iterator<Item = &'a T>,
            mask: &[bool],
        ) -> Vec<T> {
            values
                .zip(mask.iter())
                .filter(|(_, keep)| **keep)
                .map(|(value, _)| value.clone())
                .collect()
        }

        Ok(match self {
            Series::Float(arr) => Series::Float(Array1::from(keep(arr.iter(), mask))),
            Series::Int(arr) => Series::Int(Array1::from(keep(arr.iter(), mask))),
            Series::Bool(arr) => Series::Bool(Array1::from(keep(arr.iter(), mask))),
            Series::Str(arr) => Series::Str(keep(arr.iter(), mask)),
            Series::Categorical(arr, levels) => {
                Series::Categorical(Array1::from(keep(arr.iter(), mask)), levels.clone())
            }
        })
    }

    /// Convert to a float array if possible
    pub fn to_float(&self) -> Result<FloatArray> {
        match self {
            Series::Float(arr) => Ok(arr.clone()),
            Series::Int(arr) => Ok(arr.mapv(|v| v as f64)),
            Series::Bool(arr) => Ok(arr.mapv(|v| if v { 1.0 } else { 0.0 })),
            Series::Categorical(_, _) => Err(DataError::NonNumericData("categorical")),
            Series::Str(_) => Err(DataError::NonNumericData("string")),
        }
    }

    /// Compute mean of a numeric series
    pub fn mean(&self) -> Result<f64> {
        let arr = self.to_float()?;
        Ok(arr.mean().unwrap_or(f64::NAN))
    }

    /// Compute standard deviation with `ddof` delta degrees of freedom
    pub fn std(&self, ddof: usize) -> Result<f64> {
        let arr = self.to_float()?;
        Ok(arr.std(ddof as f64))
    }

    /// Compute sum of a numeric series
    pub fn sum(&self) -> Result<f64> {
        let arr = self.to_float()?;
        Ok(arr.sum())
    }

    /// Compute a descriptive summary
    pub fn describe(&self) -> SeriesStats {
        match self.to_float() {
            Ok(arr) => {
                if arr.is_empty() {
                    return SeriesStats::empty();
                }

                SeriesStats {
                    count: arr.len(),
                    mean: arr.mean().unwrap_or(f64::NAN),
                    std: arr.std(1.0),
                    min: arr.iter().fold(f64::INFINITY, |a, &b| a.min(b)),
                    q25: quantile(&arr, 0.25).unwrap_or(f64::NAN),
                    q50: quantile(&arr, 0.5).unwrap_or(f64::NAN),
                    q75: quantile(&arr, 0.75).unwrap_or(f64::NAN),
                    max: arr.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)),
                    unique_count: None,
                }
            }
            Err(_) => {
                let unique_count = match self {
                    Series::Str(arr) => arr.iter().collect::<BTreeSet<_>>().len(),
                    Series::Categorical(_, levels) => levels.len(),
                    _ => 0,
                };
                SeriesStats {
                    count: self.len(),
                    unique_count: Some(unique_count),
                    ..SeriesStats::empty()
                }
            }
        }
    }
}

/// Helper function to compute an interpolated quantile
fn quantile(arr: &FloatArray, q: f64) -> Option<f64> {
    if arr.is_empty() {
        return None;
    }

    let mut sorted: Vec<f64> = arr.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let index = (sorted.len() as f64 - 1.0) * q;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        Some(sorted[lower])
    } else {
        let weight = index - lower as f64;
        Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
    }
}

/// Statistical summary of a series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
    pub unique_count: Option<usize>,
}

impl SeriesStats {
    pub(crate) fn empty() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            q50: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
            unique_count: None,
        }
    }
}

/// Enum for type-safe value access
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesValue {
    Float(f64),
    Int(i64),
    Bool(bool),
    Str(String),
}

impl From<f64> for SeriesValue {
    fn from(v: f64) -> Self {
        SeriesValue::Float(v)
    }
}

impl From<i64> for SeriesValue {
    fn from(v: i64) -> Self {
        SeriesValue::Int(v)
    }
}

impl From<i32> for SeriesValue {
    fn from(v: i32) -> Self {
        SeriesValue::Int(v as i64)
    }
}

impl From<bool> for SeriesValue {
    fn from(v: bool) -> Self {
        SeriesValue::Bool(v)
    }
}

impl From<&str> for SeriesValue {
    fn from(v: &str) -> Self {
        SeriesValue::Str(v.to_string())
    }
}

impl From<String> for SeriesValue {
    fn from(v: String) -> Self {
        SeriesValue::Str(v)
    }
}

impl std::fmt::Display for SeriesValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesValue::Float(v) => write!(f, "{}", v),
            SeriesValue::Int(v) => write!(f, "{}", v),
            SeriesValue::Bool(v) => write!(f, "{}", v),
            SeriesValue::Str(v) => write!(f, "{}", v),
        }
    }
}
