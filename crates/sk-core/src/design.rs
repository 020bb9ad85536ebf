//! Model specification and design-matrix construction
//!
//! A [`ModelSpec`] names a numeric response and an ordered predictor list.
//! Building a design matrix expands each categorical predictor into indicator
//! columns for its non-reference levels and records the encoding so single
//! observations can be mapped onto the same columns at prediction time.

pub mod error;


pub use error::{DesignError, DesignResult};

use indexmap::IndexMap;
use ndarray::Array1;

use crate::data::{DataFrame, Matrix, Series, SeriesValue, Vector};

/// A response variable together with an ordered list of predictors
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    response: String,
    predictors: Vec<String>,
}

impl ModelSpec {
    /// Create a model specification
    ///
    /// Rejects a response that also appears among the predictors and
    /// duplicated predictor names. An empty predictor list is allowed and
    /// yields an intercept-only design.
    pub fn new(response: impl Into<String>, predictors: &[&str]) -> DesignResult<Self> {
        let response = response.into();
        let mut seen = Vec::with_capacity(predictors.len());

        for &predictor in predictors {
            if predictor == response {
                return Err(DesignError::ResponseReused { variable: response });
            }
            if seen.contains(&predictor) {
                return Err(DesignError::DuplicatePredictor {
                    variable: predictor.to_string(),
                });
            }
            seen.push(predictor);
        }

        Ok(Self {
            response,
            predictors: predictors.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn predictors(&self) -> &[String] {
        &self.predictors
    }

    /// Build the design matrix and response vector from a frame
    pub fn design(&self, df: &DataFrame) -> DesignResult<Design> {
        let response = numeric_column(df, &self.response)?;

        let mut terms = Vec::with_capacity(self.predictors.len());
        let mut column_names = vec![INTERCEPT.to_string()];
        let mut columns: Vec<Vector> = vec![Array1::ones(df.nrows())];

        for name in &self.predictors {
            let series = lookup(df, name)?;

            match series {
                Series::Categorical(codes, levels) => {
                    // One indicator column per non-reference level
                    for (level_code, level) in levels.iter().enumerate().skip(1) {
                        let indicator =
                            codes.mapv(|code| if code as usize == level_code { 1.0 } else { 0.0 });
                        column_names.push(format!("{}[{}]", name, level));
                        columns.push(indicator);
                    }
                    terms.push(TermEncoding::Categorical {
                        name: name.clone(),
                        levels: levels.clone(),
                    });
                }
                Series::Str(_) => {
                    return Err(DesignError::TypeMismatch {
                        variable: name.clone(),
                        expected: "numeric or categorical",
                        actual: series.dtype(),
                    });
                }
                _ => {
                    let values = series.to_float()?;
                    if values.iter().any(|v| v.is_nan()) {
                        return Err(DesignError::MissingValues {
                            variable: name.clone(),
                        });
                    }
                    column_names.push(name.clone());
                    columns.push(values);
                    terms.push(TermEncoding::Numeric { name: name.clone() });
                }
            }
        }

        let mut matrix = Matrix::zeros((df.nrows(), columns.len()));
        for (j, column) in columns.iter().enumerate() {
            matrix.column_mut(j).assign(column);
        }

        Ok(Design {
            matrix,
            response,
            column_names,
            terms,
        })
    }
}

impl std::fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ~ ", self.response)?;

        if self.predictors.is_empty() {
            return write!(f, "1");
        }

        for (i, predictor) in self.predictors.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", predictor)?;
        }

        Ok(())
    }
}

/// Name of the leading intercept column
pub const INTERCEPT: &str = "(Intercept)";

/// How one predictor was mapped onto design-matrix columns
#[derive(Debug, Clone, PartialEq)]
pub enum TermEncoding {
    /// Single numeric column
    Numeric { name: String },
    /// Indicator columns for every level after the reference (levels[0])
    Categorical { name: String, levels: Vec<String> },
}

impl TermEncoding {
    pub fn name(&self) -> &str {
        match self {
            TermEncoding::Numeric { name } => name,
            TermEncoding::Categorical { name, .. } => name,
        }
    }

    /// Number of design-matrix columns this term occupies
    pub fn width(&self) -> usize {
        match self {
            TermEncoding::Numeric { .. } => 1,
            TermEncoding::Categorical { levels, .. } => levels.len().saturating_sub(1),
        }
    }
}

/// A design matrix with its response and encoding metadata
#[derive(Debug, Clone)]
pub struct Design {
    /// n × p matrix, intercept column first
    pub matrix: Matrix,
    /// Response vector
    pub response: Vector,
    /// One name per matrix column
    pub column_names: Vec<String>,
    /// Per-predictor encodings, in predictor order
    pub terms: Vec<TermEncoding>,
}

/// A single new observation: an ordered map from predictor name to value
#[derive(Debug, Clone, Default)]
pub struct Observation {
    values: IndexMap<String, SeriesValue>,
}

impl Observation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion
    pub fn with(mut self, name: impl Into<String>, value: impl Into<SeriesValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<SeriesValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&SeriesValue> {
        self.values.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.values.keys().map(|k| k.as_str()).collect()
    }
}

/// Encode a single observation as a design-matrix row (intercept included)
///
/// Categorical values must be levels seen at fit time; anything else is an
/// [`DesignError::UnknownLevel`].
pub fn encode_observation(terms: &[TermEncoding], obs: &Observation) -> DesignResult<Vector> {
    let width: usize = 1 + terms.iter().map(TermEncoding::width).sum::<usize>();
    let mut row = Vec::with_capacity(width);
    row.push(1.0);

    for term in terms {
        let value = obs.get(term.name()).ok_or_else(|| DesignError::VariableNotFound {
            variable: term.name().to_string(),
            available: obs.names().iter().map(|s| s.to_string()).collect(),
        })?;

        match term {
            TermEncoding::Numeric { name } => match value {
                SeriesValue::Float(v) => row.push(*v),
                SeriesValue::Int(v) => row.push(*v as f64),
                SeriesValue::Bool(v) => row.push(if *v { 1.0 } else { 0.0 }),
                SeriesValue::Str(_) => {
                    return Err(DesignError::TypeMismatch {
                        variable: name.clone(),
                        expected: "numeric",
                        actual: "string",
                    });
                }
            },
            TermEncoding::Categorical { name, levels } => match value {
                SeriesValue::Str(label) => {
                    let code = levels.iter().position(|level| level == label).ok_or_else(
                        || DesignError::UnknownLevel {
                            variable: name.clone(),
                            level: label.clone(),
                            known: levels.clone(),
                        },
                    )?;

                    for level_code in 1..levels.len() {
                        row.push(if code == level_code { 1.0 } else { 0.0 });
                    }
                }
                other => {
                    return Err(DesignError::TypeMismatch {
                        variable: name.clone(),
                        expected: "categorical level",
                        actual: match other {
                            SeriesValue::Float(_) => "float64",
                            SeriesValue::Int(_) => "int64",
                            SeriesValue::Bool(_) => "bool",
                            SeriesValue::Str(_) => "string",
                        },
                    });
                }
            },
        }
    }

    Ok(Array1::from(row))
}

fn lookup<'a>(df: &'a DataFrame, name: &str) -> DesignResult<&'a Series> {
    df.get_column(name).ok_or_else(|| DesignError::VariableNotFound {
        variable: name.to_string(),
        available: df.column_names().iter().map(|s| s.to_string()).collect(),
    })
}

fn numeric_column(df: &DataFrame, name: &str) -> DesignResult<Vector> {
    let series = lookup(df, name)?;

    match series {
        Series::Float(_) | Series::Int(_) => {
            let values = series.to_float()?;
            if values.iter().any(|v| v.is_nan()) {
                return Err(DesignError::MissingValues {
                    variable: name.to_string(),
                });
            }
            Ok(values)
        }
        other => Err(DesignError::TypeMismatch {
            variable: name.to_string(),
            expected: "numeric",
            actual: other.dtype(),
        }),
    }
}
