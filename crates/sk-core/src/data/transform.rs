//! Composable, pure cleaning steps for DataFrames
//!
//! Each step takes a frame by reference and returns a new frame, so cleaning
//! pipelines carry no hidden state between steps and every intermediate frame
//! stays available for inspection.

use super::*;

/// A single pure transformation over a DataFrame
pub trait Transform {
    fn apply(&self, df: &DataFrame) -> Result<DataFrame>;
}

/// An ordered sequence of transformations
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step to the pipeline
    pub fn then(mut self, step: impl Transform + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Transform for Pipeline {
    fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut current = df.clone();
        for step in &self.steps {
            current = step.apply(&current)?;
        }
        Ok(current)
    }
}

/// Drop the named columns
pub struct DropColumns {
    names: Vec<String>,
}

impl DropColumns {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl Transform for DropColumns {
    fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        df.drop(&self.names)
    }
}

/// Keep only rows matching a predicate
pub struct FilterRows {
    predicate: Box<dyn Fn(&Row) -> bool>,
}

impl FilterRows {
    pub fn new(predicate: impl Fn(&Row) -> bool + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl Transform for FilterRows {
    fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        df.filter_with(|row| (self.predicate)(row))
    }
}

/// Drop rows containing missing values in any float column
pub struct DropMissing;

impl Transform for DropMissing {
    fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        let float_columns: Vec<&Series> = df
            .column_names()
            .into_iter()
            .filter_map(|name| df.get_column(name))
            .filter(|series| matches!(series, Series::Float(_)))
            .collect();

        let mask: Vec<bool> = (0..df.nrows())
            .map(|i| {
                float_columns.iter().all(|series| match series.get(i) {
                    Some(SeriesValue::Float(v)) => !v.is_nan(),
                    _ => true,
                })
            })
            .collect();

        df.filter(&mask)
    }
}

/// Declare a string column categorical, with an optional reference level
pub struct ToCategorical {
    column: String,
    reference: Option<String>,
}

impl ToCategorical {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            reference: None,
        }
    }

    /// Designate the reference (baseline) level
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

impl Transform for ToCategorical {
    fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        let series = df
            .get_column(&self.column)
            .ok_or_else(|| DataError::ColumnNotFound(self.column.clone()))?;

        let converted = match series {
            Series::Str(values) => match &self.reference {
                Some(reference) => Series::categorical_with_reference(values, reference)?,
                None => Series::categorical(values),
            },
            Series::Categorical(_, _) => match &self.reference {
                Some(reference) => series.relevel(reference)?,
                None => series.clone(),
            },
            other => {
                return Err(DataError::InvalidParameter(format!(
                    "column '{}' has type {}, expected string or categorical",
                    self.column,
                    other.dtype()
                )));
            }
        };

        df.replace_column(&self.column, converted)
    }
}

/// Rename or collapse levels of a categorical (or string) column
pub struct RecodeLevels {
    column: String,
    mapping: Vec<(String, String)>,
}

impl RecodeLevels {
    pub fn new<S1, S2>(column: impl Into<String>, mapping: impl IntoIterator<Item = (S1, S2)>) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self {
            column: column.into(),
            mapping: mapping
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }

    fn recode(&self, label: &str) -> String {
        self.mapping
            .iter()
            .find(|(from, _)| from == label)
            .map(|(_, to)| to.clone())
            .unwrap_or_else(|| label.to_string())
    }
}

impl Transform for RecodeLevels {
    fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        let series = df
            .get_column(&self.column)
            .ok_or_else(|| DataError::ColumnNotFound(self.column.clone()))?;

        let recoded = match series {
            Series::Str(values) => {
                Series::str(values.iter().map(|v| self.recode(v)).collect::<Vec<_>>())
            }
            Series::Categorical(codes, levels) => {
                let labels: Vec<String> = codes
                    .iter()
                    .map(|&code| self.recode(&levels[code as usize]))
                    .collect();
                Series::categorical(&labels)
            }
            other => {
                return Err(DataError::InvalidParameter(format!(
                    "column '{}' has type {}, expected string or categorical",
                    self.column,
                    other.dtype()
                )));
            }
        };

        df.replace_column(&self.column, recoded)
    }
}

/// Bucket a numeric column into ordered, labeled categories
///
/// `breaks` must be strictly increasing and `labels` must hold exactly one
/// more entry than `breaks`: a value `v` maps to the first label whose break
/// satisfies `v <= break`, or the last label when `v` exceeds every break.
pub struct Bucketize {
    column: String,
    breaks: Vec<f64>,
    labels: Vec<String>,
    output: Option<String>,
}

impl Bucketize {
    pub fn new<S: Into<String>>(
        column: impl Into<String>,
        breaks: impl IntoIterator<Item = f64>,
        labels: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            column: column.into(),
            breaks: breaks.into_iter().collect(),
            labels: labels.into_iter().map(Into::into).collect(),
            output: None,
        }
    }

    /// Write the bucketed categories to a new column instead of replacing
    pub fn into_column(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.labels.len() != self.breaks.len() + 1 {
            return Err(DataError::InvalidParameter(format!(
                "{} breakpoints require {} labels, got {}",
                self.breaks.len(),
                self.breaks.len() + 1,
                self.labels.len()
            )));
        }

        if self.breaks.windows(2).any(|w| w[0] >= w[1]) {
            return Err(DataError::InvalidParameter(
                "breakpoints must be strictly increasing".to_string(),
            ));
        }

        Ok(())
    }

    fn bucket_of(&self, value: f64) -> Result<usize> {
        if value.is_nan() {
            return Err(DataError::InvalidParameter(format!(
                "cannot bucket missing value in column '{}'",
                self.column
            )));
        }

        Ok(self.breaks.partition_point(|b| value > *b))
    }
}

impl Transform for Bucketize {
    fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        self.validate()?;

        let series = df
            .get_column(&self.column)
            .ok_or_else(|| DataError::ColumnNotFound(self.column.clone()))?;

        let values = series.to_float()?;
        let labels: Vec<&str> = values
            .iter()
            .map(|&v| self.bucket_of(v).map(|i| self.labels[i].as_str()))
            .collect::<Result<_>>()?;

        let bucketed = Series::categorical(&labels);

        match &self.output {
            Some(output) if !df.has_column(output) => df.clone().with_column(output, bucketed),
            Some(output) => df.replace_column(output, bucketed),
            None => df.replace_column(&self.column, bucketed),
        }
    }
}
