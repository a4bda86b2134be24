//! Feature Vector Assembly

use crate::error::EncodeError;
use crate::input::{CustomerProfile, RawInput};
use crate::schema::{COLUMN_COUNT, SCHEMA};
use serde::Serialize;
use tracing::debug;

/// Ordered numeric record over the canonical column schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    columns: Vec<&'static str>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub(crate) fn new(columns: Vec<&'static str>, values: Vec<f64>) -> Self {
        Self { columns, values }
    }

    /// Assemble a vector from explicit (column, value) pairs. Callers
    /// normally go through [`encode`]; this is for tooling that needs a
    /// vector in a non-canonical shape, e.g. to exercise schema checks.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (&'static str, f64)>) -> Self {
        let (columns, values) = pairs.into_iter().unzip();
        Self { columns, values }
    }

    /// Column names in emission order
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Values in emission order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Look up a value by column name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| *c == name)
            .map(|i| self.values[i])
    }

    /// Replace a value by column name; false when the column is absent
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match self.columns.iter().position(|c| *c == name) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    /// (column, value) pairs in emission order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.columns.iter().copied().zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Reconstruct the model's feature vector from one form submission.
///
/// Pure and request-scoped: validates the numeric ranges, resolves the
/// categorical labels (unknown labels fail, nothing defaults silently), and
/// walks the column table in schema order. The numeric slots still hold raw
/// values; the scaler is applied downstream.
pub fn encode(input: &RawInput) -> Result<FeatureVector, EncodeError> {
    input.validate()?;
    let profile = CustomerProfile::resolve(input)?;

    let mut columns = Vec::with_capacity(COLUMN_COUNT);
    let mut values = Vec::with_capacity(COLUMN_COUNT);
    for spec in &SCHEMA {
        columns.push(spec.name);
        values.push((spec.eval)(&profile));
    }

    debug!(columns = columns.len(), "feature vector encoded");
    Ok(FeatureVector::new(columns, values))
}
