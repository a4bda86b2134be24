//! Encoding Error Types

use thiserror::Error;

/// Errors raised while reconstructing a feature vector
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// Categorical label outside the declared enumeration
    #[error("{field} value {value:?} is not one of {allowed:?}")]
    InvalidCategory {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    /// Numeric input outside its declared range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Column set or order differs from what the model declares
    #[error(
        "feature schema mismatch: missing columns {missing:?}, unexpected columns {unexpected:?} \
         (expected {expected:?}, actual {actual:?})"
    )]
    SchemaMismatch {
        /// Expected by the model but absent from the vector
        missing: Vec<String>,
        /// Present in the vector but not expected by the model
        unexpected: Vec<String>,
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

impl EncodeError {
    pub(crate) fn invalid_category(
        field: &'static str,
        value: &str,
        allowed: &'static [&'static str],
    ) -> Self {
        EncodeError::InvalidCategory {
            field,
            value: value.to_string(),
            allowed,
        }
    }
}
