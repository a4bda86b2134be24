//! Feature Vector Reconstruction
//!
//! Rebuilds the exact column layout a pre-trained churn classifier was
//! fitted on: explicit binary maps, fixed one-hot expansion, documented
//! defaults for uncollected fields, and internet-service dependency
//! propagation. The encoder is a pure function; unknown labels and schema
//! drift surface as typed errors instead of silently mis-shaped vectors.

mod encoder;
mod error;
mod input;
mod schema;

pub use encoder::{encode, FeatureVector};
pub use error::EncodeError;
pub use input::{
    AddonService, Contract, CustomerProfile, Gender, InternetService, MultipleLines,
    PaymentMethod, RawInput, YesNo, DEFAULT_ADDON, DEFAULT_DEPENDENTS, DEFAULT_GENDER,
    DEFAULT_MULTIPLE_LINES, DEFAULT_PARTNER, DEFAULT_PHONE_SERVICE, DEFAULT_SENIOR_CITIZEN,
    MONTHLY_CHARGES_RANGE, TENURE_RANGE, TOTAL_CHARGES_RANGE,
};
pub use schema::{
    binary_flag, column_names, validate_columns, ColumnSpec, BINARY_ALLOWED, COLUMN_COUNT,
    NUMERIC_COLUMNS, SCHEMA,
};
