//! Canonical Column Schema and Encoding Rules
//!
//! One declarative table maps every model column to its encoding rule. The
//! table is the schema contract: its names and order are what the training
//! pipeline's `get_dummies(drop_first=True)` expansion produced, with binary
//! fields label-encoded in place. Reference categories (all-zero indicators):
//! MultipleLines=No, InternetService=DSL, every internet add-on=No,
//! Contract=Month-to-month, PaymentMethod=Bank transfer (automatic).

use crate::error::EncodeError;
use crate::input::{
    AddonService, Contract, CustomerProfile, Gender, InternetService, MultipleLines,
    PaymentMethod, YesNo,
};

/// Number of columns the model was fitted on
pub const COLUMN_COUNT: usize = 30;

/// The numeric columns the scaler was fitted on, in scaler order
pub const NUMERIC_COLUMNS: [&str; 3] = ["tenure", "MonthlyCharges", "TotalCharges"];

/// Labels accepted by the binary map
pub const BINARY_ALLOWED: &[&str] = &["Yes", "No", "No internet service"];

/// Binary label map used by the flag columns, exactly the table the training
/// notebook applied: Yes maps to 1, No and "No internet service" map to 0.
/// Any other label is an error, never a silent 0.
pub fn binary_flag(field: &'static str, label: &str) -> Result<f64, EncodeError> {
    match label {
        "Yes" => Ok(1.0),
        "No" | "No internet service" => Ok(0.0),
        other => Err(EncodeError::invalid_category(field, other, BINARY_ALLOWED)),
    }
}

/// One model column: its training-time name and the rule producing its value
pub struct ColumnSpec {
    pub name: &'static str,
    pub eval: fn(&CustomerProfile) -> f64,
}

fn flag(set: bool) -> f64 {
    if set {
        1.0
    } else {
        0.0
    }
}

fn yes_no(value: YesNo) -> f64 {
    flag(value == YesNo::Yes)
}

/// The full column table, in the exact order the model expects
pub const SCHEMA: [ColumnSpec; COLUMN_COUNT] = [
    ColumnSpec {
        name: "gender",
        eval: |p| flag(p.gender == Gender::Male),
    },
    ColumnSpec {
        name: "SeniorCitizen",
        eval: |p| yes_no(p.senior_citizen),
    },
    ColumnSpec {
        name: "Partner",
        eval: |p| yes_no(p.partner),
    },
    ColumnSpec {
        name: "Dependents",
        eval: |p| yes_no(p.dependents),
    },
    ColumnSpec {
        name: "tenure",
        eval: |p| p.tenure,
    },
    ColumnSpec {
        name: "PhoneService",
        eval: |p| yes_no(p.phone_service),
    },
    ColumnSpec {
        name: "PaperlessBilling",
        eval: |p| yes_no(p.paperless_billing),
    },
    ColumnSpec {
        name: "MonthlyCharges",
        eval: |p| p.monthly_charges,
    },
    ColumnSpec {
        name: "TotalCharges",
        eval: |p| p.total_charges,
    },
    ColumnSpec {
        name: "MultipleLines_No phone service",
        eval: |p| flag(p.multiple_lines == MultipleLines::NoPhoneService),
    },
    ColumnSpec {
        name: "MultipleLines_Yes",
        eval: |p| flag(p.multiple_lines == MultipleLines::Yes),
    },
    ColumnSpec {
        name: "InternetService_Fiber optic",
        eval: |p| flag(p.internet_service == InternetService::FiberOptic),
    },
    ColumnSpec {
        name: "InternetService_No",
        eval: |p| flag(p.internet_service == InternetService::No),
    },
    ColumnSpec {
        name: "OnlineSecurity_No internet service",
        eval: |p| flag(p.online_security == AddonService::NoInternetService),
    },
    ColumnSpec {
        name: "OnlineSecurity_Yes",
        eval: |p| flag(p.online_security == AddonService::Yes),
    },
    ColumnSpec {
        name: "OnlineBackup_No internet service",
        eval: |p| flag(p.online_backup == AddonService::NoInternetService),
    },
    ColumnSpec {
        name: "OnlineBackup_Yes",
        eval: |p| flag(p.online_backup == AddonService::Yes),
    },
    ColumnSpec {
        name: "DeviceProtection_No internet service",
        eval: |p| flag(p.device_protection == AddonService::NoInternetService),
    },
    ColumnSpec {
        name: "DeviceProtection_Yes",
        eval: |p| flag(p.device_protection == AddonService::Yes),
    },
    ColumnSpec {
        name: "TechSupport_No internet service",
        eval: |p| flag(p.tech_support == AddonService::NoInternetService),
    },
    ColumnSpec {
        name: "TechSupport_Yes",
        eval: |p| flag(p.tech_support == AddonService::Yes),
    },
    ColumnSpec {
        name: "StreamingTV_No internet service",
        eval: |p| flag(p.streaming_tv == AddonService::NoInternetService),
    },
    ColumnSpec {
        name: "StreamingTV_Yes",
        eval: |p| flag(p.streaming_tv == AddonService::Yes),
    },
    ColumnSpec {
        name: "StreamingMovies_No internet service",
        eval: |p| flag(p.streaming_movies == AddonService::NoInternetService),
    },
    ColumnSpec {
        name: "StreamingMovies_Yes",
        eval: |p| flag(p.streaming_movies == AddonService::Yes),
    },
    ColumnSpec {
        name: "Contract_One year",
        eval: |p| flag(p.contract == Contract::OneYear),
    },
    ColumnSpec {
        name: "Contract_Two year",
        eval: |p| flag(p.contract == Contract::TwoYear),
    },
    ColumnSpec {
        name: "PaymentMethod_Credit card (automatic)",
        eval: |p| flag(p.payment_method == PaymentMethod::CreditCard),
    },
    ColumnSpec {
        name: "PaymentMethod_Electronic check",
        eval: |p| flag(p.payment_method == PaymentMethod::ElectronicCheck),
    },
    ColumnSpec {
        name: "PaymentMethod_Mailed check",
        eval: |p| flag(p.payment_method == PaymentMethod::MailedCheck),
    },
];

/// Column names in model order
pub fn column_names() -> Vec<&'static str> {
    SCHEMA.iter().map(|spec| spec.name).collect()
}

/// Compare an actual column list against an expected one. Set differences
/// are reported in full; equal sets in a different order still fail, with
/// both orderings in the error.
pub fn validate_columns(expected: &[String], actual: &[&str]) -> Result<(), EncodeError> {
    if expected.len() == actual.len()
        && expected.iter().zip(actual.iter()).all(|(e, a)| e == a)
    {
        return Ok(());
    }

    let missing: Vec<String> = expected
        .iter()
        .filter(|e| !actual.iter().any(|a| a == &e.as_str()))
        .cloned()
        .collect();
    let unexpected: Vec<String> = actual
        .iter()
        .filter(|a| !expected.iter().any(|e| e == **a))
        .map(|a| a.to_string())
        .collect();

    Err(EncodeError::SchemaMismatch {
        missing,
        unexpected,
        expected: expected.to_vec(),
        actual: actual.iter().map(|a| a.to_string()).collect(),
    })
}
