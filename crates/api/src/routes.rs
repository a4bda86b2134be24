//! Prediction and Schema Routes

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feature_encoder::{
    AddonService, Contract, EncodeError, InternetService, PaymentMethod, RawInput, YesNo,
    MONTHLY_CHARGES_RANGE, TENURE_RANGE, TOTAL_CHARGES_RANGE,
};
use metrics::counter;
use model_runtime::{ChurnLabel, ChurnPrediction, ScoreError};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use crate::AppState;

/// One displayed feature column
#[derive(Debug, Serialize)]
pub struct FeatureValue {
    pub column: &'static str,
    pub value: f64,
}

/// Class probabilities
#[derive(Debug, Serialize)]
pub struct ClassProbabilities {
    pub retained: f64,
    pub churn: f64,
}

/// Response for the predict endpoint
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// "churn" or "retained"
    pub label: &'static str,
    pub churn: bool,
    /// Churn probability as a percentage in [0, 100]
    pub probability_percent: f64,
    pub probabilities: ClassProbabilities,
    /// The scaled feature vector, in model column order
    pub features: Vec<FeatureValue>,
}

impl From<ChurnPrediction> for PredictResponse {
    fn from(prediction: ChurnPrediction) -> Self {
        Self {
            label: prediction.label.as_str(),
            churn: prediction.label == ChurnLabel::Churn,
            probability_percent: prediction.probability * 100.0,
            probabilities: ClassProbabilities {
                retained: prediction.probabilities[0],
                churn: prediction.probabilities[1],
            },
            features: prediction
                .features
                .iter()
                .map(|(column, value)| FeatureValue { column, value })
                .collect(),
        }
    }
}

/// Encoding failure mapped to a 422 with full diagnostic detail
pub struct ApiError(pub ScoreError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ScoreError::Encode(err) = self.0;
        let (kind, detail) = match &err {
            EncodeError::InvalidCategory {
                field,
                value,
                allowed,
            } => (
                "invalid_category",
                json!({ "field": field, "value": value, "allowed": allowed }),
            ),
            EncodeError::OutOfRange {
                field,
                value,
                min,
                max,
            } => (
                "out_of_range",
                json!({ "field": field, "value": value, "min": min, "max": max }),
            ),
            EncodeError::SchemaMismatch {
                missing,
                unexpected,
                expected,
                actual,
            } => (
                "schema_mismatch",
                json!({
                    "missing": missing,
                    "unexpected": unexpected,
                    "expected": expected,
                    "actual": actual,
                }),
            ),
        };

        warn!(error = kind, "prediction request rejected: {err}");
        let body = json!({
            "error": kind,
            "message": err.to_string(),
            "detail": detail,
        });
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

/// Score one submission
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(input): Json<RawInput>,
) -> Result<Json<PredictResponse>, ApiError> {
    counter!("predict_requests_total").increment(1);

    let prediction = state.scorer.score(&input).map_err(|err| {
        counter!("predict_failures_total").increment(1);
        ApiError(err)
    })?;

    Ok(Json(prediction.into()))
}

/// One input field a form surface should render
#[derive(Debug, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,
}

impl FieldSpec {
    fn numeric(name: &'static str, min: f64, max: Option<f64>, default: f64) -> Self {
        Self {
            name,
            kind: "numeric",
            allowed: None,
            min: Some(min),
            max,
            default: Some(default),
        }
    }

    fn categorical(name: &'static str, allowed: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: "categorical",
            allowed: Some(allowed),
            min: None,
            max: None,
            default: None,
        }
    }
}

/// Response for the schema endpoint
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    /// Model columns, in positional order
    pub columns: Vec<String>,
    /// Collected input fields and their constraints
    pub fields: Vec<FieldSpec>,
}

/// Expose the model's column schema and the form-facing field constraints
pub async fn get_schema(State(state): State<Arc<AppState>>) -> Json<SchemaResponse> {
    Json(SchemaResponse {
        columns: state.scorer.feature_names().to_vec(),
        fields: vec![
            FieldSpec::numeric("tenure", TENURE_RANGE.0, Some(TENURE_RANGE.1), 12.0),
            FieldSpec::numeric("monthly_charges", MONTHLY_CHARGES_RANGE.0, None, 50.0),
            FieldSpec::numeric("total_charges", TOTAL_CHARGES_RANGE.0, None, 500.0),
            FieldSpec::categorical("contract", Contract::ALLOWED),
            FieldSpec::categorical("internet_service", InternetService::ALLOWED),
            FieldSpec::categorical("payment_method", PaymentMethod::ALLOWED),
            FieldSpec::categorical("online_security", AddonService::ALLOWED),
            FieldSpec::categorical("tech_support", AddonService::ALLOWED),
            FieldSpec::categorical("paperless_billing", YesNo::ALLOWED),
        ],
    })
}
