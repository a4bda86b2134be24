//! Trained Classifier Artifact

use crate::ArtifactError;
use feature_encoder::{validate_columns, EncodeError, FeatureVector};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

fn default_threshold() -> f64 {
    0.5
}

/// Logistic-regression parameters exported from the training pipeline,
/// together with the column schema the model was fitted on. The declared
/// `feature_names` list is the binding contract the encoder must satisfy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnModel {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

impl ChurnModel {
    /// Load from a JSON parameter file and check internal consistency
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let model: Self = serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        model.check()?;
        info!(
            path = %path.display(),
            features = model.feature_names.len(),
            "model artifact loaded"
        );
        Ok(model)
    }

    /// Build from already-validated parameters (tests, embedded defaults)
    pub fn from_parts(
        feature_names: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
        threshold: f64,
    ) -> Result<Self, ArtifactError> {
        let model = Self {
            feature_names,
            coefficients,
            intercept,
            threshold,
        };
        model.check()?;
        Ok(model)
    }

    fn check(&self) -> Result<(), ArtifactError> {
        if self.feature_names.len() != self.coefficients.len() {
            return Err(ArtifactError::Inconsistent(format!(
                "{} feature names but {} coefficients",
                self.feature_names.len(),
                self.coefficients.len()
            )));
        }
        if self.feature_names.is_empty() {
            return Err(ArtifactError::Inconsistent("empty feature list".to_string()));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ArtifactError::Inconsistent(format!(
                "threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Columns the model expects, in positional order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Fail with the full expected-vs-actual diff when the vector does not
    /// match the declared schema. Must pass before any prediction runs.
    pub fn check_schema(&self, features: &FeatureVector) -> Result<(), EncodeError> {
        validate_columns(&self.feature_names, features.columns())
    }

    /// Class probabilities `[p_retained, p_churn]`
    pub fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2], EncodeError> {
        self.check_schema(features)?;
        let logit: f64 = self
            .coefficients
            .iter()
            .zip(features.values())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        let p_churn = 1.0 / (1.0 + (-logit).exp());
        Ok([1.0 - p_churn, p_churn])
    }

    /// Hard label from an already-computed churn probability:
    /// 1 = churn, 0 = retained
    pub fn classify(&self, p_churn: f64) -> u8 {
        u8::from(p_churn >= self.threshold)
    }

    /// Hard label: 1 = churn, 0 = retained
    pub fn predict(&self, features: &FeatureVector) -> Result<u8, EncodeError> {
        let [_, p_churn] = self.predict_proba(features)?;
        Ok(self.classify(p_churn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_encoder::{column_names, encode, RawInput};

    fn test_model(weights: impl Fn(&str) -> f64, intercept: f64) -> ChurnModel {
        let names: Vec<String> = column_names().iter().map(|n| n.to_string()).collect();
        let coefficients = names.iter().map(|n| weights(n)).collect();
        ChurnModel::from_parts(names, coefficients, intercept, 0.5).unwrap()
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let model = test_model(|_| 0.1, -1.0);
        let fv = encode(&RawInput::default()).unwrap();
        let [p0, p1] = model.predict_proba(&fv).unwrap();
        assert!((p0 + p1 - 1.0).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&p1));
    }

    #[test]
    fn test_predict_threshold() {
        // Intercept alone decides when all weights are zero
        let churny = test_model(|_| 0.0, 3.0);
        let safe = test_model(|_| 0.0, -3.0);
        let fv = encode(&RawInput::default()).unwrap();
        assert_eq!(churny.predict(&fv).unwrap(), 1);
        assert_eq!(safe.predict(&fv).unwrap(), 0);
    }

    #[test]
    fn test_schema_mismatch_reports_diff() {
        let mut names: Vec<String> = column_names().iter().map(|n| n.to_string()).collect();
        names[0] = "gender_Male".to_string();
        let coefficients = vec![0.0; names.len()];
        let model = ChurnModel::from_parts(names, coefficients, 0.0, 0.5).unwrap();

        let fv = encode(&RawInput::default()).unwrap();
        match model.predict(&fv) {
            Err(EncodeError::SchemaMismatch {
                missing,
                unexpected,
                ..
            }) => {
                assert_eq!(missing, vec!["gender_Male".to_string()]);
                assert_eq!(unexpected, vec!["gender".to_string()]);
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_matches_predict() {
        let model = test_model(|n| if n == "Contract_Two year" { -2.0 } else { 0.1 }, 0.5);
        let fv = encode(&RawInput::default()).unwrap();
        let [_, p_churn] = model.predict_proba(&fv).unwrap();
        assert_eq!(model.predict(&fv).unwrap(), model.classify(p_churn));

        // Threshold boundary is inclusive on the churn side
        assert_eq!(model.classify(0.5), 1);
        assert_eq!(model.classify(0.49), 0);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let path = std::env::temp_dir().join("churn-model-malformed.json");
        std::fs::write(&path, "{ \"feature_names\": [").unwrap();
        assert!(matches!(
            ChurnModel::load(&path),
            Err(ArtifactError::Parse { .. })
        ));
    }

    #[test]
    fn test_coefficient_length_mismatch_rejected() {
        let names: Vec<String> = column_names().iter().map(|n| n.to_string()).collect();
        let result = ChurnModel::from_parts(names, vec![0.0; 5], 0.0, 0.5);
        assert!(matches!(result, Err(ArtifactError::Inconsistent(_))));
    }
}
