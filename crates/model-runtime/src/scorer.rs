//! Churn Scoring Pipeline

use crate::{ArtifactError, ChurnModel, ScalerArtifact, ScoreError};
use feature_encoder::{encode, FeatureVector, RawInput};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Prediction label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChurnLabel {
    /// Customer predicted to stay
    Retained,
    /// Customer predicted to cancel
    Churn,
}

impl ChurnLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChurnLabel::Retained => "retained",
            ChurnLabel::Churn => "churn",
        }
    }
}

/// Scoring result for one submission
#[derive(Debug, Clone, Serialize)]
pub struct ChurnPrediction {
    pub label: ChurnLabel,
    /// Churn probability in [0, 1]
    pub probability: f64,
    /// Class probabilities [retained, churn]
    pub probabilities: [f64; 2],
    /// The scaled feature vector, for display and debugging
    pub features: FeatureVector,
}

/// Owns the frozen artifacts and runs encode -> scale -> schema check ->
/// predict. Constructed once at startup and shared read-only across
/// requests; scoring takes `&self` and no locks.
pub struct ChurnScorer {
    scaler: ScalerArtifact,
    model: ChurnModel,
}

impl ChurnScorer {
    /// Load both artifacts; any failure here aborts startup
    pub fn load(
        scaler_path: impl AsRef<Path>,
        model_path: impl AsRef<Path>,
    ) -> Result<Self, ArtifactError> {
        let scaler = ScalerArtifact::load(scaler_path)?;
        let model = ChurnModel::load(model_path)?;
        Ok(Self::from_parts(scaler, model))
    }

    pub fn from_parts(scaler: ScalerArtifact, model: ChurnModel) -> Self {
        Self { scaler, model }
    }

    /// Columns the model expects, for schema introspection
    pub fn feature_names(&self) -> &[String] {
        self.model.feature_names()
    }

    /// Score one submission
    pub fn score(&self, input: &RawInput) -> Result<ChurnPrediction, ScoreError> {
        let mut features = encode(input)?;
        self.scaler.apply(&mut features)?;
        let probabilities = self.model.predict_proba(&features)?;
        let label = if self.model.classify(probabilities[1]) == 1 {
            ChurnLabel::Churn
        } else {
            ChurnLabel::Retained
        };

        debug!(
            label = label.as_str(),
            p_churn = probabilities[1],
            "scored submission"
        );
        Ok(ChurnPrediction {
            label,
            probability: probabilities[1],
            probabilities,
            features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_encoder::{column_names, EncodeError, NUMERIC_COLUMNS};

    fn scorer_with_weights(weights: impl Fn(&str) -> f64, intercept: f64) -> ChurnScorer {
        let names: Vec<String> = column_names().iter().map(|n| n.to_string()).collect();
        let coefficients = names.iter().map(|n| weights(n)).collect();
        let model = ChurnModel::from_parts(names, coefficients, intercept, 0.5).unwrap();
        ChurnScorer::from_parts(ScalerArtifact::identity(), model)
    }

    #[test]
    fn test_score_end_to_end() {
        // Month-to-month on electronic check leans churn, two-year leans safe
        let scorer = scorer_with_weights(
            |name| match name {
                "Contract_Two year" => -2.0,
                "PaymentMethod_Electronic check" => 1.5,
                "tenure" => -0.05,
                _ => 0.0,
            },
            0.8,
        );

        let churny = RawInput {
            tenure: 1.0,
            payment_method: "Electronic check".to_string(),
            ..RawInput::default()
        };
        let result = scorer.score(&churny).unwrap();
        assert_eq!(result.label, ChurnLabel::Churn);
        assert!(result.probability > 0.5);

        let safe = RawInput {
            tenure: 60.0,
            contract: "Two year".to_string(),
            ..RawInput::default()
        };
        let result = scorer.score(&safe).unwrap();
        assert_eq!(result.label, ChurnLabel::Retained);
        assert!(result.probability < 0.5);
    }

    #[test]
    fn test_scaling_applied_before_prediction() {
        let names: Vec<String> = column_names().iter().map(|n| n.to_string()).collect();
        let coefficients = vec![0.0; names.len()];
        let model = ChurnModel::from_parts(names, coefficients, 0.0, 0.5).unwrap();
        let scaler =
            ScalerArtifact::from_parts([32.37, 64.76, 2283.3], [24.56, 30.09, 2266.77]).unwrap();
        let scorer = ChurnScorer::from_parts(scaler, model);

        let result = scorer.score(&RawInput::default()).unwrap();

        // Returned vector carries the scaled numerics
        let tenure = result.features.get("tenure").unwrap();
        assert!((tenure - (12.0 - 32.37) / 24.56).abs() < 1e-9);

        // Indicators survive scaling untouched
        for (name, value) in result.features.iter() {
            if !NUMERIC_COLUMNS.contains(&name) {
                assert!(value == 0.0 || value == 1.0, "{name} = {value}");
            }
        }
    }

    #[test]
    fn test_load_bundled_artifacts() {
        let root = concat!(env!("CARGO_MANIFEST_DIR"), "/../../artifacts");
        let scorer = ChurnScorer::load(
            format!("{root}/scaler.json"),
            format!("{root}/model.json"),
        )
        .unwrap();
        assert_eq!(scorer.feature_names(), column_names().as_slice());

        let result = scorer.score(&RawInput::default()).unwrap();
        assert!((0.0..=1.0).contains(&result.probability));
    }

    #[test]
    fn test_missing_artifact_is_fatal() {
        let result = ChurnScorer::load("/nonexistent/scaler.json", "/nonexistent/model.json");
        assert!(matches!(result, Err(ArtifactError::Io { .. })));
    }

    #[test]
    fn test_invalid_category_surfaces() {
        let scorer = scorer_with_weights(|_| 0.0, 0.0);
        let input = RawInput {
            contract: "Lifetime".to_string(),
            ..RawInput::default()
        };
        match scorer.score(&input) {
            Err(ScoreError::Encode(EncodeError::InvalidCategory { field, .. })) => {
                assert_eq!(field, "Contract");
            }
            other => panic!("expected InvalidCategory, got {:?}", other.map(|_| ())),
        }
    }
}
