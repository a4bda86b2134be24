//! Fitted Scaler Artifact

use crate::ArtifactError;
use feature_encoder::{EncodeError, FeatureVector, NUMERIC_COLUMNS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Standard-scaler parameters exported from the training pipeline.
/// `transform` is `(x - mean) / scale`, applied to exactly the three numeric
/// columns and never to the indicator columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    /// Columns the scaler was fitted on, in fitting order
    columns: Vec<String>,
    mean: [f64; 3],
    scale: [f64; 3],
}

impl ScalerArtifact {
    /// Load from a JSON parameter file and check internal consistency
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let artifact: Self =
            serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        artifact.check()?;
        info!(path = %path.display(), columns = ?artifact.columns, "scaler artifact loaded");
        Ok(artifact)
    }

    /// Build from already-validated parameters (tests, embedded defaults)
    pub fn from_parts(mean: [f64; 3], scale: [f64; 3]) -> Result<Self, ArtifactError> {
        let artifact = Self {
            columns: NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect(),
            mean,
            scale,
        };
        artifact.check()?;
        Ok(artifact)
    }

    /// Pass-through scaler, handy in tests
    pub fn identity() -> Self {
        Self {
            columns: NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect(),
            mean: [0.0; 3],
            scale: [1.0; 3],
        }
    }

    fn check(&self) -> Result<(), ArtifactError> {
        if self.columns != NUMERIC_COLUMNS {
            return Err(ArtifactError::Inconsistent(format!(
                "scaler fitted on {:?}, expected {:?}",
                self.columns, NUMERIC_COLUMNS
            )));
        }
        for (i, s) in self.scale.iter().enumerate() {
            if !s.is_finite() || *s == 0.0 {
                return Err(ArtifactError::Inconsistent(format!(
                    "scale[{i}] = {s} for column {}",
                    self.columns[i]
                )));
            }
        }
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err(ArtifactError::Inconsistent("non-finite mean".to_string()));
        }
        Ok(())
    }

    /// Rescale a raw numeric vector, in scaler column order
    pub fn transform(&self, raw: [f64; 3]) -> [f64; 3] {
        [
            (raw[0] - self.mean[0]) / self.scale[0],
            (raw[1] - self.mean[1]) / self.scale[1],
            (raw[2] - self.mean[2]) / self.scale[2],
        ]
    }

    /// Rescale the numeric slots of an encoded feature vector in place.
    /// Indicator columns are never touched. A vector missing any numeric
    /// column fails here, before it can reach the model.
    pub fn apply(&self, features: &mut FeatureVector) -> Result<(), EncodeError> {
        let mut raw = [0.0; 3];
        let mut missing = Vec::new();
        for (slot, column) in raw.iter_mut().zip(NUMERIC_COLUMNS) {
            match features.get(column) {
                Some(value) => *slot = value,
                None => missing.push(column.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(EncodeError::SchemaMismatch {
                missing,
                unexpected: Vec::new(),
                expected: NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect(),
                actual: features.columns().iter().map(|c| c.to_string()).collect(),
            });
        }

        let scaled = self.transform(raw);
        for (column, value) in NUMERIC_COLUMNS.iter().copied().zip(scaled) {
            features.set(column, value);
        }
        Ok(())
    }
}
