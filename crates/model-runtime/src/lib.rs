//! Artifact Loading and Churn Scoring
//!
//! Loads the externally fitted scaler and classifier parameters once at
//! startup, then scores requests through encode -> scale -> schema check ->
//! predict. Artifacts are frozen after load and safe to share across
//! requests without locking.

mod classifier;
mod scaler;
mod scorer;

pub use classifier::ChurnModel;
pub use scaler::ScalerArtifact;
pub use scorer::{ChurnLabel, ChurnPrediction, ChurnScorer};

use feature_encoder::EncodeError;
use thiserror::Error;

/// Errors while loading an artifact; fatal at startup
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact is inconsistent: {0}")]
    Inconsistent(String),
}

/// Errors while scoring one request
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
