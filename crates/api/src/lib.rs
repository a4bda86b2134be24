//! Churn Prediction API Server
//!
//! REST surface over the frozen scaler/model artifacts: one prediction
//! endpoint, health, and schema introspection for form surfaces.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use model_runtime::ChurnScorer;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod routes;
mod settings;

pub use settings::Settings;

/// Application state shared across handlers. The scorer is loaded once at
/// startup and read-only afterwards, so no lock is needed.
pub struct AppState {
    /// Frozen artifacts and scoring pipeline
    pub scorer: ChurnScorer,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state around a loaded scorer
    pub fn new(scorer: ChurnScorer) -> Self {
        Self {
            scorer,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub artifacts: ArtifactStatus,
}

/// Loaded artifact summary
#[derive(Debug, Serialize)]
pub struct ArtifactStatus {
    pub feature_columns: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/predict", post(routes::predict))
        .route("/api/v1/schema", get(routes::get_schema))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        artifacts: ArtifactStatus {
            feature_columns: state.scorer.feature_names().len(),
        },
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Load the artifacts and run the server until shutdown
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let scorer = ChurnScorer::load(
        &settings.artifacts.scaler_path,
        &settings.artifacts.model_path,
    )?;
    let state = Arc::new(AppState::new(scorer));
    let app = create_router(state);

    let addr = settings.bind_addr();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
