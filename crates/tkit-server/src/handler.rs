use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tkit_diff::{compare, render_report, Algorithm, Brackets, DiffError, Document, Report};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Shared, read-only handler state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config: Arc::new(config) }
    }
}

/// Body of `POST /v1/diff` and `POST /v1/diff/text`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiffRequest {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub algorithm: Option<Algorithm>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "tkit-server",
        "version": env!("CARGO_PKG_VERSION"),
        "algorithm": state.config.algorithm,
        "limits": state.config.limits,
    }))
}

/// Compare two texts and return the structured report.
pub async fn diff_handler(State(state): State<AppState>, body: Bytes) -> ServerResult<Json<Report>> {
    let report = run_comparison(&state, &body).await?;
    Ok(Json(report))
}

/// Compare two texts and return the bracketed text rendering.
pub async fn diff_text_handler(State(state): State<AppState>, body: Bytes) -> ServerResult<String> {
    let report = run_comparison(&state, &body).await?;
    Ok(render_report(&Brackets, &report))
}

async fn run_comparison(state: &AppState, body: &[u8]) -> ServerResult<Report> {
    let (source, target, algorithm) = prepare(&state.config, body)?;
    // Comparisons are CPU-bound; keep them off the async workers.
    tokio::task::spawn_blocking(move || compare(&source, &target, algorithm))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))
}

/// Parse and validate a request body. Rejections happen here, before the
/// engine sees any input.
fn prepare(config: &ServerConfig, body: &[u8]) -> ServerResult<(Document, Document, Algorithm)> {
    let request: DiffRequest = serde_json::from_slice(body)
        .map_err(|e| DiffError::InvalidInput(format!("malformed request body: {e}")))?;
    let source = config.limits.text("source", &request.source)?;
    let target = config.limits.text("target", &request.target)?;
    Ok((source, target, request.algorithm.unwrap_or(config.algorithm)))
}
