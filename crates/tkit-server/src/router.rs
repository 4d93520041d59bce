use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler::{self, AppState};

/// Build the axum router with all tkit endpoints.
pub fn build_router(config: ServerConfig) -> Router {
    let allow_cors = config.allow_cors;
    let body_limit = config.max_body_bytes;
    let state = AppState::new(config);

    let router = Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/diff", post(handler::diff_handler))
        .route("/v1/diff/text", post(handler::diff_text_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if allow_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
