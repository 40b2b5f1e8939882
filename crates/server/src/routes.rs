use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::rpc;
use crate::state::AppState;

/// Liveness probe; same payload as the `healthcheck` procedure, unwrapped.
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: health probe, procedure endpoint and
/// the static site with SPA fallback.
pub fn build_router(state: AppState, cors: CorsLayer, frontend_dir: &str) -> Router {
    let static_dir = ServeDir::new(frontend_dir)
        .fallback(ServeFile::new(format!("{}/index.html", frontend_dir.trim_end_matches('/'))));

    Router::new()
        .route("/health", get(health))
        .route("/rpc/:procedure", get(rpc::handle_get).post(rpc::handle_post))
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
