//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{Path, Query, State},
    http::{header::CACHE_CONTROL, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::error::ApiError;
use crate::models::{AmbientRequest, AppConfig, GenreQuery};
use crate::services::{AmbientService, CoverSource, HttpCoverSource};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service: Arc<AmbientService>,
}

/// Create application state that fetches covers over HTTP.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let source = HttpCoverSource::new(&config.fetch)
        .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {e}"))?;
    Ok(create_app_state_with_source(config, Arc::new(source)))
}

/// Create application state with a custom cover source.
pub fn create_app_state_with_source(config: AppConfig, source: Arc<dyn CoverSource>) -> AppState {
    let config = Arc::new(config);
    let service = Arc::new(AmbientService::new(config.clone(), source));

    AppState { config, service }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
/// Responses carry `Cache-Control: no-store` since the committed state for
/// a book changes with every extraction.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/ambient", post(handle_extract))
        .route("/api/ambient/:book_id", get(handle_current))
        .route("/api/genre", get(handle_genre))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_extract(
    State(state): State<AppState>,
    request: Json<AmbientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    api::handle_extract(State(state.service), request).await
}

async fn handle_current(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    api::handle_current(State(state.service), path).await
}

async fn handle_genre(query: Query<GenreQuery>) -> impl IntoResponse {
    api::handle_genre(query).await
}
