//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header::CACHE_CONTROL, HeaderValue},
    response::{Html, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{RenderService, TemplateService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub renderer: Arc<RenderService>,
    pub templates: Arc<TemplateService>,
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = Arc::new(AppConfig::load_from_assets(&asset_loader));
    create_app_state_with_config(&asset_loader, config)
}

/// Create application state with an already loaded configuration.
pub fn create_app_state_with_config(
    asset_loader: &AssetLoader,
    config: Arc<AppConfig>,
) -> anyhow::Result<AppState> {
    let templates = Arc::new(
        TemplateService::new().map_err(|e| anyhow::anyhow!("Failed to load templates: {e}"))?,
    );
    let renderer = Arc::new(
        RenderService::new(asset_loader, &config, templates.clone())
            .map_err(|e| anyhow::anyhow!("Failed to create renderer: {e}"))?,
    );

    Ok(AppState {
        config,
        renderer,
        templates,
    })
}

/// Build the router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. Images are
/// time dependent, so the image route tells clients not to cache them.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route(
            "/api/generate-image",
            get(handle_generate_image).layer(SetResponseHeaderLayer::overriding(
                CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            )),
        )
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_generate_image(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    api::handle_generate_image(State(state.renderer), query).await
}

async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    api::handle_index(State(state.templates), State(state.config)).await
}
