use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::TemplateService;

/// Serve the timezone picker page
pub async fn handle_index(
    State(templates): State<Arc<TemplateService>>,
    State(config): State<Arc<AppConfig>>,
) -> Result<Html<String>, ApiError> {
    let html = templates
        .render_index(&config)
        .map_err(|e| ApiError::Page(e.to_string()))?;
    Ok(Html(html))
}
