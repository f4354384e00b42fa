use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::services::RenderService;

/// Query parameters for the image endpoint (documentation only)
///
/// The handler reads the raw pairs so that a repeated `timezone` key uses the
/// first value instead of rejecting the request.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GenerateImageQuery {
    /// IANA timezone identifier, e.g. `America/New_York`
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Render the current time in a timezone as a PNG image
///
/// Returns a 600x200 PNG. The image is rendered fresh for every request.
#[utoipa::path(
    get,
    path = "/api/generate-image",
    params(GenerateImageQuery),
    responses(
        (status = 200, description = "PNG image", body = Vec<u8>, content_type = "image/png"),
        (status = 400, description = "Missing or unknown timezone", body = crate::error::ErrorResponse),
        (status = 500, description = "Rendering failed", body = crate::error::ErrorResponse),
    ),
    tag = "Image"
)]
pub async fn handle_generate_image(
    State(renderer): State<Arc<RenderService>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unparseable query string");
            Vec::new()
        }
    };

    let timezone = first_timezone(&pairs).ok_or(ApiError::MissingParameter("timezone"))?;

    tracing::info!(timezone = %timezone, "Image request received");

    let png_bytes = renderer.render_time(timezone, chrono::Utc::now()).await?;

    tracing::debug!(
        timezone = %timezone,
        size_bytes = png_bytes.len(),
        "Image generated"
    );

    Ok(([(header::CONTENT_TYPE, "image/png")], Bytes::from(png_bytes)).into_response())
}

/// First `timezone` value in the query, unless it is empty
fn first_timezone(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "timezone")
        .map(|(_, value)| value.as_str())
        .filter(|tz| !tz.is_empty())
}
