use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// JSON body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Page error: {0}")]
    Page(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TimeError> for ApiError {
    fn from(e: TimeError) -> Self {
        match e {
            TimeError::InvalidTimezone(tz) => ApiError::InvalidTimezone(tz),
        }
    }
}

#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Unknown timezone: {0:?}")]
    InvalidTimezone(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(String),

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}

impl ApiError {
    /// Status and public message; internal details never leave the server
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::MissingParameter(_) => (StatusCode::BAD_REQUEST, "Timezone is required"),
            ApiError::InvalidTimezone(_) => (StatusCode::BAD_REQUEST, "Invalid timezone"),
            ApiError::Render(_) | ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate image")
            }
            ApiError::Page(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Rejected request");
        }

        let body = Json(ErrorResponse {
            error: message.to_string(),
        });

        (status, body).into_response()
    }
}
