use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use menu_grid_core::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Failed to load menu data: {0}")]
    LoadFailed(String),

    #[error("Failed to save menu data: {0}")]
    SaveFailed(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// Classify a store error raised while serving a read.
    pub fn on_load(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::LoadFailed(other.to_string()),
        }
    }

    /// Classify a store error raised while applying a write.
    pub fn on_save(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(id) => ApiError::NotFound(format!("menu {}", id)),
            DomainError::InvalidPayload(msg) => ApiError::BadRequest(msg),
            other => ApiError::SaveFailed(other.to_string()),
        }
    }
}

// Clients read `error` after a GET and `message` after a POST, so both keys
// are always present.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BadRequest", msg)
            }
            ApiError::LoadFailed(msg) => {
                tracing::error!("Failed to load menu data: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to load menu data",
                    "Failed to load menu data".to_string(),
                )
            }
            ApiError::SaveFailed(msg) => {
                tracing::error!("Error saving menu data: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to save menu data",
                    "Failed to save menu data".to_string(),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
