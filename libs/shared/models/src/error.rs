use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// One itemized problem with a submitted form, as sent back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<FieldError>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
            AppError::Storage(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("Помилка збереження: {}", msg) }),
            ),
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Validation failed",
                    "errors": errors,
                }),
            ),
        };

        match &self {
            // Rejected form input is expected traffic, not a server fault
            AppError::Validation(_) | AppError::BadRequest(_) => {
                tracing::warn!("Request rejected: {}: {}", status, self)
            }
            _ => tracing::error!("Error: {}: {}", status, self),
        }

        (status, Json(body)).into_response()
    }
}
