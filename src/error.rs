use thiserror::Error;
use serde_json::json;

use axum::{
    Json,
    response::{IntoResponse, Response},
    http::StatusCode,
};


#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid template ID")]
    InvalidId,
    #[error("{0}")]
    NotFound(String),
    #[error("Unsupported file type '{0}'. Only jpeg, png and gif are allowed")]
    UnsupportedType(String),
    #[error("File exceeds the {0} byte upload limit")]
    TooLarge(usize),
    #[error("Layout file unreadable: {0}")]
    Layout(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::InvalidId => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::UnsupportedType(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::TooLarge(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Layout(ref e) => {
                tracing::error!("Layout file unreadable: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Error reading layout file".to_string())
            }
            ApiError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage failure. Please try again.".to_string())
            }
            ApiError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
