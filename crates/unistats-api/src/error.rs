use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;
use unistats_core::CoreError;
use unistats_db::DbError;
use unistats_github::GithubError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Database error
    Database(DbError),

    /// GitHub API error (upstream failure)
    Github(GithubError),

    /// Core logic error
    Core(CoreError),

    /// Not found (404)
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Database(e) => write!(f, "Database error: {}", e),
            ApiError::Github(e) => write!(f, "GitHub error: {}", e),
            ApiError::Core(e) => write!(f, "Core error: {}", e),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error response JSON structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::Database(DbError::RowNotFound(table, id)) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{} {} does not exist", table, id),
            ),
            ApiError::Database(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                e.to_string(),
            ),
            ApiError::Github(e) => (StatusCode::BAD_GATEWAY, "github_error", e.to_string()),
            ApiError::Core(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "core_error",
                e.to_string(),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(error_response)).into_response()
    }
}

// Conversions from domain errors to ApiError
impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        ApiError::Database(e)
    }
}

impl From<GithubError> for ApiError {
    fn from(e: GithubError) -> Self {
        ApiError::Github(e)
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Core(e)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
