use axum::{http::StatusCode, Json};
use serde_json::json;
use thiserror::Error;

/// Failures of collection operations. The schedule functions themselves
/// never fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreakError {
    #[error("streak {0} not found")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("streak {0} cannot be completed today")]
    NotClickable(String),

    #[error("reorder must list every streak exactly once")]
    InvalidOrder,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StreakError> for AppError {
    fn from(err: StreakError) -> Self {
        let message = err.to_string();
        match err {
            StreakError::NotFound(_) => Self::not_found(message),
            StreakError::NotClickable(_) => Self::conflict(message),
            StreakError::Validation(_) | StreakError::InvalidOrder => Self::bad_request(message),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
