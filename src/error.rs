use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Request-level failure taxonomy. Every handler returns `Result<_, ApiError>`
/// and the mapping to a wire response happens in exactly one place.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required input field is missing or empty.
    #[error("{0}")]
    Validation(String),
    /// Username already registered.
    #[error("username is already taken")]
    Conflict,
    /// Login with an unknown username or wrong password.
    #[error("invalid username or password")]
    BadCredentials,
    /// Protected route hit without a usable bearer credential.
    #[error("authentication required")]
    Unauthorized,
    /// Token failed signature or structural checks.
    #[error("invalid token")]
    InvalidToken,
    /// Token was once valid but its validity window has passed.
    #[error("token has expired")]
    TokenExpired,
    /// Unexpected persistence failure.
    #[error("storage error")]
    Store(#[from] sqlx::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict => StatusCode::BAD_REQUEST,
            ApiError::BadCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken | ApiError::TokenExpired => StatusCode::FORBIDDEN,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Store(e) => error!(error = %e, "storage failure"),
            ApiError::Internal(e) => error!(error = %e, "internal failure"),
            ApiError::InvalidToken | ApiError::TokenExpired => {
                warn!(reason = %self, "token rejected")
            }
            _ => {}
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
