//! Error types for the API.
//!
//! Every handler returns `Result<T, ApiError>`. Store failures convert with
//! `?` and render as a status code plus a JSON body:
//!
//! ```json
//! { "code": "insufficient_stock", "message": "Insufficient stock for product 1: available 2, requested 3" }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use tienda_store::StoreError;

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(err) => match err {
                StoreError::Validation(_) => StatusCode::BAD_REQUEST,
                StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                StoreError::Conflict(_) => StatusCode::CONFLICT,
                StoreError::InsufficientStock { .. } => StatusCode::CONFLICT,
                StoreError::EmptyCart { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                StoreError::Unauthorized => StatusCode::UNAUTHORIZED,
                StoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Store(err) => match err {
                StoreError::Validation(_) => "validation",
                StoreError::NotFound { .. } => "not_found",
                StoreError::Conflict(_) => "conflict",
                StoreError::InsufficientStock { .. } => "insufficient_stock",
                StoreError::EmptyCart { .. } => "empty_cart",
                StoreError::Unauthorized => "unauthorized",
                StoreError::Internal(_) => "internal",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Don't expose internal error details to clients
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
            self.to_string()
        };

        let body = ErrorBody {
            code: self.code().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type ApiResult<T> = Result<T, ApiError>;
