//! # API Error Responses
//!
//! Maps `ShopError` onto HTTP responses. Client-caused errors echo their
//! message; server-side failure detail is logged and replaced with a
//! generic body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shop_core::ShopError;
use tracing::error;

/// JSON error body: `{"error": "...", "code": 409}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Newtype so `?` works in handlers returning `Result<_, ApiError>`
#[derive(Debug)]
pub struct ApiError(pub ShopError);

impl From<ShopError> for ApiError {
    fn from(err: ShopError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.status_code();
        let message = if self.0.is_client_safe() {
            self.0.to_string()
        } else if matches!(self.0, ShopError::Gateway(_)) {
            error!("payment gateway failure: {}", self.0);
            "checkout unavailable".to_string()
        } else {
            error!("internal failure: {}", self.0);
            "internal server error".to_string()
        };

        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse { error: message, code })).into_response()
    }
}
