//! # Bearer-Token Extraction
//!
//! The authorization gate for cart and checkout routes. A handler taking
//! `AuthSession` cannot run without a verified token, and the claims it
//! receives (the cart id above all) came from the signature-checked
//! payload, never from the request body.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use shop_core::{SessionClaims, ShopError};

/// Verified session identity, extracted from the `Authorization` header
#[derive(Debug, Clone)]
pub struct AuthSession(pub SessionClaims);

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                ApiError(ShopError::InvalidToken(
                    "missing bearer token".to_string(),
                ))
            })?;

        let claims = state.tokens.verify(token).map_err(ApiError)?;
        Ok(Self(claims))
    }
}
