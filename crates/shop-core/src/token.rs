//! # Session Tokens
//!
//! Stateless, signed identity assertions (HS256). The server holds no
//! session table: possession of a correctly-signed token is the sole
//! authorization proof, and the signature covers every claim so none can
//! be altered independently.

use crate::error::{ShopError, ShopResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
///
/// `cart_id` is the authorization-relevant claim: downstream cart
/// operations use it and never a client-supplied cart id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: i64,
    pub username: String,
    pub cart_id: i64,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds). Absent unless a TTL is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Signs and verifies session tokens against a server-held secret.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl TokenIssuer {
    /// Issuer for time-unbounded tokens (the default; matches source
    /// behavior where tokens never expired).
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: None,
        }
    }

    /// Issuer whose tokens expire after `ttl`.
    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // jsonwebtoken defaults to 60s of expiry leeway; the contract here
        // is that an expired token is invalid, full stop.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: Some(ttl),
        }
    }

    /// Sign a token asserting `(user_id, username, cart_id)`.
    pub fn issue(&self, user_id: i64, username: &str, cart_id: i64) -> ShopResult<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            user_id,
            username: username.to_string(),
            cart_id,
            iat: now.timestamp(),
            exp: self.ttl.map(|ttl| (now + ttl).timestamp()),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ShopError::Internal(format!("token signing failed: {e}")))
    }

    /// Verify a token and return its claims.
    ///
    /// Malformed structure, signature mismatch and expiry all collapse into
    /// `InvalidToken`; claims are never trusted unless verification passed.
    pub fn verify(&self, token: &str) -> ShopResult<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| ShopError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-signing-secret-at-least-32-bytes";

    #[test]
    fn test_issue_verify_round_trip() {
        let issuer = TokenIssuer::new(SECRET);
        let token = issuer.issue(7, "ana", 12).unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "ana");
        assert_eq!(claims.cart_id, 12);
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let issuer = TokenIssuer::new(SECRET);
        let token = issuer.issue(7, "ana", 12).unwrap();

        // Flip a character in the payload segment
        let mut chars: Vec<char> = token.chars().collect();
        let mid = token.len() / 2;
        chars[mid] = if chars[mid] == 'a' { 'b' } else { 'a' };
        let tampered: String = chars.into_iter().collect();

        assert!(matches!(
            issuer.verify(&tampered),
            Err(ShopError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenIssuer::new(SECRET);
        let other = TokenIssuer::new(b"a-completely-different-secret-value");

        let token = issuer.issue(7, "ana", 12).unwrap();
        assert!(matches!(
            other.verify(&token),
            Err(ShopError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let issuer = TokenIssuer::new(SECRET);
        assert!(matches!(
            issuer.verify("not.a.token"),
            Err(ShopError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = TokenIssuer::with_ttl(SECRET, Duration::seconds(-60));
        let token = issuer.issue(7, "ana", 12).unwrap();

        assert!(matches!(
            issuer.verify(&token),
            Err(ShopError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_ttl_token_carries_expiry() {
        let issuer = TokenIssuer::with_ttl(SECRET, Duration::hours(24));
        let token = issuer.issue(7, "ana", 12).unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert!(claims.exp.unwrap() > claims.iat);
    }
}
