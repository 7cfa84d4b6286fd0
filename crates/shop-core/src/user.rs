//! # User Types
//!
//! A user and the credential record used at sign-in. The hashed secret
//! lives only on `Credential`, which is never serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user. Every user owns exactly one cart from the moment
/// the user row exists; the two are created in the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub cart_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Internal credential record for sign-in. Carries the stored PHC hash;
/// deliberately not `Serialize` so it cannot leak into a response.
#[derive(Debug, Clone)]
pub struct Credential {
    pub user: User,
    pub hashed_secret: String,
}
