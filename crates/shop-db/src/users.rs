//! User and credential persistence.

use crate::{db_err, is_unique_violation};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shop_core::{Credential, CredentialStore, ShopError, ShopResult, User};
use sqlx::PgPool;
use tracing::instrument;

/// Postgres-backed `CredentialStore`.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct InsertedUserRow {
    user_id: i64,
    username: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    user_id: i64,
    username: String,
    hashed_secret: String,
    cart_id: i64,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    #[instrument(skip(self, hashed_secret))]
    async fn register(&self, username: &str, hashed_secret: &str) -> ShopResult<User> {
        // User row and cart row commit together; a failed cart insert
        // rolls the user back too.
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let row = sqlx::query_as::<_, InsertedUserRow>(
            "INSERT INTO users (username, hashed_secret) \
             VALUES ($1, $2) \
             RETURNING user_id, username, created_at",
        )
        .bind(username)
        .bind(hashed_secret)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ShopError::DuplicateUsername {
                    username: username.to_string(),
                }
            } else {
                db_err(e)
            }
        })?;

        let cart_id: i64 =
            sqlx::query_scalar("INSERT INTO carts (user_id) VALUES ($1) RETURNING cart_id")
                .bind(row.user_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        Ok(User {
            user_id: row.user_id,
            username: row.username,
            cart_id,
            created_at: row.created_at,
        })
    }

    async fn find_by_username(&self, username: &str) -> ShopResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT u.user_id, u.username, u.hashed_secret, c.cart_id, u.created_at \
             FROM users u \
             JOIN carts c ON c.user_id = u.user_id \
             WHERE u.username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(|r| Credential {
            user: User {
                user_id: r.user_id,
                username: r.username,
                cart_id: r.cart_id,
                created_at: r.created_at,
            },
            hashed_secret: r.hashed_secret,
        }))
    }
}
