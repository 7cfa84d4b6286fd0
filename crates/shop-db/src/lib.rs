//! # shop-db
//!
//! Postgres implementations of the shop-core store traits.
//!
//! Each store holds a cloned `PgPool` handle; connections are acquired per
//! operation with a bounded timeout and released when the operation ends,
//! success or failure.

pub mod cart;
pub mod products;
pub mod users;

use shop_core::{ShopError, ShopResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

pub use cart::PgCartStore;
pub use products::PgProductSource;
pub use users::PgCredentialStore;

/// Embedded migrations (see `migrations/`)
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Connect a pool with bounded acquire timeouts.
pub async fn connect(database_url: &str) -> ShopResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .map_err(|e| ShopError::Database(format!("failed to connect: {e}")))?;

    tracing::info!("Connected to Postgres");
    Ok(pool)
}

/// Map a storage failure; raw detail stays server-side.
pub(crate) fn db_err(e: sqlx::Error) -> ShopError {
    ShopError::Database(e.to_string())
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
