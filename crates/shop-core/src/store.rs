//! # Store Traits
//!
//! Seams between the trust/transaction core and the backing store. The
//! Postgres implementations live in `shop-db`; tests substitute in-memory
//! doubles.

use crate::cart::{CartItem, CartLine};
use crate::error::ShopResult;
use crate::product::{Product, ProductKind};
use crate::user::{Credential, User};
use async_trait::async_trait;
use std::sync::Arc;

/// Persists user records. The hard invariant: one user, one cart, from the
/// user's very first observable state.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a user with an already-hashed secret and create its empty
    /// cart in the same logical transaction. Both succeed or both fail.
    ///
    /// Uniqueness is enforced by the storage layer, not a read-then-write
    /// check: a taken username fails with `DuplicateUsername` regardless of
    /// concurrent ordering.
    async fn register(&self, username: &str, hashed_secret: &str) -> ShopResult<User>;

    /// Look up a user and its stored hash by exact username.
    async fn find_by_username(&self, username: &str) -> ShopResult<Option<Credential>>;
}

/// Persists per-cart line items.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Add `quantity` of a product to a cart. If the `(cart_id,
    /// product_id)` row already exists its quantity is incremented — a
    /// single conditional upsert, race-free under concurrent adds.
    async fn add_item(&self, cart_id: i64, product_id: i64, quantity: i32)
        -> ShopResult<CartItem>;

    /// Delete a row if present. Absence is not an error.
    async fn remove_item(&self, cart_id: i64, product_id: i64) -> ShopResult<()>;

    /// All lines in a cart, joined with product display fields.
    async fn list_items(&self, cart_id: i64) -> ShopResult<Vec<CartLine>>;
}

/// Read-only catalog collaborator.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn product_by_id(&self, product_id: i64) -> ShopResult<Option<Product>>;

    async fn products_by_kind(&self, kind: ProductKind) -> ShopResult<Vec<Product>>;
}

pub type BoxedCredentialStore = Arc<dyn CredentialStore>;
pub type BoxedCartStore = Arc<dyn CartStore>;
pub type BoxedProductSource = Arc<dyn ProductSource>;
