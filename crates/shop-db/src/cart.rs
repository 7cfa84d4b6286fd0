//! Cart item persistence.

use crate::db_err;
use async_trait::async_trait;
use shop_core::{CartItem, CartLine, CartStore, ShopError, ShopResult};
use sqlx::PgPool;

/// Postgres-backed `CartStore`.
#[derive(Clone)]
pub struct PgCartStore {
    pool: PgPool,
}

impl PgCartStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CartItemRow {
    cart_id: i64,
    product_id: i64,
    quantity: i32,
}

#[derive(sqlx::FromRow)]
struct CartLineRow {
    cart_id: i64,
    product_id: i64,
    quantity: i32,
    name: String,
    price: i64,
    image_url: Option<String>,
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn add_item(
        &self,
        cart_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> ShopResult<CartItem> {
        if quantity <= 0 {
            return Err(ShopError::InvalidQuantity {
                quantity: quantity as i64,
            });
        }

        // Single conditional upsert: two concurrent adds of the same
        // product sum their quantities instead of one overwriting the other.
        let row = sqlx::query_as::<_, CartItemRow>(
            "INSERT INTO cart_items (cart_id, product_id, quantity) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (cart_id, product_id) \
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity \
             RETURNING cart_id, product_id, quantity",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(CartItem {
            cart_id: row.cart_id,
            product_id: row.product_id,
            quantity: row.quantity,
        })
    }

    async fn remove_item(&self, cart_id: i64, product_id: i64) -> ShopResult<()> {
        // Idempotent: deleting an absent row is not an error.
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart_id)
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn list_items(&self, cart_id: i64) -> ShopResult<Vec<CartLine>> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            "SELECT ci.cart_id, ci.product_id, ci.quantity, \
                    p.name, p.price, p.image_url \
             FROM cart_items ci \
             JOIN products p ON p.product_id = ci.product_id \
             WHERE ci.cart_id = $1 \
             ORDER BY p.name",
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|r| CartLine {
                cart_id: r.cart_id,
                product_id: r.product_id,
                quantity: r.quantity,
                name: r.name,
                price: r.price,
                image_url: r.image_url,
            })
            .collect())
    }
}
