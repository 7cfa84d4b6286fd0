//! Read-only product access.

use crate::db_err;
use async_trait::async_trait;
use shop_core::{Product, ProductKind, ProductSource, ShopError, ShopResult};
use sqlx::PgPool;

/// Postgres-backed `ProductSource`.
#[derive(Clone)]
pub struct PgProductSource {
    pool: PgPool,
}

impl PgProductSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: i64,
    name: String,
    kind: String,
    price: i64,
    payment_reference: String,
    image_url: Option<String>,
    description: Option<String>,
}

impl ProductRow {
    fn into_product(self) -> ShopResult<Product> {
        let kind: ProductKind = self.kind.parse().map_err(|_| {
            ShopError::Database(format!(
                "product {} has unknown kind '{}'",
                self.product_id, self.kind
            ))
        })?;

        Ok(Product {
            product_id: self.product_id,
            name: self.name,
            kind,
            price: self.price,
            payment_reference: self.payment_reference,
            image_url: self.image_url,
            description: self.description,
        })
    }
}

const PRODUCT_COLUMNS: &str =
    "product_id, name, kind, price, payment_reference, image_url, description";

#[async_trait]
impl ProductSource for PgProductSource {
    async fn product_by_id(&self, product_id: i64) -> ShopResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1"
        ))
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(ProductRow::into_product).transpose()
    }

    async fn products_by_kind(&self, kind: ProductKind) -> ShopResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE kind = $1 ORDER BY name"
        ))
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }
}
