//! Live-Postgres integration tests.
//!
//! Ignored by default; run against a scratch database with:
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/shop_test cargo test -p shop-db -- --ignored
//! ```

use shop_core::{CartStore, CredentialStore, ShopError};
use shop_db::{PgCartStore, PgCredentialStore};
use sqlx::PgPool;

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for pg tests");
    let pool = shop_db::connect(&url).await.expect("connect");
    shop_db::MIGRATOR.run(&pool).await.expect("migrate");
    pool
}

fn unique_username(prefix: &str) -> String {
    format!("{prefix}-{}", chrono::Utc::now().timestamp_nanos_opt().unwrap())
}

async fn seed_product(pool: &PgPool, name: &str, price: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO products (name, kind, price, payment_reference) \
         VALUES ($1, 'weapon', $2, $3) RETURNING product_id",
    )
    .bind(name)
    .bind(price)
    .bind(format!("price_{name}"))
    .fetch_one(pool)
    .await
    .expect("seed product")
}

#[tokio::test]
#[ignore = "requires a Postgres instance via DATABASE_URL"]
async fn register_creates_user_and_cart_together() {
    let pool = test_pool().await;
    let store = PgCredentialStore::new(pool.clone());

    let username = unique_username("atomic");
    let user = store.register(&username, "$argon2id$stub").await.unwrap();

    let cart_owner: i64 = sqlx::query_scalar("SELECT user_id FROM carts WHERE cart_id = $1")
        .bind(user.cart_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(cart_owner, user.user_id);

    let found = store.find_by_username(&username).await.unwrap().unwrap();
    assert_eq!(found.user.cart_id, user.cart_id);
}

#[tokio::test]
#[ignore = "requires a Postgres instance via DATABASE_URL"]
async fn duplicate_username_hits_unique_constraint() {
    let pool = test_pool().await;
    let store = PgCredentialStore::new(pool);

    let username = unique_username("dup");
    store.register(&username, "$argon2id$stub").await.unwrap();

    let err = store.register(&username, "$argon2id$stub").await.unwrap_err();
    assert!(matches!(err, ShopError::DuplicateUsername { .. }));
}

#[tokio::test]
#[ignore = "requires a Postgres instance via DATABASE_URL"]
async fn concurrent_adds_sum_into_one_row() {
    let pool = test_pool().await;
    let users = PgCredentialStore::new(pool.clone());
    let carts = PgCartStore::new(pool.clone());

    let user = users
        .register(&unique_username("race"), "$argon2id$stub")
        .await
        .unwrap();
    let product_id = seed_product(&pool, &unique_username("p"), 1000).await;

    let (a, b) = tokio::join!(
        carts.add_item(user.cart_id, product_id, 2),
        carts.add_item(user.cart_id, product_id, 3),
    );
    a.unwrap();
    b.unwrap();

    let lines = carts.list_items(user.cart_id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 5);
}

#[tokio::test]
#[ignore = "requires a Postgres instance via DATABASE_URL"]
async fn remove_missing_item_is_a_noop() {
    let pool = test_pool().await;
    let users = PgCredentialStore::new(pool.clone());
    let carts = PgCartStore::new(pool);

    let user = users
        .register(&unique_username("noop"), "$argon2id$stub")
        .await
        .unwrap();

    carts.remove_item(user.cart_id, 424242).await.unwrap();
    assert!(carts.list_items(user.cart_id).await.unwrap().is_empty());
}
