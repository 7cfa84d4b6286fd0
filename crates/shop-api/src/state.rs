//! # Application State
//!
//! Shared state for the Axum application: store handles, the checkout
//! coordinator, the password hasher and the token issuer.

use chrono::Duration;
use shop_core::{
    BoxedCartStore, BoxedCredentialStore, BoxedPaymentGateway, BoxedProductSource,
    CheckoutCoordinator, CheckoutUrls, PasswordHasher, ShopError, TokenIssuer,
};
use shop_db::{PgCartStore, PgCredentialStore, PgProductSource};
use shop_stripe::StripeGateway;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL for checkout success/cancel callbacks
    pub base_url: String,
    /// Postgres connection string
    pub database_url: String,
    /// HMAC secret for session tokens
    pub token_secret: String,
    /// Optional token lifetime in hours; unset means tokens never expire
    pub token_ttl_hours: Option<i64>,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables.
    ///
    /// Required env vars:
    /// - `DATABASE_URL`
    /// - `TOKEN_SECRET`
    pub fn from_env() -> Result<Self, ShopError> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ShopError::Configuration("DATABASE_URL not set".to_string()))?;
        let token_secret = std::env::var("TOKEN_SECRET")
            .map_err(|_| ShopError::Configuration("TOKEN_SECRET not set".to_string()))?;

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            database_url,
            token_secret,
            token_ttl_hours: std::env::var("TOKEN_TTL_HOURS")
                .ok()
                .and_then(|h| h.parse().ok()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    fn token_issuer(&self) -> TokenIssuer {
        match self.token_ttl_hours {
            Some(hours) => TokenIssuer::with_ttl(self.token_secret.as_bytes(), Duration::hours(hours)),
            None => TokenIssuer::new(self.token_secret.as_bytes()),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// User/credential store
    pub users: BoxedCredentialStore,
    /// Cart line-item store
    pub carts: BoxedCartStore,
    /// Read-only catalog access
    pub products: BoxedProductSource,
    /// Cart-to-payment-request coordinator
    pub checkout: Arc<CheckoutCoordinator>,
    /// Password hasher
    pub hasher: Arc<PasswordHasher>,
    /// Session token issuer/verifier
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    /// Assemble state from explicit collaborators (tests pass in doubles)
    pub fn new(
        users: BoxedCredentialStore,
        carts: BoxedCartStore,
        products: BoxedProductSource,
        gateway: BoxedPaymentGateway,
        tokens: TokenIssuer,
        urls: CheckoutUrls,
    ) -> Self {
        Self {
            users,
            carts,
            products: products.clone(),
            checkout: Arc::new(CheckoutCoordinator::new(products, gateway, urls)),
            hasher: Arc::new(PasswordHasher::new()),
            tokens: Arc::new(tokens),
        }
    }

    /// Production wiring: Postgres stores and the Stripe gateway.
    /// Runs pending migrations before serving.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = shop_db::connect(&config.database_url).await?;
        shop_db::MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| anyhow::anyhow!("migration failed: {e}"))?;

        let gateway = StripeGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {e}"))?;

        Ok(Self::new(
            Arc::new(PgCredentialStore::new(pool.clone())),
            Arc::new(PgCartStore::new(pool.clone())),
            Arc::new(PgProductSource::new(pool)),
            Arc::new(gateway),
            config.token_issuer(),
            CheckoutUrls::new(&config.base_url),
        ))
    }
}
