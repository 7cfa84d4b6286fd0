//! # Error Types
//!
//! Typed error handling for the storefront core.
//! All fallible operations return `Result<T, ShopError>`.

use thiserror::Error;

/// Core error type for all storefront operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration errors (missing env vars, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed input (missing fields, bad shapes)
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Cart quantity did not resolve to a positive integer
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// Username already taken (storage-level unique constraint)
    #[error("Username already exists: {username}")]
    DuplicateUsername { username: String },

    /// Bad credentials; never says which half of the pair was wrong
    #[error("invalid login")]
    InvalidCredentials,

    /// Token is malformed, mis-signed, or expired
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Valid token, wrong resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Stored password hash is not a parseable PHC string.
    /// Distinct from a failed verification: this means a corrupt record.
    #[error("Malformed stored secret: {0}")]
    HashFormat(String),

    /// Checkout attempted on a cart with no items
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart references a product that no longer exists
    #[error("Product not found: {product_id}")]
    UnresolvableProduct { product_id: i64 },

    /// Catalog lookup for a product id that does not exist
    #[error("cannot find product with productId {product_id}")]
    ProductNotFound { product_id: i64 },

    /// Payment gateway failure or timeout
    #[error("Payment gateway error: {0}")]
    Gateway(String),

    /// Storage-layer failure
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Configuration(_) => 500,
            ShopError::Validation(_) => 400,
            ShopError::InvalidQuantity { .. } => 400,
            ShopError::DuplicateUsername { .. } => 409,
            ShopError::InvalidCredentials => 401,
            ShopError::InvalidToken(_) => 401,
            ShopError::Forbidden(_) => 403,
            ShopError::HashFormat(_) => 500,
            ShopError::EmptyCart => 400,
            ShopError::UnresolvableProduct { .. } => 400,
            ShopError::ProductNotFound { .. } => 404,
            ShopError::Gateway(_) => 502,
            ShopError::Database(_) => 500,
            ShopError::Serialization(_) => 500,
            ShopError::Internal(_) => 500,
        }
    }

    /// Returns true if the client should see the error message verbatim.
    /// Server-side failure detail is logged, never echoed.
    pub fn is_client_safe(&self) -> bool {
        self.status_code() < 500
    }
}

/// Result type alias for storefront operations
pub type ShopResult<T> = Result<T, ShopError>;
