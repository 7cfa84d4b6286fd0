//! # shop-core
//!
//! Core types and traits for the storefront's trust and transaction
//! boundary.
//!
//! This crate provides:
//! - `PasswordHasher` for credential hashing and verification
//! - `TokenIssuer` / `SessionClaims` for stateless session tokens
//! - `CredentialStore`, `CartStore`, `ProductSource` store traits
//! - `PaymentGateway` trait for the external payment processor
//! - `CheckoutCoordinator` for cart-to-payment-request construction
//! - `ShopError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{CheckoutCoordinator, CheckoutUrls, PasswordHasher, TokenIssuer};
//!
//! // Register: hash the password, persist via a CredentialStore
//! let hasher = PasswordHasher::new();
//! let hashed = hasher.hash("hunter2")?;
//! let user = store.register("ana", &hashed).await?;
//!
//! // Sign in: verify, then issue a token
//! let issuer = TokenIssuer::new(secret);
//! let token = issuer.issue(user.user_id, &user.username, user.cart_id)?;
//!
//! // Checkout: cart items -> processor redirect
//! let coordinator = CheckoutCoordinator::new(products, gateway, CheckoutUrls::new(base_url));
//! let redirect = coordinator.checkout(&items).await?;
//! ```

pub mod cart;
pub mod checkout;
pub mod error;
pub mod gateway;
pub mod password;
pub mod product;
pub mod store;
pub mod token;
pub mod user;

// Re-exports for convenience
pub use cart::{CartItem, CartLine, CheckoutRequest, PaymentLineItem};
pub use checkout::{CheckoutCoordinator, CheckoutUrls};
pub use error::{ShopError, ShopResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway, PaymentRedirect};
pub use password::PasswordHasher;
pub use product::{Product, ProductKind};
pub use store::{
    BoxedCartStore, BoxedCredentialStore, BoxedProductSource, CartStore, CredentialStore,
    ProductSource,
};
pub use token::{SessionClaims, TokenIssuer};
pub use user::{Credential, User};
