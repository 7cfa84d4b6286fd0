//! # shop-stripe
//!
//! Stripe payment gateway for the storefront.
//!
//! Implements `shop_core::PaymentGateway` against the Checkout Sessions
//! API: the coordinator hands over `(payment_reference, quantity)` pairs
//! and receives a hosted-checkout redirect URL.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_stripe::StripeGateway;
//! use shop_core::PaymentGateway;
//!
//! let gateway = StripeGateway::from_env()?;
//! let redirect = gateway
//!     .create_session(&request, "https://shop/success", "https://shop/cancel")
//!     .await?;
//! // Redirect the client to redirect.redirect_url
//! ```

pub mod checkout;
pub mod config;

pub use checkout::StripeGateway;
pub use config::StripeConfig;
