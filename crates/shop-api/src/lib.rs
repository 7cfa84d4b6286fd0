//! # shop-api
//!
//! HTTP API layer for the storefront.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Credential endpoints (register, sign-in)
//! - Bearer-token-gated cart and checkout endpoints
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/products/{selector}` | Product by id, or a kind listing |
//! | POST | `/register` | Create a user and its cart |
//! | POST | `/sign-in` | Issue a session token |
//! | GET | `/cart` | List cart contents |
//! | POST | `/cart/items` | Add/increment a cart item |
//! | DELETE | `/cart/items/{product_id}` | Remove a cart item |
//! | POST | `/checkout` | Create a payment session |

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
