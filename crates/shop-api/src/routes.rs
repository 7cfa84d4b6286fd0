//! # Routes
//!
//! Axum router configuration for the storefront API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Catalog (public):
///   - GET /products/{selector} - One product by id, or a kind listing
///     (weapons, vehicles, throwables)
///
/// - Credentials:
///   - POST /register - Create a user (and its cart)
///   - POST /sign-in - Verify credentials, issue a session token
///
/// - Cart (bearer token required):
///   - GET    /cart - List cart contents
///   - POST   /cart/items - Add or increment an item
///   - DELETE /cart/items/{product_id} - Remove an item
///
/// - Checkout (bearer token required):
///   - POST /checkout - Create a payment session, return the redirect URL
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/products/{selector}", get(handlers::get_products))
        .route("/register", post(handlers::register))
        .route("/sign-in", post(handlers::sign_in))
        .route("/cart", get(handlers::get_cart))
        .route("/cart/items", post(handlers::add_cart_item))
        .route("/cart/items/{product_id}", delete(handlers::remove_cart_item))
        .route("/checkout", post(handlers::checkout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
