//! # Request Handlers
//!
//! Axum request handlers for the storefront API. Wire field names are
//! camelCase; every error goes through `ApiError`.

use crate::auth::AuthSession;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum::response::Response;
use serde::{Deserialize, Serialize};
use shop_core::{CartItem, CartLine, Product, ProductKind, ShopError};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Registration request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Registration response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: i64,
    pub username: String,
}

/// Sign-in request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Sign-in response: the session token plus its public claims
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub cart_id: i64,
}

/// Add-to-cart request.
///
/// A `cartId` field is accepted for wire compatibility but ignored: the
/// verified token decides which cart is mutated.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    #[allow(dead_code)]
    pub cart_id: Option<i64>,
}

/// A cart row after mutation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub cart_id: i64,
    pub product_id: i64,
    pub quantity: i32,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            cart_id: item.cart_id,
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }
}

/// A cart line with product display fields
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    pub cart_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub name: String,
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            cart_id: line.cart_id,
            product_id: line.product_id,
            quantity: line.quantity,
            name: line.name,
            price: line.price,
            image_url: line.image_url,
        }
    }
}

/// A catalog product as shown to clients. The processor-side payment
/// reference stays server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub product_id: i64,
    pub name: String,
    pub kind: ProductKind,
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.product_id,
            name: product.name,
            kind: product.kind,
            price: product.price,
            image_url: product.image_url,
            description: product.description,
        }
    }
}

/// Checkout response: where to send the client
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub redirect_url: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Catalog lookup. A numeric selector fetches one product; a plural kind
/// name (`weapons`, `vehicles`, `throwables`) lists that category sorted
/// by name. No token required: the catalog is public.
pub async fn get_products(
    State(state): State<AppState>,
    Path(selector): Path<String>,
) -> Result<Response, ApiError> {
    if let Ok(product_id) = selector.parse::<i64>() {
        let product = state
            .products
            .product_by_id(product_id)
            .await?
            .ok_or(ShopError::ProductNotFound { product_id })?;

        return Ok(Json(ProductResponse::from(product)).into_response());
    }

    let kind = match selector.as_str() {
        "weapons" => ProductKind::Weapon,
        "vehicles" => ProductKind::Vehicle,
        "throwables" => ProductKind::Throwable,
        other => {
            return Err(ShopError::Validation(format!("unknown product kind: {other}")).into())
        }
    };

    let products = state.products.products_by_kind(kind).await?;
    let body: Vec<ProductResponse> = products.into_iter().map(Into::into).collect();
    Ok(Json(body).into_response())
}

/// Register a new user. The plaintext password is hashed before it goes
/// anywhere near the store; the user row and its empty cart are created
/// together.
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ShopError::Validation(
            "username and password are required".to_string(),
        )
        .into());
    }

    let hashed = state.hasher.hash(&request.password)?;
    let user = state.users.register(&request.username, &hashed).await?;

    info!("Registered user {}", user.user_id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.user_id,
            username: user.username,
        }),
    ))
}

/// Sign in with username and password. Unknown usernames and wrong
/// passwords are indistinguishable to the caller.
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, ApiError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ShopError::InvalidCredentials.into());
    }

    let credential = state
        .users
        .find_by_username(&request.username)
        .await?
        .ok_or(ShopError::InvalidCredentials)?;

    let verified = match state.hasher.verify(&credential.hashed_secret, &request.password) {
        Ok(verified) => verified,
        Err(ShopError::HashFormat(detail)) => {
            // Corrupt stored record: log the real cause, tell the caller
            // nothing beyond a failed login.
            error!(
                "stored secret for user {} is malformed: {}",
                credential.user.user_id, detail
            );
            return Err(ShopError::InvalidCredentials.into());
        }
        Err(e) => return Err(e.into()),
    };

    if !verified {
        return Err(ShopError::InvalidCredentials.into());
    }

    let user = credential.user;
    let token = state
        .tokens
        .issue(user.user_id, &user.username, user.cart_id)?;

    info!("User {} signed in", user.user_id);

    Ok(Json(SignInResponse {
        token,
        user_id: user.user_id,
        username: user.username,
        cart_id: user.cart_id,
    }))
}

/// Add a product to the authenticated user's cart. Repeated adds of the
/// same product increment the existing row.
#[instrument(skip(state, session, request), fields(cart_id = session.0.cart_id))]
pub async fn add_cart_item(
    session: AuthSession,
    State(state): State<AppState>,
    Json(request): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartItemResponse>), ApiError> {
    let product_id = request
        .product_id
        .ok_or_else(|| ShopError::Validation("productId is required".to_string()))?;

    let quantity = request.quantity.unwrap_or(0);
    if quantity <= 0 || quantity > i64::from(i32::MAX) {
        return Err(ShopError::InvalidQuantity { quantity }.into());
    }

    let item = state
        .carts
        .add_item(session.0.cart_id, product_id, quantity as i32)
        .await?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Remove a product from the authenticated user's cart. Removing an
/// absent product succeeds.
#[instrument(skip(state, session), fields(cart_id = session.0.cart_id))]
pub async fn remove_cart_item(
    session: AuthSession,
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .carts
        .remove_item(session.0.cart_id, product_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the authenticated user's cart
pub async fn get_cart(
    session: AuthSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<CartLineResponse>>, ApiError> {
    let lines = state.carts.list_items(session.0.cart_id).await?;
    Ok(Json(lines.into_iter().map(Into::into).collect()))
}

/// Create a payment session for the authenticated user's cart and return
/// the processor's redirect URL. The cart is read server-side; the request
/// carries no body.
#[instrument(skip(state, session), fields(cart_id = session.0.cart_id))]
pub async fn checkout(
    session: AuthSession,
    State(state): State<AppState>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let lines = state.carts.list_items(session.0.cart_id).await?;
    let items: Vec<CartItem> = lines.iter().map(CartLine::item).collect();

    let redirect = state.checkout.checkout(&items).await?;

    info!(
        "Checkout session {} created for cart {}",
        redirect.session_id, session.0.cart_id
    );

    Ok(Json(CheckoutResponse {
        redirect_url: redirect.redirect_url,
    }))
}
