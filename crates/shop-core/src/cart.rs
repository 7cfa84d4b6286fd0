//! # Cart Types
//!
//! Cart line items and the ephemeral checkout request derived from them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single cart row. Identity is `(cart_id, product_id)`: a repeated add
/// increments `quantity` in place, it never creates a second row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub cart_id: i64,
    pub product_id: i64,
    pub quantity: i32,
}

/// Cart read model: a cart item joined with the product fields the client
/// needs to render it. Prices here are display-only; checkout re-reads the
/// product record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub cart_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub name: String,
    /// Display price in minor units
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CartLine {
    /// The mutable identity of this line
    pub fn item(&self) -> CartItem {
        CartItem {
            cart_id: self.cart_id,
            product_id: self.product_id,
            quantity: self.quantity,
        }
    }
}

/// A line item as sent to the payment processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentLineItem {
    /// Processor-side price id, resolved from the product record
    pub payment_reference: String,
    pub quantity: u32,
}

/// An ephemeral payment request built from the current cart at checkout
/// time. Never persisted; priced strictly from server-held product data.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    /// Internal request id (generated)
    pub id: Uuid,
    pub line_items: Vec<PaymentLineItem>,
    /// Idempotency key forwarded to the processor
    pub idempotency_key: String,
}

impl CheckoutRequest {
    /// Create a new request with generated id and idempotency key
    pub fn new(line_items: Vec<PaymentLineItem>) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            line_items,
            idempotency_key: id.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Total unit count across all line items
    pub fn item_count(&self) -> u32 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }
}
