//! # Checkout Coordination
//!
//! Turns the current cart into a payment-processor request. Prices and
//! payment references are re-read from the product record at checkout
//! time; nothing priced by the client or cached on a cart row is trusted.

use crate::cart::{CartItem, CheckoutRequest, PaymentLineItem};
use crate::error::{ShopError, ShopResult};
use crate::gateway::{BoxedPaymentGateway, PaymentRedirect};
use crate::store::BoxedProductSource;
use tracing::{info, instrument};

/// Success/cancel redirect targets handed to the processor
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    pub base_url: String,
    pub success_path: String,
    pub cancel_path: String,
}

impl CheckoutUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            success_path: "/success".to_string(),
            cancel_path: "/cancel".to_string(),
        }
    }

    pub fn success_url(&self) -> String {
        format!("{}{}", self.base_url, self.success_path)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.base_url, self.cancel_path)
    }
}

/// Validates a cart against authoritative pricing, builds the processor
/// request, and returns the redirect handle.
pub struct CheckoutCoordinator {
    products: BoxedProductSource,
    gateway: BoxedPaymentGateway,
    urls: CheckoutUrls,
}

impl CheckoutCoordinator {
    pub fn new(
        products: BoxedProductSource,
        gateway: BoxedPaymentGateway,
        urls: CheckoutUrls,
    ) -> Self {
        Self {
            products,
            gateway,
            urls,
        }
    }

    /// Map each cart item to `(payment_reference, quantity)`, resolving the
    /// reference from the product record as it exists right now.
    pub async fn build_checkout_request(&self, items: &[CartItem]) -> ShopResult<CheckoutRequest> {
        if items.is_empty() {
            return Err(ShopError::EmptyCart);
        }

        let mut line_items = Vec::with_capacity(items.len());
        for item in items {
            let product = self
                .products
                .product_by_id(item.product_id)
                .await?
                .ok_or(ShopError::UnresolvableProduct {
                    product_id: item.product_id,
                })?;

            line_items.push(PaymentLineItem {
                payment_reference: product.payment_reference,
                quantity: item.quantity as u32,
            });
        }

        Ok(CheckoutRequest::new(line_items))
    }

    /// Build the request and hand it to the processor. Gateway failures
    /// surface to the caller; the client is never told checkout succeeded
    /// when it did not.
    #[instrument(skip(self, items), fields(items = items.len(), provider = self.gateway.provider_name()))]
    pub async fn checkout(&self, items: &[CartItem]) -> ShopResult<PaymentRedirect> {
        let request = self.build_checkout_request(items).await?;

        info!(
            "Creating payment session: request={}, {} units",
            request.id,
            request.item_count()
        );

        self.gateway
            .create_session(&request, &self.urls.success_url(), &self.urls.cancel_url())
            .await
    }
}
