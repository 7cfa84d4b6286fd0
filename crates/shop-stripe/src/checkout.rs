//! # Stripe Checkout Sessions
//!
//! `PaymentGateway` implementation against the Stripe Checkout Sessions
//! API. Line items reference processor-side price ids, so the amounts
//! charged are whatever Stripe holds for those prices — nothing priced on
//! this side of the boundary ever reaches the wire.

use crate::config::StripeConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shop_core::{CheckoutRequest, PaymentGateway, PaymentRedirect, ShopError, ShopResult};
use tracing::{debug, error, info, instrument};

/// Stripe Checkout Session gateway
///
/// Uses Stripe's hosted checkout page; the caller redirects the client to
/// the returned URL.
pub struct StripeGateway {
    config: StripeConfig,
    client: Client,
}

impl StripeGateway {
    /// Create a new Stripe gateway
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> ShopResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Build the form body for the sessions API
    fn build_form(
        request: &CheckoutRequest,
        success_url: &str,
        cancel_url: &str,
    ) -> Vec<(String, String)> {
        let mut form_params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), success_url.to_string()),
            ("cancel_url".to_string(), cancel_url.to_string()),
        ];

        for (i, item) in request.line_items.iter().enumerate() {
            form_params.push((
                format!("line_items[{}][price]", i),
                item.payment_reference.clone(),
            ));
            form_params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
        }

        form_params
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self, request), fields(request_id = %request.id))]
    async fn create_session(
        &self,
        request: &CheckoutRequest,
        success_url: &str,
        cancel_url: &str,
    ) -> ShopResult<PaymentRedirect> {
        if request.is_empty() {
            return Err(ShopError::EmptyCart);
        }

        let form_params = Self::build_form(request, success_url, cancel_url);

        debug!(
            "Creating Stripe checkout session: {} line items",
            request.line_items.len()
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &request.idempotency_key)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ShopError::Gateway("stripe request timed out".to_string())
                } else {
                    ShopError::Gateway(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShopError::Gateway(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(ShopError::Gateway(error_response.error.message));
            }

            return Err(ShopError::Gateway(format!("HTTP {status}")));
        }

        let session: StripeSessionResponse = serde_json::from_str(&body)
            .map_err(|e| ShopError::Gateway(format!("failed to parse Stripe response: {e}")))?;

        info!(
            "Created Stripe checkout session: id={}, url={}",
            session.id, session.url
        );

        Ok(PaymentRedirect {
            session_id: session.id,
            redirect_url: session.url,
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeSessionResponse {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}
