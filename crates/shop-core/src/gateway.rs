//! # Payment Gateway Trait
//!
//! Seam for the external payment processor. The core only constructs the
//! request and consumes the redirect handle; settlement is the processor's
//! problem.

use crate::cart::CheckoutRequest;
use crate::error::ShopResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Redirect handle returned by a successfully created payment session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRedirect {
    /// Processor's session id
    pub session_id: String,
    /// URL the client is sent to for payment
    pub redirect_url: String,
}

/// A payment processor capable of hosting a checkout session.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a checkout session for the given line items and return the
    /// redirect handle. Failures (including timeouts) surface as
    /// `ShopError::Gateway`; they are never retried here.
    async fn create_session(
        &self,
        request: &CheckoutRequest,
        success_url: &str,
        cancel_url: &str,
    ) -> ShopResult<PaymentRedirect>;

    /// Provider name, for logging
    fn provider_name(&self) -> &'static str;
}

pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
