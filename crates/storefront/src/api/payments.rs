//! Payment client for the backend order and verification endpoints.
//!
//! These are mutations and are never cached.

use std::sync::Arc;

use tracing::instrument;

use gearhouse_core::Rupees;

use crate::config::BackendApiConfig;

use super::types::{CreateOrderRequest, OrderSession, VerificationRequest, VerificationResponse};
use super::{ApiError, decode_json};

/// Client for the backend payment endpoints.
#[derive(Clone)]
pub struct PaymentClient {
    inner: Arc<PaymentClientInner>,
}

struct PaymentClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl PaymentClient {
    /// Create a new payment client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &BackendApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(PaymentClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Create a gateway order for the given amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the caller must not open the
    /// payment widget in that case.
    #[instrument(skip(self), fields(amount = amount.amount()))]
    pub async fn create_order(&self, amount: Rupees) -> Result<OrderSession, ApiError> {
        let request = CreateOrderRequest {
            amount: amount.amount(),
        };

        let response = self
            .inner
            .client
            .post(self.url("/payment/create-order"))
            .json(&request)
            .send()
            .await?;

        decode_json(response).await
    }

    /// Ask the backend to verify a completed payment.
    ///
    /// Returns the backend's verdict; `false` means the signature did not
    /// check out and the order must not be treated as paid.
    ///
    /// # Errors
    ///
    /// Returns an error if the verification request itself fails.
    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    pub async fn verify(&self, request: &VerificationRequest) -> Result<bool, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url("/payment/verify-payment"))
            .json(request)
            .send()
            .await?;

        let body: VerificationResponse = decode_json(response).await?;
        Ok(body.ok)
    }
}
