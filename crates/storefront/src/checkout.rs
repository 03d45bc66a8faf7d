//! Checkout orchestration: order creation, payment widget hand-off, and
//! verification.
//!
//! The flow is a three-message handshake with the gateway's hosted widget
//! in the middle: create an order on the backend, let the widget collect
//! payment in the browser, then forward the provider-signed callback to
//! the backend for verification. The widget is untrusted and may never
//! call back at all (the visitor can simply close it), so the order is
//! tracked as a `PendingPayment` in the session and expires after a
//! bounded window. The cart is only cleared after verification succeeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use gearhouse_core::{Cart, OrderId};

use crate::api::types::{OrderSession, VerificationRequest};
use crate::api::{ApiError, PaymentClient};
use crate::config::PaymentConfig;
use crate::models::CurrentUser;

/// Prefill defaults used when profile fields are absent. The widget must
/// never be blocked on missing identity data.
const GUEST_NAME: &str = "Guest User";
const GUEST_EMAIL: &str = "guest@example.com";
const GUEST_CONTACT: &str = "9000000000";

/// Everything that can go wrong between "Proceed to Pay" and a cleared
/// cart. Each variant maps to its own user-facing message; none of them
/// touch the cart, so the visitor can always retry.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout invoked with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Checkout invoked without a signed-in visitor.
    #[error("not signed in")]
    NotSignedIn,

    /// The profile has no shipping address.
    #[error("no shipping address on profile")]
    MissingAddress,

    /// Order creation failed; the widget was never opened.
    #[error("order creation failed: {0}")]
    OrderCreation(#[source] ApiError),

    /// The verification request itself failed.
    #[error("verification request failed: {0}")]
    Verification(#[source] ApiError),

    /// The backend checked the signature and said no.
    #[error("payment verification rejected")]
    Rejected,

    /// No pending order, or the callback arrived after the window closed.
    #[error("payment session expired or unknown")]
    Expired,

    /// Session read/write failed mid-flow.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl CheckoutError {
    /// The message shown to the visitor. Distinct per failure point, and
    /// never silent.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyCart => "Your cart is empty.",
            Self::NotSignedIn => "Please log in to proceed with payment.",
            Self::MissingAddress => "Please add a shipping address to proceed with payment.",
            Self::OrderCreation(_) => "Error initiating payment. Please try again.",
            Self::Verification(_) | Self::Session(_) => {
                "An error occurred during payment verification."
            }
            Self::Rejected => "Payment verification failed. Please try again.",
            Self::Expired => "This payment session has expired. Please start again.",
        }
    }
}

/// Identity prefill for the payment widget.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

impl WidgetPrefill {
    /// Build prefill data from whatever profile is available, falling back
    /// to guest defaults field by field.
    #[must_use]
    pub fn from_profile(user: Option<&CurrentUser>) -> Self {
        let non_empty = |value: &str, fallback: &str| {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value.to_string()
            }
        };

        user.map_or_else(
            || Self {
                name: GUEST_NAME.to_string(),
                email: GUEST_EMAIL.to_string(),
                contact: GUEST_CONTACT.to_string(),
            },
            |u| Self {
                name: non_empty(&u.name, GUEST_NAME),
                email: non_empty(&u.email, GUEST_EMAIL),
                contact: u
                    .phone
                    .as_deref()
                    .map_or_else(|| GUEST_CONTACT.to_string(), |p| non_empty(p, GUEST_CONTACT)),
            },
        )
    }
}

/// Widget theme settings.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetTheme {
    pub color: String,
}

/// Configuration object handed to the hosted payment widget.
///
/// Serialized into the checkout page; field names follow the gateway's
/// JavaScript contract.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetOptions {
    pub key: String,
    pub amount: i64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: OrderId,
    pub prefill: WidgetPrefill,
    pub theme: WidgetTheme,
}

/// A created order waiting for the widget callback.
///
/// Lives in the session between the checkout page render and the
/// callback; never persisted anywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingPayment {
    /// Gateway order id the callback must match.
    pub order_id: OrderId,
    /// Amount the order was created for, in whole rupees.
    pub amount: i64,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

impl PendingPayment {
    /// Whether the callback window has closed.
    #[must_use]
    pub fn is_expired(&self, window: std::time::Duration, now: DateTime<Utc>) -> bool {
        let elapsed = now.signed_duration_since(self.created_at);
        elapsed.to_std().is_ok_and(|elapsed| elapsed > window)
    }
}

/// Provider-issued fields reported by the widget's completion handler.
#[derive(Debug, Deserialize)]
pub struct PaymentCallback {
    pub order_id: OrderId,
    pub payment_id: String,
    pub signature: String,
}

/// The checkout orchestrator.
pub struct CheckoutFlow<'a> {
    payments: &'a PaymentClient,
    config: &'a PaymentConfig,
}

impl<'a> CheckoutFlow<'a> {
    /// Create a flow over the payment client and gateway configuration.
    #[must_use]
    pub const fn new(payments: &'a PaymentClient, config: &'a PaymentConfig) -> Self {
        Self { payments, config }
    }

    /// Validate the checkout preconditions. The UI gates the pay button on
    /// the same conditions, but the flow enforces them regardless.
    ///
    /// # Errors
    ///
    /// Returns the first unmet precondition.
    pub fn validate(user: Option<&CurrentUser>, cart: &Cart) -> Result<(), CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let user = user.ok_or(CheckoutError::NotSignedIn)?;
        if !user.has_address() {
            return Err(CheckoutError::MissingAddress);
        }
        Ok(())
    }

    /// Step one and two: compute the total, create the order, and build
    /// the widget configuration. Nothing here opens the widget; that
    /// happens in the browser, asynchronously.
    ///
    /// # Errors
    ///
    /// Returns an error if a precondition fails or order creation fails;
    /// in both cases the widget is never opened.
    #[instrument(skip(self, user, cart), fields(lines = cart.len()))]
    pub async fn begin(
        &self,
        user: &CurrentUser,
        cart: &Cart,
    ) -> Result<(PendingPayment, WidgetOptions), CheckoutError> {
        Self::validate(Some(user), cart)?;

        // The raw numeric total is the amount; formatting never enters here.
        let total = cart.total();

        let order: OrderSession = self
            .payments
            .create_order(total)
            .await
            .map_err(CheckoutError::OrderCreation)?;

        let pending = PendingPayment {
            order_id: order.id.clone(),
            amount: order.amount,
            created_at: Utc::now(),
        };

        let options = WidgetOptions {
            key: self.config.key_id.clone(),
            amount: order.amount,
            currency: self.config.currency.clone(),
            name: self.config.store_name.clone(),
            description: "Order Payment".to_string(),
            order_id: order.id,
            prefill: WidgetPrefill::from_profile(Some(user)),
            theme: WidgetTheme {
                color: "#3399cc".to_string(),
            },
        };

        Ok((pending, options))
    }

    /// Final step: forward the provider-issued identifiers plus the cart
    /// snapshot for verification. Succeeds only when a matching,
    /// unexpired pending order exists and the backend confirms the
    /// signature. The caller clears the cart afterwards; on any error the
    /// cart stays untouched.
    ///
    /// # Errors
    ///
    /// Returns an error for an expired or mismatched pending order, a
    /// failed verification request, or a rejected signature.
    #[instrument(skip(self, pending, callback, cart), fields(order_id = %callback.order_id))]
    pub async fn complete(
        &self,
        pending: Option<PendingPayment>,
        callback: PaymentCallback,
        cart: &Cart,
        now: DateTime<Utc>,
    ) -> Result<(), CheckoutError> {
        let pending = pending.ok_or(CheckoutError::Expired)?;

        if pending.is_expired(self.config.checkout_window, now) {
            return Err(CheckoutError::Expired);
        }
        if pending.order_id != callback.order_id {
            return Err(CheckoutError::Rejected);
        }

        let request = VerificationRequest {
            order_id: callback.order_id,
            payment_id: callback.payment_id,
            signature: callback.signature,
            cart: cart.clone(),
        };

        let verified = self
            .payments
            .verify(&request)
            .await
            .map_err(CheckoutError::Verification)?;

        if !verified {
            return Err(CheckoutError::Rejected);
        }

        Ok(())
    }
}
