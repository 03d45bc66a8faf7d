//! Checkout route handlers.
//!
//! `pay` runs the first half of the handshake (validation, order
//! creation, widget configuration) and renders the page that opens the
//! hosted widget. `callback` receives the widget's completion POST, runs
//! verification, and only then clears the cart. Every failure renders the
//! cart page with its own message; the cart survives all of them.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use crate::checkout::{CheckoutError, CheckoutFlow, PaymentCallback, PendingPayment};
use crate::models::{CurrentUser, session_keys};
use crate::routes::cart::{CartShowTemplate, CartView};
use crate::state::AppState;
use crate::store::CartStore;

/// Where the visitor lands after a verified payment.
const ORDER_HISTORY_PATH: &str = "/account/orders";

/// Checkout page template: embeds the widget configuration and opens the
/// gateway's hosted UI.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/pay.html")]
pub struct CheckoutPayTemplate {
    pub options_json: String,
    pub total: String,
    pub order_id: String,
}

/// Render the cart page with a checkout failure message.
async fn cart_with_message(
    session: &Session,
    user: Option<CurrentUser>,
    error: &CheckoutError,
) -> Response {
    let cart = CartStore::new(session).load().await;
    CartShowTemplate {
        cart: CartView::from(&cart),
        user,
        message: Some(error.user_message().to_string()),
    }
    .into_response()
}

/// Start checkout: validate, create the order, and hand off to the widget.
#[instrument(skip(state, session))]
pub async fn pay(State(state): State<AppState>, session: Session) -> Response {
    let user: Option<CurrentUser> = session
        .get(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten();

    let cart = CartStore::new(&session).load().await;
    let flow = CheckoutFlow::new(state.payments(), &state.config().payment);

    // The flow re-validates, but resolving the user here keeps the error
    // rendering in one place.
    let Some(ref current) = user else {
        return cart_with_message(&session, None, &CheckoutError::NotSignedIn).await;
    };

    match flow.begin(current, &cart).await {
        Ok((pending, options)) => {
            if let Err(e) = session.insert(session_keys::PENDING_PAYMENT, &pending).await {
                tracing::error!("Failed to store pending payment: {e}");
                return cart_with_message(&session, user, &CheckoutError::Session(e)).await;
            }

            let options_json = match serde_json::to_string(&options) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize widget options: {e}");
                    return cart_with_message(
                        &session,
                        user,
                        &CheckoutError::OrderCreation(e.into()),
                    )
                    .await;
                }
            };

            CheckoutPayTemplate {
                options_json,
                total: cart.total().display(),
                order_id: pending.order_id.to_string(),
            }
            .into_response()
        }
        Err(error) => {
            tracing::warn!("Checkout could not start: {error}");
            cart_with_message(&session, user, &error).await
        }
    }
}

/// Complete checkout: verify the widget callback, clear the cart, and
/// send the visitor to their order history.
#[instrument(skip(state, session, form))]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PaymentCallback>,
) -> Response {
    let user: Option<CurrentUser> = session
        .get(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten();

    // One-shot: a second callback for the same order starts from scratch.
    let pending: Option<PendingPayment> = session
        .remove(session_keys::PENDING_PAYMENT)
        .await
        .ok()
        .flatten();

    let cart_store = CartStore::new(&session);
    let cart = cart_store.load().await;
    let flow = CheckoutFlow::new(state.payments(), &state.config().payment);

    match flow.complete(pending, form, &cart, Utc::now()).await {
        Ok(()) => {
            if let Err(e) = cart_store.clear().await {
                // The payment is verified; log and continue to the
                // confirmation rather than failing the visitor now.
                tracing::error!("Failed to clear cart after verified payment: {e}");
            }
            Redirect::to(ORDER_HISTORY_PATH).into_response()
        }
        Err(error) => {
            tracing::warn!("Payment verification did not complete: {error}");
            cart_with_message(&session, user, &error).await
        }
    }
}
