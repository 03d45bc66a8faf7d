//! Account route handlers.
//!
//! Order history itself lives on the backend; this page is the landing
//! spot after a verified payment.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::middleware::RequireAuth;

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/orders.html")]
pub struct OrdersTemplate {
    pub name: String,
}

/// Display the order-history view.
#[instrument(skip(user))]
pub async fn orders(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    OrdersTemplate { name: user.name }
}
