//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Browse page (categories, filters, grid)
//! GET  /health                 - Health check
//!
//! # Browsing (HTMX fragments)
//! POST /browse/load-more       - Append the next unfiltered page
//! POST /browse/filter          - Apply category/price criteria
//! POST /browse/reset           - Clear criteria, back to page 1
//!
//! # Products
//! GET  /products/{id}/photo    - Proxied product photo
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count, triggers cart-updated)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout               - Create order, render payment widget page
//! POST /checkout/callback      - Verify payment, clear cart, redirect
//!
//! # Account (requires auth)
//! GET  /account/orders         - Order history
//! ```

pub mod account;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the browse fragment routes router.
pub fn browse_routes() -> Router<AppState> {
    Router::new()
        .route("/load-more", post(home::load_more))
        .route("/filter", post(home::filter))
        .route("/reset", post(home::reset))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Browse page
        .route("/", get(home::home))
        // Browse fragments
        .nest("/browse", browse_routes())
        // Product photos
        .route("/products/{id}/photo", get(products::photo))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout handshake
        .route("/checkout", post(checkout::pay))
        .route("/checkout/callback", post(checkout::callback))
        // Account routes
        .route("/account/orders", get(account::orders))
}
