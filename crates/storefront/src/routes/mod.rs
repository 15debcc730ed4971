//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (all products)
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (REST API reachable)
//!
//! # Products
//! GET  /products               - Product listing
//! GET  /product/{slug}         - Product detail
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit (redirects to /cart or back)
//! POST /cart/update            - Set quantity (redirects to /cart)
//! POST /cart/remove            - Remove line (redirects to /cart)
//! GET  /cart/count             - Cart count badge (fragment)
//! ```

pub mod cart;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::api_rate_limiter;
use crate::state::AppState;

/// Create the cart routes router.
///
/// Mutations are rate limited per client IP.
pub fn cart_routes() -> Router<AppState> {
    let mutations = Router::new()
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .layer(api_rate_limiter());

    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .merge(mutations)
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::home))
        .route("/products", get(products::index))
        .route("/product/{slug}", get(products::show))
        .nest("/cart", cart_routes())
}
