//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Health check
//! GET  /health/ready                  - Readiness check (REST API reachable)
//! GET  /                              - Redirect to /admin/products
//!
//! # Auth (bearer token cookie)
//! GET  /admin/login                   - Token form
//! POST /admin/login                   - Store token cookie
//! POST /admin/logout                  - Clear token cookie
//!
//! # Products
//! GET  /admin/products                - Product table
//! POST /admin/products                - Create product
//! GET  /admin/products/new            - Empty product form
//! POST /admin/products/preview        - Re-render form with image previews
//! GET  /admin/products/{id}/edit      - Pre-filled product form
//! POST /admin/products/{id}           - Update product
//! POST /admin/products/{id}/delete    - Delete product
//! ```

pub mod login;
pub mod products;

use axum::{Router, response::Redirect, routing::get};

use crate::state::AppState;

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/admin/products") }))
        .route("/admin", get(|| async { Redirect::to("/admin/products") }))
        .merge(login::router())
        .merge(products::router())
}
