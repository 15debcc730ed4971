//! HTTP middleware for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions, in-memory)
//!
//! Routes that call the API with credentials take the [`AccessToken`]
//! extractor.

pub mod auth;
pub mod session;

pub use auth::{AccessToken, access_token_cookie, removal_cookie};
pub use session::create_session_layer;
