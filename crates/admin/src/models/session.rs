//! Session keys for admin.
//!
//! The bearer token lives in its own `access_token` cookie, not the session.

/// Session keys for admin data.
pub mod keys {
    /// Key for toasts waiting to be shown on the next page render.
    pub const TOASTS: &str = "toasts";
}
