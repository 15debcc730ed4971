//! Session-stored visitor state.
//!
//! The cart and pending toasts live in the session; there is no server-side
//! database.

use tower_sessions::Session;

use stay_young_core::Cart;

/// Session keys for visitor data.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for toasts waiting to be shown on the next page render.
    pub const TOASTS: &str = "toasts";
}

/// Load the cart from the session, or an empty cart.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Store the cart in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}
