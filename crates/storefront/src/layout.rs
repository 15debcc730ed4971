//! Base layout data shared by every full page.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use stay_young_core::Toast;

use crate::models::load_cart;
use crate::toast;

/// Site name appended to page titles.
pub const SITE_NAME: &str = "Stay Young";

/// Meta description rendered on every page.
pub const META_DESCRIPTION: &str = "Stay Young is a korean skin care website.";

/// `"{title} | Stay Young"`, or just `"Stay Young"` for an empty title.
#[must_use]
pub fn page_title(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        SITE_NAME.to_string()
    } else {
        format!("{title} | {SITE_NAME}")
    }
}

/// Header badge count and pending toasts for the base layout.
///
/// Extracting this drains the session's toast queue, so only use it on
/// handlers that render a full page.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub cart_count: u32,
    pub toasts: Vec<Toast>,
}

impl<S> FromRequestParts<S> for Layout
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(Self::default());
        };

        let cart_count = match load_cart(session).await {
            Ok(cart) => cart.item_count(),
            Err(e) => {
                tracing::warn!("Failed to load cart for layout: {e}");
                0
            }
        };

        let toasts = toast::take(session).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to drain toasts: {e}");
            Vec::new()
        });

        Ok(Self { cart_count, toasts })
    }
}
