//! Toast notifications carried across redirects.
//!
//! Handlers push toasts into the session; the next rendered page drains them
//! through the [`Layout`](crate::layout::Layout) extractor.

use tower_sessions::Session;

use stay_young_core::Toast;

use crate::models::session_keys;

/// Queue a toast for the next page render.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn push(session: &Session, toast: Toast) -> Result<(), tower_sessions::session::Error> {
    let mut toasts: Vec<Toast> = session
        .get(session_keys::TOASTS)
        .await?
        .unwrap_or_default();
    toasts.push(toast);
    session.insert(session_keys::TOASTS, toasts).await
}

/// Remove and return all queued toasts.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn take(session: &Session) -> Result<Vec<Toast>, tower_sessions::session::Error> {
    Ok(session
        .remove::<Vec<Toast>>(session_keys::TOASTS)
        .await?
        .unwrap_or_default())
}
