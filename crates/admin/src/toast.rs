//! Toasts queued across a redirect.

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
/// Session failures are logged and yield no toasts.
pub async fn take(session: &Session) -> Vec<Toast> {
    match session.remove::<Vec<Toast>>(session_keys::TOASTS).await {
        Ok(toasts) => toasts.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to drain toasts: {e}");
            Vec::new()
        }
    }
}
