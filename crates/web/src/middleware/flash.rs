//! Flash message helpers.

use tower_sessions::Session;

use crate::models::Flash;
use crate::models::session::keys;

/// Queue a flash message for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn set_flash(session: &Session, flash: Flash) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::FLASH, flash).await
}

/// Take the pending flash message, if any.
///
/// A session read failure only costs the message, so it is logged and
/// swallowed instead of failing the page.
pub async fn take_flash(session: &Session) -> Option<Flash> {
    match session.remove::<Flash>(keys::FLASH).await {
        Ok(flash) => flash,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash message from session");
            None
        }
    }
}
