//! Reaction to authentication failures.
//!
//! The transport only classifies; this is where a 401 turns into "forget the
//! session and send the user back to the login entry point".

use std::fmt;
use std::sync::Arc;

use exam_session::SessionStore;

use crate::error::ApiError;

/// The login entry point of whatever front end is driving the client.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self, reason: &str);
}

/// Clears the session and redirects when the backend rejects the token.
#[derive(Clone)]
pub struct UnauthorizedPolicy {
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl fmt::Debug for UnauthorizedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnauthorizedPolicy")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl UnauthorizedPolicy {
    #[must_use]
    pub fn new(session: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    #[must_use]
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Apply the policy to a failed call. Returns `true` if the session was dropped.
    pub fn observe(&self, error: &ApiError) -> bool {
        if !error.is_unauthorized() {
            return false;
        }

        tracing::info!("backend rejected the session token; signing out");
        if let Err(clear_error) = self.session.clear() {
            tracing::warn!(error = %clear_error, "failed to erase persisted session");
        }
        self.navigator.redirect_to_login(&error.message);
        true
    }
}
