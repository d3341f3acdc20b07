//! Login, logout, rehydration and status of the authenticated session.

use chrono::{DateTime, Utc};
use exam_session::{ExamAssignment, SessionRecord, UserProfile};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::RequestOptions;
use crate::error::ApiError;
use crate::ExamApi;

const LOGIN_PATH: &str = "/auth/login";
const LOGOUT_PATH: &str = "/auth/logout";

/// Body of a successful `POST /auth/login`.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
    user: UserProfile,
    #[serde(default)]
    user_exams: Vec<ExamAssignment>,
}

/// What happened during [`ExamApi::logout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogoutOutcome {
    /// Whether the backend acknowledged the logout. Local state is cleared regardless.
    pub notified_backend: bool,
}

/// Snapshot of the local session for display.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub user: Option<UserProfile>,
    pub exam_count: usize,
    pub backend: &'static str,
    pub signed_in_at: Option<DateTime<Utc>>,
    /// `exp` claim, when the token is a JWT.
    pub expires_at: Option<DateTime<Utc>>,
    /// `expires_at` is in the past. The backend has the final say.
    pub expired: bool,
}

impl ExamApi {
    /// Exchange credentials for a session (form-encoded password grant).
    ///
    /// On success the token, profile and exam assignments are persisted and
    /// the profile is returned. On failure the client's error is returned
    /// untouched. A 401 also drops any session already in the store, without
    /// the login redirect since the caller is already signing in.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] from the backend, a decode error
    /// for an unexpected body, or [`crate::ErrorKind::Session`] if the session
    /// cannot be persisted.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile, ApiError> {
        let options = RequestOptions::default().form([
            ("username", username),
            ("password", password),
            ("grant_type", "password"),
        ]);

        let response: LoginResponse = match self
            .client()
            .request(Method::POST, LOGIN_PATH, options)
            .await
        {
            Ok(response) => response.into_json()?,
            Err(error) => {
                if error.is_unauthorized() {
                    if let Err(e) = self.session().clear() {
                        tracing::warn!(error = %e, "failed to clear session after rejected login");
                    }
                }
                return Err(error);
            }
        };

        if response.access_token.trim().is_empty() {
            return Err(ApiError::decode(Some(200), "login response has an empty access_token"));
        }

        let profile = response.user.clone();
        let record = SessionRecord::new(response.access_token, response.user, response.user_exams);
        self.session()
            .set(record)
            .map_err(|e| ApiError::session(&e))?;

        tracing::info!(user = %profile.id, "logged in");
        Ok(profile)
    }

    /// Sign out: notify the backend if signed in, then always clear local
    /// state and redirect to the login entry point.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ErrorKind::Session`] only if the persisted session
    /// cannot be erased. In-memory state is cleared even then.
    pub async fn logout(&self) -> Result<LogoutOutcome, ApiError> {
        let notified_backend = if self.session().token().is_some() {
            match self
                .client()
                .request(Method::POST, LOGOUT_PATH, RequestOptions::default())
                .await
            {
                Ok(_) => true,
                Err(error) => {
                    tracing::warn!(%error, "logout notification failed; clearing local session anyway");
                    false
                }
            }
        } else {
            false
        };

        let cleared = self.session().clear();
        self.policy.navigator().redirect_to_login("signed out");
        cleared.map_err(|e| ApiError::session(&e))?;

        tracing::info!(notified_backend, "logged out");
        Ok(LogoutOutcome { notified_backend })
    }

    /// Restore the persisted session into memory. Never fails.
    pub fn rehydrate(&self) -> Option<SessionRecord> {
        let restored = self.session().rehydrate();
        match &restored {
            Some(record) => tracing::debug!(user = %record.user.id, "session rehydrated"),
            None => tracing::debug!("no persisted session"),
        }
        restored
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        let backend = self.session().backend();
        match self.session().get() {
            Some(record) => {
                let expires_at = exam_session::token::decode_expiry(&record.token).ok();
                SessionStatus {
                    authenticated: true,
                    expired: expires_at.is_some_and(|at| at <= Utc::now()),
                    expires_at,
                    exam_count: record.exams.len(),
                    signed_in_at: Some(record.created_at),
                    user: Some(record.user),
                    backend,
                }
            }
            None => SessionStatus {
                authenticated: false,
                user: None,
                exam_count: 0,
                backend,
                signed_in_at: None,
                expires_at: None,
                expired: false,
            },
        }
    }
}
