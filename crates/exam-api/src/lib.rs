//! # exam-api
//!
//! Authenticated access to the exam-results backend.
//!
//! - [`client::ApiClient`]: base-URL resolution, bearer-token attachment,
//!   single-attempt requests, and error classification. Side-effect free.
//! - [`policy::UnauthorizedPolicy`]: clears the session and redirects to the
//!   login entry point when the backend answers 401.
//! - [`ExamApi`]: the facade feature code uses. Every call goes through the
//!   client and then the policy.
//!
//! Feature endpoints live in [`auth`], [`exams`], [`boards`], [`analytics`]
//! and [`files`].

pub mod analytics;
pub mod auth;
pub mod boards;
pub mod classify;
pub mod client;
pub mod error;
pub mod exams;
pub mod files;
pub mod policy;

pub use client::{ApiClient, Blob, FilePart, RequestBody, RequestOptions, ResponseBody, ResponseType};
pub use error::{ApiError, ErrorKind};
pub use policy::{Navigator, UnauthorizedPolicy};

use std::sync::Arc;

use exam_config::ApiConfig;
use exam_session::SessionStore;
use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Client plus unauthorized policy, sharing one session store.
#[derive(Debug, Clone)]
pub struct ExamApi {
    client: ApiClient,
    policy: UnauthorizedPolicy,
}

impl ExamApi {
    #[must_use]
    pub fn new(client: ApiClient, navigator: Arc<dyn Navigator>) -> Self {
        let policy = UnauthorizedPolicy::new(Arc::clone(client.session()), navigator);
        Self { client, policy }
    }

    /// Build the client from configuration and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Transport`] if the HTTP client cannot be built.
    pub fn from_config(
        config: &ApiConfig,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        Ok(Self::new(ApiClient::new(config, session)?, navigator))
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        self.client.session()
    }

    /// Send through the client, then let the policy react to the outcome.
    ///
    /// # Errors
    ///
    /// Returns the client's classified [`ApiError`] unchanged.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseBody, ApiError> {
        let result = self.client.request(method, path, options).await;
        if let Err(error) = &result {
            self.policy.observe(error);
        }
        result
    }

    pub(crate) async fn json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.send(method, path, options).await?.into_json()
    }

    pub(crate) async fn blob(&self, path: &str, options: RequestOptions) -> Result<Blob, ApiError> {
        self.send(Method::GET, path, options.blob())
            .await?
            .into_blob()
    }
}

/// A collection endpoint's body: either a bare array or a paginated envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Plain(Vec<T>),
    Paged {
        #[serde(alias = "data", alias = "results")]
        items: Vec<T>,
    },
}

impl<T> Listing<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        match self {
            Self::Plain(items) | Self::Paged { items } => items,
        }
    }
}

/// Percent-encode one path segment (ids come from user input).
pub(crate) fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}
