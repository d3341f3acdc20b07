//! Backend API configuration.

use serde::{Deserialize, Serialize};

/// Fallback backend root used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_use_system_proxy() -> bool {
    true
}

fn default_user_agent() -> String {
    concat!("examdesk/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Root URL of the exam-results backend (e.g., `https://results.example.org/api/v1`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. `None` keeps the HTTP client default (no timeout).
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    #[serde(default = "default_use_system_proxy")]
    pub use_system_proxy: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            user_agent: default_user_agent(),
            use_system_proxy: default_use_system_proxy(),
        }
    }
}

impl ApiConfig {
    /// The base URL with surrounding whitespace and trailing slashes removed.
    ///
    /// A blank value resolves to [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn resolved_base_url(&self) -> String {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        }
    }
}
