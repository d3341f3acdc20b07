//! Session persistence configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_keyring_service() -> String {
    "examdesk".to_string()
}

/// Where the authenticated session is persisted between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackendKind {
    /// JSON file under `~/.examdesk/` (or `session.path`).
    #[default]
    File,
    /// OS keychain entry.
    Keyring,
    /// Process memory only; nothing survives a restart.
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub backend: SessionBackendKind,

    /// Override for the session file location (file backend only).
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Keyring service name (keyring backend only).
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackendKind::default(),
            path: None,
            keyring_service: default_keyring_service(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = SessionConfig::default();
        assert_eq!(config.backend, SessionBackendKind::File);
        assert!(config.path.is_none());
        assert_eq!(config.keyring_service, "examdesk");
    }
}
