use std::sync::Arc;

use anyhow::Context;
use exam_api::ExamApi;
use exam_config::{DeskConfig, SessionBackendKind, SessionConfig};
use exam_session::{FilePersistence, KeyringPersistence, MemoryPersistence, SessionStore};

use crate::cli::GlobalFlags;
use crate::navigator::TerminalNavigator;

pub fn load_config() -> anyhow::Result<DeskConfig> {
    DeskConfig::load_with_dotenv().context("failed to load examdesk configuration")
}

/// Build the session store for the configured backend.
pub fn session_store(config: &SessionConfig) -> anyhow::Result<SessionStore> {
    let store = match config.backend {
        SessionBackendKind::File => {
            let persistence = match &config.path {
                Some(path) => FilePersistence::new(path),
                None => FilePersistence::at_default_path()?,
            };
            tracing::debug!(path = %persistence.path().display(), "session file");
            SessionStore::new(persistence)
        }
        SessionBackendKind::Keyring => {
            SessionStore::new(KeyringPersistence::new(config.keyring_service.clone()))
        }
        SessionBackendKind::Memory => SessionStore::new(MemoryPersistence::new()),
    };
    Ok(store)
}

/// Build the API facade and restore any persisted session into it.
pub fn connect(config: &DeskConfig, flags: &GlobalFlags) -> anyhow::Result<ExamApi> {
    let store = Arc::new(session_store(&config.session)?);
    let api = ExamApi::from_config(&config.api, store, Arc::new(TerminalNavigator))
        .context("failed to build HTTP client")?;
    api.rehydrate();

    if flags.verbose {
        tracing::debug!(
            base_url = api.client().base_url(),
            backend = api.session().backend(),
            authenticated = api.session().is_authenticated(),
            "api ready"
        );
    }
    Ok(api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_session::{SessionRecord, UserProfile};
    use pretty_assertions::assert_eq;

    fn profile() -> UserProfile {
        serde_json::from_value(serde_json::json!({"id": "u1"})).unwrap()
    }

    #[test]
    fn file_backend_honours_path_override() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("session.json");
        let config = SessionConfig {
            backend: SessionBackendKind::File,
            path: Some(path.clone()),
            ..SessionConfig::default()
        };

        let store = session_store(&config).unwrap();
        assert_eq!(store.backend(), "file");
        store
            .set(SessionRecord::new("abc".into(), profile(), Vec::new()))
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn memory_backend_keeps_nothing_on_disk() {
        let config = SessionConfig {
            backend: SessionBackendKind::Memory,
            ..SessionConfig::default()
        };
        let store = session_store(&config).unwrap();
        assert_eq!(store.backend(), "memory");
        assert!(store.rehydrate().is_none());
    }
}
