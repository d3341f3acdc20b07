//! Storage backends for the serialized session.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::SessionError;

const SESSION_DIR_NAME: &str = ".examdesk";
const SESSION_FILE_NAME: &str = "session.json";
const KEYRING_USER: &str = "session";

/// Where a serialized [`SessionRecord`](crate::SessionRecord) lives between runs.
pub trait Persistence: Send + Sync + fmt::Debug {
    /// Short backend name for status display.
    fn kind(&self) -> &'static str;

    /// Read the stored payload. `Ok(None)` means nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the backend exists but cannot be read.
    fn read(&self) -> Result<Option<String>, SessionError>;

    /// Replace the stored payload.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the payload cannot be written.
    fn write(&self, payload: &str) -> Result<(), SessionError>;

    /// Remove the stored payload. Erasing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if an existing payload cannot be removed.
    fn erase(&self) -> Result<(), SessionError>;
}

// --- File ---

/// JSON file, `0600` inside a `0700` directory on Unix.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.examdesk/session.json`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the home directory cannot be resolved.
    pub fn at_default_path() -> Result<Self, SessionError> {
        dirs::home_dir()
            .map(|home| Self::new(home.join(SESSION_DIR_NAME).join(SESSION_FILE_NAME)))
            .ok_or_else(|| {
                SessionError::Storage("home directory not found; cannot store session".into())
            })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for FilePersistence {
    fn kind(&self) -> &'static str {
        "file"
    }

    fn read(&self) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::Storage(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn write(&self, payload: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| SessionError::Storage(format!("mkdir {}: {e}", parent.display())))?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        fs::write(&self.path, payload)
            .map_err(|e| SessionError::Storage(format!("write {}: {e}", self.path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                SessionError::Storage(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        Ok(())
    }

    fn erase(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Storage(format!(
                "failed to delete {}: {e}",
                self.path.display()
            ))),
        }
    }
}

// --- Keyring ---

/// OS keychain entry holding the whole serialized session.
#[derive(Debug, Clone)]
pub struct KeyringPersistence {
    service: String,
}

impl KeyringPersistence {
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry, SessionError> {
        keyring::Entry::new(&self.service, KEYRING_USER)
            .map_err(|e| SessionError::Keyring(e.to_string()))
    }
}

impl Persistence for KeyringPersistence {
    fn kind(&self) -> &'static str {
        "keyring"
    }

    fn read(&self) -> Result<Option<String>, SessionError> {
        match self.entry()?.get_password() {
            Ok(payload) if payload.trim().is_empty() => Ok(None),
            Ok(payload) => Ok(Some(payload)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(SessionError::Keyring(e.to_string())),
        }
    }

    fn write(&self, payload: &str) -> Result<(), SessionError> {
        self.entry()?
            .set_password(payload)
            .map_err(|e| SessionError::Keyring(e.to_string()))
    }

    fn erase(&self) -> Result<(), SessionError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SessionError::Keyring(e.to_string())),
        }
    }
}

// --- Memory ---

/// Process-local slot. Nothing survives a restart; used by tests and `session.backend = "memory"`.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    slot: Mutex<Option<String>>,
}

impl MemoryPersistence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the slot, e.g. with a payload written by an earlier "run".
    #[must_use]
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(payload.into())),
        }
    }
}

impl Persistence for MemoryPersistence {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn read(&self) -> Result<Option<String>, SessionError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn write(&self, payload: &str) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(payload.to_string());
        Ok(())
    }

    fn erase(&self) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
