//! In-memory session mirrored to a [`Persistence`] backend.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::SessionError;
use crate::persistence::{MemoryPersistence, Persistence};
use crate::record::SessionRecord;

/// The current authenticated session, if any.
///
/// Holds at most one [`SessionRecord`]. Every mutation updates memory and the
/// persistence backend under the same lock, so readers never observe the two
/// out of step.
#[derive(Debug)]
pub struct SessionStore {
    persistence: Box<dyn Persistence>,
    current: Mutex<Option<SessionRecord>>,
}

impl SessionStore {
    /// Create an empty store over `persistence`. Call [`SessionStore::rehydrate`]
    /// to pick up a previously persisted session.
    #[must_use]
    pub fn new(persistence: impl Persistence + 'static) -> Self {
        Self {
            persistence: Box::new(persistence),
            current: Mutex::new(None),
        }
    }

    /// Store with nothing persisted beyond this process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryPersistence::new())
    }

    /// Name of the persistence backend (`file`, `keyring`, `memory`).
    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.persistence.kind()
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn get(&self) -> Option<SessionRecord> {
        self.slot().clone()
    }

    /// Bearer token of the current session.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.slot().as_ref().map(|record| record.token.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.slot().is_some()
    }

    /// Replace the current session, persisting it first.
    ///
    /// On failure the in-memory session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidToken`] for a blank token or user id, or
    /// the backend's error if the record cannot be written.
    pub fn set(&self, record: SessionRecord) -> Result<(), SessionError> {
        if !record.is_complete() {
            return Err(SessionError::InvalidToken(
                "session needs a non-empty token and user id".into(),
            ));
        }
        let payload = serde_json::to_string(&record)?;

        let mut slot = self.slot();
        self.persistence.write(&payload)?;
        *slot = Some(record);
        tracing::debug!(backend = self.backend(), "session stored");
        Ok(())
    }

    /// Drop the current session from memory and storage.
    ///
    /// Memory is always cleared. If the persisted copy cannot be removed it is
    /// overwritten with an empty payload, which every backend reads back as
    /// "no session", so the next start-up does not rehydrate it.
    ///
    /// # Errors
    ///
    /// Returns the backend's erase error if the persisted copy can be neither
    /// removed nor blanked. It may then be rehydrated on the next start-up.
    pub fn clear(&self) -> Result<(), SessionError> {
        let mut slot = self.slot();
        *slot = None;
        if let Err(error) = self.persistence.erase() {
            if self.persistence.write("").is_err() {
                return Err(error);
            }
            tracing::warn!(%error, backend = self.backend(), "cannot remove persisted session; blanked it instead");
        }
        tracing::debug!(backend = self.backend(), "session cleared");
        Ok(())
    }

    /// Load the persisted session into memory.
    ///
    /// A missing, unreadable, or malformed payload leaves the store empty;
    /// this never fails. Calling it repeatedly without intervening writes
    /// yields the same state each time.
    pub fn rehydrate(&self) -> Option<SessionRecord> {
        let restored = match self.persistence.read() {
            Ok(Some(raw)) => SessionRecord::from_persisted(&raw),
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(%error, backend = self.backend(), "cannot read persisted session; starting signed out");
                None
            }
        };

        let mut slot = self.slot();
        slot.clone_from(&restored);
        restored
    }

    fn slot(&self) -> MutexGuard<'_, Option<SessionRecord>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
