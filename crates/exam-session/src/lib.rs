//! # exam-session
//!
//! Single source of truth for "is a user currently authenticated, and as whom".
//!
//! The [`SessionStore`] keeps the current [`SessionRecord`] in memory and mirrors
//! every mutation to a pluggable [`Persistence`] backend (JSON file, OS keychain,
//! or process memory for tests). It is read by every outgoing request to attach
//! the bearer token, written on login, and cleared on logout or when the backend
//! rejects the token.

pub mod error;
pub mod persistence;
pub mod record;
pub mod store;
pub mod token;

pub use error::SessionError;
pub use persistence::{FilePersistence, KeyringPersistence, MemoryPersistence, Persistence};
pub use record::{ExamAssignment, SessionRecord, UserProfile};
pub use store::SessionStore;
