use async_trait::async_trait;
use drill_core::model::Session;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("invalid session key")]
    InvalidKey,

    #[error("connection error: {0}")]
    Connection(String),
}

/// Identifies one trainee's session in a store.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey(String);

impl SessionKey {
    const IMPLICIT: &'static str = "default";

    /// Creates a key from a caller-supplied token.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` for blank or overly long tokens.
    pub fn new(raw: impl Into<String>) -> Result<Self, StorageError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > 128 {
            return Err(StorageError::InvalidKey);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The single implicit user served when a request carries no key.
    #[must_use]
    pub fn implicit() -> Self {
        Self(Self::IMPLICIT.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionKey {
    fn default() -> Self {
        Self::implicit()
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionKey({})", self.0)
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Repository contract for per-user sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch a session, or a fresh one if the key has never been seen.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store is unavailable.
    async fn load(&self, key: &SessionKey) -> Result<Session, StorageError>;

    /// Persist a session, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn save(&self, key: &SessionKey, session: Session) -> Result<(), StorageError>;

    /// Forget a session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the key was never stored.
    async fn remove(&self, key: &SessionKey) -> Result<(), StorageError>;
}

/// Process-lifetime in-memory store; contents vanish on restart.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionKey, Session>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, key: &SessionKey) -> Result<Session, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).copied().unwrap_or_default())
    }

    async fn save(&self, key: &SessionKey, session: Session) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.clone(), session);
        Ok(())
    }

    async fn remove(&self, key: &SessionKey) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key).map(|_| ()).ok_or(StorageError::NotFound)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        Self { sessions }
    }
}
