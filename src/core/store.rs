//! Durable ordered list of chat sessions.
//!
//! The whole list lives as one JSON array under a single key. Newly seen
//! sessions go to the front; known sessions are replaced where they sit.
//! Every read-modify-write cycle runs under one mutex so that several
//! controllers sharing a store cannot drop each other's updates.

use crate::core::state::Session;
use crate::error::{Error, Result};
use crate::storage::KeyValueStore;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Session list persisted in a [`KeyValueStore`].
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
    write_lock: Mutex<()>,
}

/// Summary information for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Session identifier.
    pub id: String,

    /// Session title.
    pub title: String,

    /// Number of messages.
    pub message_count: usize,

    /// Epoch milliseconds of the last save.
    pub last_modified: i64,
}

impl SessionStore {
    /// Create a store that keeps its list under `key`.
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Key the session list is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load every session, in stored order.
    ///
    /// A missing or blank value is an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the stored value is not a
    /// valid session list.
    pub fn load_all(&self) -> Result<Vec<Session>> {
        match self.kv.get(&self.key)? {
            Some(blob) if !blob.trim().is_empty() => Ok(serde_json::from_str(&blob)?),
            _ => Ok(Vec::new()),
        }
    }

    /// Load every session, logging any failure and returning an empty list.
    #[must_use]
    pub fn load_all_or_default(&self) -> Vec<Session> {
        self.load_all().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "failed to load chat sessions");
            Vec::new()
        })
    }

    /// Overwrite the stored list with `sessions`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_all(&self, sessions: &[Session]) -> Result<()> {
        let _guard = self.lock();
        self.write(sessions)
    }

    /// Insert `session` at the front, or replace the entry with the same id
    /// in place. Returns the list as stored.
    ///
    /// An unparseable stored list is treated as empty and overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or write fails.
    pub fn upsert(&self, session: &Session) -> Result<Vec<Session>> {
        let _guard = self.lock();
        let mut sessions = self.load_for_update()?;
        upsert_into(&mut sessions, session.clone());
        self.write(&sessions)?;
        debug!(id = %session.id, count = sessions.len(), "upserted chat session");
        Ok(sessions)
    }

    /// Remove the session with `id`. Returns the list as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or write fails.
    pub fn delete(&self, id: &str) -> Result<Vec<Session>> {
        let _guard = self.lock();
        let mut sessions = self.load_for_update()?;
        sessions.retain(|s| s.id != id);
        self.write(&sessions)?;
        debug!(id, count = sessions.len(), "deleted chat session");
        Ok(sessions)
    }

    /// Get one session by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored list cannot be loaded.
    pub fn get(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.load_all()?.into_iter().find(|s| s.id == id))
    }

    /// Summaries of the first `limit` sessions, in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored list cannot be loaded.
    pub fn list(&self, limit: usize) -> Result<Vec<SessionSummary>> {
        Ok(self
            .load_all()?
            .into_iter()
            .take(limit)
            .map(|s| SessionSummary {
                message_count: s.messages.len(),
                id: s.id,
                title: s.title,
                last_modified: s.last_modified,
            })
            .collect())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn load_for_update(&self) -> Result<Vec<Session>> {
        match self.load_all() {
            Err(Error::Serde(e)) => {
                warn!(key = %self.key, error = %e, "discarding unreadable chat sessions");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    fn write(&self, sessions: &[Session]) -> Result<()> {
        let blob = serde_json::to_string(sessions)?;
        self.kv.set(&self.key, &blob)
    }
}

/// Replace the entry with the same id in place, or insert at the front.
pub fn upsert_into(sessions: &mut Vec<Session>, session: Session) {
    match sessions.iter().position(|s| s.id == session.id) {
        Some(index) => sessions[index] = session,
        None => sessions.insert(0, session),
    }
}
