//! Active chat session handling.
//!
//! The controller owns the message list of the session being shown and
//! reconciles it into the [`SessionStore`] after every change. In-memory
//! state is always updated first; a failed write is logged and returned,
//! and the next successful write catches the store up.

use crate::config::ChatConfig;
use crate::core::state::{Message, Sender, Session, new_id};
use crate::core::store::{SessionStore, upsert_into};
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// Chat controller for one screen.
pub struct ChatController {
    store: Arc<SessionStore>,
    config: ChatConfig,
    sessions: Vec<Session>,
    active_id: String,
    messages: Vec<Message>,
}

impl ChatController {
    /// Load all sessions and start a fresh, unsaved session.
    ///
    /// A store that cannot be read yields an empty session list.
    #[must_use]
    pub fn open(store: Arc<SessionStore>, config: ChatConfig) -> Self {
        let sessions = store.load_all_or_default();
        Self {
            store,
            config,
            sessions,
            active_id: new_id(),
            messages: Vec::new(),
        }
    }

    /// Id of the active session.
    #[must_use]
    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    /// Messages of the active session.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// All known sessions, front first.
    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Switch to a new empty session. Nothing is written until the first
    /// message is appended.
    pub fn start_new_session(&mut self) -> &str {
        self.active_id = new_id();
        self.messages.clear();
        debug!(id = %self.active_id, "started new chat session");
        &self.active_id
    }

    /// Make the stored session `id` active.
    ///
    /// The session list is re-read first so sessions written through another
    /// controller on the same store are found. If the read fails the cached
    /// list is used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionNotFound`] if no such session is known; the
    /// active session is left unchanged.
    pub fn load_session(&mut self, id: &str) -> Result<&[Message]> {
        match self.store.load_all() {
            Ok(stored) => self.sessions = stored,
            Err(e) => warn!(error = %e, "failed to reload chat sessions, using cached list"),
        }

        let session = self
            .sessions
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;

        self.messages = session.messages.clone();
        self.active_id = session.id.clone();
        Ok(&self.messages)
    }

    /// Append a message to the active session and save it.
    ///
    /// # Errors
    ///
    /// Returns the storage error if saving fails. The message stays
    /// appended in memory either way.
    pub fn append_message(&mut self, text: &str, sender: Sender) -> Result<()> {
        self.messages.push(Message::new(text, sender));
        self.upsert_active_session()
    }

    /// Save the active session: replace it where it sits, or insert it at
    /// the front if the store hasn't seen it. Empty sessions are skipped.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the write fails.
    pub fn upsert_active_session(&mut self) -> Result<()> {
        if self.messages.is_empty() {
            debug!(id = %self.active_id, "not saving empty chat session");
            return Ok(());
        }

        let session = Session::from_messages(&self.active_id, self.messages.clone(), &self.config);
        upsert_into(&mut self.sessions, session.clone());

        match self.store.upsert(&session) {
            Ok(stored) => {
                self.sessions = stored;
                Ok(())
            }
            Err(e) => {
                warn!(id = %session.id, error = %e, "failed to save chat session");
                Err(e)
            }
        }
    }

    /// Delete session `id`. Deleting the active session starts a new one.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the write fails.
    pub fn delete_session(&mut self, id: &str) -> Result<()> {
        self.sessions.retain(|s| s.id != id);
        let result = self.store.delete(id);

        if id == self.active_id {
            self.start_new_session();
        }

        match result {
            Ok(stored) => {
                self.sessions = stored;
                Ok(())
            }
            Err(e) => {
                warn!(id, error = %e, "failed to delete chat session");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryBackend};

    fn controller() -> (ChatController, Arc<SessionStore>) {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryBackend::new());
        let store = Arc::new(SessionStore::new(kv, "chat_sessions"));
        (
            ChatController::open(Arc::clone(&store), ChatConfig::default()),
            store,
        )
    }

    #[test]
    fn open_starts_with_empty_session() {
        let (chat, store) = controller();
        assert!(chat.messages().is_empty());
        assert!(!chat.active_id().is_empty());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn append_persists_in_order() {
        let (mut chat, store) = controller();
        chat.append_message("halo", Sender::User).unwrap();
        chat.append_message("Halo sobat tani!", Sender::Assistant).unwrap();
        chat.append_message("kentang?", Sender::User).unwrap();

        let stored = store.load_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, chat.active_id());
        let texts: Vec<&str> = stored[0].messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["halo", "Halo sobat tani!", "kentang?"]);
        assert_eq!(stored[0].messages, chat.messages());
    }

    #[test]
    fn new_session_is_not_persisted() {
        let (mut chat, store) = controller();
        chat.append_message("first", Sender::User).unwrap();
        chat.start_new_session();
        assert_eq!(store.load_all().unwrap().len(), 1);
        assert!(chat.messages().is_empty());
    }

    #[test]
    fn upsert_on_empty_session_writes_nothing() {
        let (mut chat, store) = controller();
        chat.upsert_active_session().unwrap();
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn second_session_goes_to_front() {
        let (mut chat, store) = controller();
        chat.append_message("first", Sender::User).unwrap();
        let first = chat.active_id().to_string();
        chat.start_new_session();
        chat.append_message("second", Sender::User).unwrap();

        let stored = store.load_all().unwrap();
        assert_eq!(stored[0].id, chat.active_id());
        assert_eq!(stored[1].id, first);

        // Writing to the older session keeps it in place
        chat.load_session(&first).unwrap();
        chat.append_message("more", Sender::User).unwrap();
        let stored = store.load_all().unwrap();
        assert_eq!(stored[1].id, first);
        assert_eq!(stored[1].messages.len(), 2);
    }

    #[test]
    fn load_session_replaces_active_state() {
        let (mut chat, store) = controller();
        chat.append_message("halo", Sender::User).unwrap();
        let id = chat.active_id().to_string();
        chat.start_new_session();

        let messages = chat.load_session(&id).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(chat.active_id(), id);
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn load_unknown_session_keeps_active_state() {
        let (mut chat, _store) = controller();
        chat.append_message("halo", Sender::User).unwrap();
        let id = chat.active_id().to_string();

        assert!(matches!(
            chat.load_session("missing"),
            Err(Error::SessionNotFound(_))
        ));
        assert_eq!(chat.active_id(), id);
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn delete_active_session_starts_fresh() {
        let (mut chat, store) = controller();
        chat.append_message("halo", Sender::User).unwrap();
        let deleted = chat.active_id().to_string();

        chat.delete_session(&deleted).unwrap();

        assert_ne!(chat.active_id(), deleted);
        assert!(chat.messages().is_empty());
        assert!(chat.sessions().is_empty());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn delete_other_session_keeps_active() {
        let (mut chat, store) = controller();
        chat.append_message("old", Sender::User).unwrap();
        let old = chat.active_id().to_string();
        chat.start_new_session();
        chat.append_message("new", Sender::User).unwrap();
        let active = chat.active_id().to_string();

        chat.delete_session(&old).unwrap();

        assert_eq!(chat.active_id(), active);
        assert_eq!(chat.messages().len(), 1);
        let stored = store.load_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, active);
    }

    #[test]
    fn repeated_upsert_only_touches_last_modified() {
        let (mut chat, store) = controller();
        chat.append_message("halo", Sender::User).unwrap();
        let before = store.load_all().unwrap();

        chat.upsert_active_session().unwrap();
        chat.upsert_active_session().unwrap();
        let after = store.load_all().unwrap();

        assert_eq!(after.len(), before.len());
        assert_eq!(after[0].id, before[0].id);
        assert_eq!(after[0].title, before[0].title);
        assert_eq!(after[0].messages, before[0].messages);
        assert!(after[0].last_modified >= before[0].last_modified);
    }

    #[test]
    fn controllers_sharing_a_store_keep_both_sessions() {
        let (mut a, store) = controller();
        let mut b = ChatController::open(Arc::clone(&store), ChatConfig::default());

        a.append_message("from a", Sender::User).unwrap();
        b.append_message("from b", Sender::User).unwrap();

        let stored = store.load_all().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, b.active_id());
        assert_eq!(stored[1].id, a.active_id());
    }

    #[test]
    fn repeated_upsert_keeps_position_among_other_sessions() {
        let (mut chat, store) = controller();
        chat.append_message("older", Sender::User).unwrap();
        let older = chat.active_id().to_string();
        chat.start_new_session();
        chat.append_message("newer", Sender::User).unwrap();

        chat.load_session(&older).unwrap();
        let before = store.load_all().unwrap();
        assert_eq!(before[1].id, older);

        chat.upsert_active_session().unwrap();
        chat.upsert_active_session().unwrap();
        let after = store.load_all().unwrap();

        assert_eq!(after.len(), 2);
        assert_eq!(after[0].id, before[0].id);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1].id, older);
        assert_eq!(after[1].messages, before[1].messages);
        assert!(after[1].last_modified >= before[1].last_modified);
    }

    #[test]
    fn load_session_finds_session_written_by_another_controller() {
        let (mut a, store) = controller();
        let mut b = ChatController::open(Arc::clone(&store), ChatConfig::default());

        b.append_message("from b", Sender::User).unwrap();
        let id = b.active_id().to_string();

        let messages = a.load_session(&id).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "from b");
        assert_eq!(a.active_id(), id);
        assert!(a.sessions().iter().any(|s| s.id == id));
    }

    #[test]
    fn load_session_uses_cache_when_store_unreadable() {
        let kv = Arc::new(MemoryBackend::new());
        let store = Arc::new(SessionStore::new(kv.clone(), "chat_sessions"));
        let mut chat = ChatController::open(store, ChatConfig::default());
        chat.append_message("halo", Sender::User).unwrap();
        let id = chat.active_id().to_string();
        chat.start_new_session();

        kv.set("chat_sessions", "{ not json").unwrap();

        let messages = chat.load_session(&id).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(chat.active_id(), id);
    }
}
