//! Chat session types.

use crate::config::ChatConfig;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One persisted conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session identifier, fixed at creation.
    pub id: String,

    /// Snippet of the first message. Recomputed on every save.
    pub title: String,

    /// Messages in conversation order.
    pub messages: Vec<Message>,

    /// Epoch milliseconds of the last save.
    pub last_modified: i64,
}

impl Session {
    /// Build a session record from the active message list, stamped now.
    #[must_use]
    pub fn from_messages(id: &str, messages: Vec<Message>, config: &ChatConfig) -> Self {
        Self {
            id: id.to_string(),
            title: title_snippet(&messages, config.title_max_chars, &config.untitled_title),
            messages,
            last_modified: now_millis(),
        }
    }
}

/// A single chat message. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier.
    pub id: String,

    /// Message body.
    pub text: String,

    /// Who wrote it.
    pub sender: Sender,

    /// Epoch milliseconds at creation.
    pub timestamp: i64,
}

impl Message {
    /// Create a message with a fresh id and the current timestamp.
    #[must_use]
    pub fn new(text: &str, sender: Sender) -> Self {
        Self {
            id: new_id(),
            text: text.to_string(),
            sender,
            timestamp: now_millis(),
        }
    }
}

/// Message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person using the app.
    User,

    /// The chatbot. Older blobs stored this as `"ai"`.
    #[serde(alias = "ai")]
    Assistant,
}

/// Generate a time-ordered unique identifier.
#[must_use]
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

/// Current time in epoch milliseconds.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Derive a session title from its first message.
///
/// Keeps the first `max_chars` characters, appending `...` when the text
/// was cut. Falls back to `placeholder` when there is no first message or
/// its text is empty.
#[must_use]
pub fn title_snippet(messages: &[Message], max_chars: usize, placeholder: &str) -> String {
    let first = messages.first().map_or("", |m| m.text.as_str());
    if first.is_empty() {
        return placeholder.to_string();
    }

    match first.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &first[..cut]),
        None => first.to_string(),
    }
}
