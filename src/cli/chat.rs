//! `agriplay chat` command implementations.

use crate::cli::open_store;
use crate::config::{ChatConfig, load_config};
use crate::core::state::{Message, Sender};
use crate::core::{ChatController, SessionStore};
use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use std::sync::Arc;

/// Default number of sessions to show.
const DEFAULT_LIMIT: usize = 20;

fn open_sessions() -> Result<(Arc<SessionStore>, ChatConfig)> {
    let config = load_config()?;
    let kv = open_store(&config)?;
    let store = Arc::new(SessionStore::new(kv, config.chat.sessions_key.clone()));
    Ok((store, config.chat))
}

/// Run the chat list command.
///
/// Shows sessions front first with id, last change and title.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or read.
pub fn run_list(limit: Option<usize>) -> Result<()> {
    let (store, _) = open_sessions()?;
    let sessions = store.list(limit.unwrap_or(DEFAULT_LIMIT))?;

    if sessions.is_empty() {
        println!("No chat sessions.");
        return Ok(());
    }

    println!("{:<38} {:<17} {:>5}  Title", "Session ID", "Modified", "Msgs");
    println!("{}", "─".repeat(90));
    for summary in &sessions {
        println!(
            "{:<38} {:<17} {:>5}  {}",
            summary.id,
            format_local_time(summary.last_modified),
            summary.message_count,
            summary.title
        );
    }
    println!("{}", "─".repeat(90));
    println!("Showing {} session(s)", sessions.len());

    Ok(())
}

/// Run the chat show command.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the session is not found.
pub fn run_show(id: &str) -> Result<()> {
    let (store, _) = open_sessions()?;
    let session = store
        .get(id)?
        .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;

    println!("Session: {}", session.id);
    println!("Title: {}", session.title);
    println!("Modified: {}", format_local_time(session.last_modified));
    println!();
    for message in &session.messages {
        println!("{}", format_message(message));
    }

    Ok(())
}

/// Run the chat send command.
///
/// Appends one message to `session`, or to a new session if none is given,
/// and prints the session id.
///
/// # Errors
///
/// Returns an error if the session is unknown or the write fails.
pub fn run_send(text: &str, session: Option<&str>, assistant: bool) -> Result<()> {
    let (store, config) = open_sessions()?;
    let mut chat = ChatController::open(store, config);

    let sender = if assistant {
        Sender::Assistant
    } else {
        Sender::User
    };
    send(&mut chat, text, session, sender)?;
    println!("{}", chat.active_id());

    Ok(())
}

/// Run the chat delete command.
///
/// # Errors
///
/// Returns an error if the session is unknown or the write fails.
pub fn run_delete(id: &str) -> Result<()> {
    let (store, config) = open_sessions()?;
    let mut chat = ChatController::open(store, config);

    if !chat.sessions().iter().any(|s| s.id == id) {
        return Err(Error::SessionNotFound(id.to_string()));
    }
    chat.delete_session(id)?;
    println!("Deleted session {id}.");

    Ok(())
}

/// Append `text` to `session` (or a new session).
fn send(chat: &mut ChatController, text: &str, session: Option<&str>, sender: Sender) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::InvalidArgument("message text is empty".to_string()));
    }
    if let Some(id) = session {
        chat.load_session(id)?;
    }
    chat.append_message(text, sender)
}

/// Format epoch milliseconds as local time for display.
fn format_local_time(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map_or_else(
        || "-".to_string(),
        |utc| {
            let local: DateTime<Local> = utc.into();
            local.format("%Y-%m-%d %H:%M").to_string()
        },
    )
}

/// One display line per message.
fn format_message(message: &Message) -> String {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Assistant => "ai",
    };
    format!(
        "[{}] {who:>3}: {}",
        format_local_time(message.timestamp),
        message.text
    )
}
