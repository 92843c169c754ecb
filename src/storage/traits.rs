//! Storage trait definitions.

use crate::error::{Error, Result};

/// Flat string key-value persistence, the device-local storage the app
/// keeps its onboarding flag and chat sessions in.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Reject keys that are empty or could name a path outside the store.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] for empty keys, `.`/`..`, or keys
/// containing path separators or NUL.
pub fn validate_key(key: &str) -> Result<()> {
    let bad = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);
    if bad {
        return Err(Error::InvalidKey(key.to_string()));
    }
    Ok(())
}
