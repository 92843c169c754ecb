//! File-based storage backend.

use crate::error::Result;
use crate::storage::traits::{KeyValueStore, validate_key};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-based storage backend with atomic writes.
///
/// Each key is one file under `<base_dir>/store/`.
#[derive(Debug)]
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    /// Create a new file backend.
    ///
    /// Creates the store directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be created.
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(base_dir.join("store"))?;
        Ok(Self { base_dir })
    }

    /// Get the path to the file backing `key`.
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.base_dir.join("store").join(format!("{key}.val")))
    }
}

impl KeyValueStore for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        let temp = path.with_extension("tmp");

        fs::write(&temp, value)?;

        // Atomic rename - a crash mid-write leaves the previous value intact
        fs::rename(&temp, &path)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Get the default agriplay home directory.
///
/// Uses `AGRIPLAY_HOME` environment variable if set, otherwise `~/.agriplay`.
#[must_use]
pub fn get_agriplay_home() -> PathBuf {
    if let Ok(home) = std::env::var("AGRIPLAY_HOME") {
        PathBuf::from(home)
    } else if let Some(home) = dirs::home_dir() {
        home.join(".agriplay")
    } else {
        PathBuf::from(".agriplay")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    fn create_test_backend() -> (FileBackend, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().to_path_buf()).unwrap();
        (backend, temp_dir)
    }

    #[test]
    fn creates_store_directory() {
        let temp_dir = TempDir::new().unwrap();
        let _backend = FileBackend::new(temp_dir.path().to_path_buf()).unwrap();
        assert!(temp_dir.path().join("store").exists());
    }

    #[test]
    fn get_missing_key() {
        let (store, _temp) = create_test_backend();
        assert!(store.get("nonexistent").unwrap().is_none());
    }

    #[test]
    fn set_and_get() {
        let (store, _temp) = create_test_backend();
        store.set("hasSeenOnboarding", "true").unwrap();
        assert_eq!(
            store.get("hasSeenOnboarding").unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn set_overwrites_previous_value() {
        let (store, _temp) = create_test_backend();
        store.set("chat_sessions", "[1]").unwrap();
        store.set("chat_sessions", "[]").unwrap();
        assert_eq!(store.get("chat_sessions").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn atomic_write_creates_no_temp_file() {
        let (store, temp_dir) = create_test_backend();
        store.set("chat_sessions", "[]").unwrap();

        let temp_path = temp_dir.path().join("store").join("chat_sessions.tmp");
        assert!(!temp_path.exists());

        let main_path = temp_dir.path().join("store").join("chat_sessions.val");
        assert!(main_path.exists());
    }

    #[test]
    fn value_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = FileBackend::new(temp_dir.path().to_path_buf()).unwrap();
            store.set("chat_sessions", "[]").unwrap();
        }
        let store = FileBackend::new(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("chat_sessions").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn remove_deletes_file() {
        let (store, temp_dir) = create_test_backend();
        store.set("hasSeenOnboarding", "true").unwrap();

        let path = temp_dir.path().join("store").join("hasSeenOnboarding.val");
        assert!(path.exists());

        store.remove("hasSeenOnboarding").unwrap();
        assert!(!path.exists());
        assert!(store.get("hasSeenOnboarding").unwrap().is_none());
    }

    #[test]
    fn remove_nonexistent_key_succeeds() {
        let (store, _temp) = create_test_backend();
        store.remove("nonexistent").unwrap();
    }

    #[test]
    fn stray_tmp_file_is_not_a_value() {
        let (store, temp_dir) = create_test_backend();
        fs::write(temp_dir.path().join("store").join("orphan.tmp"), "x").unwrap();
        assert!(store.get("orphan").unwrap().is_none());
    }

    #[test]
    fn path_traversal_key_rejected() {
        let (store, _temp) = create_test_backend();
        assert!(matches!(
            store.set("../escape", "x"),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(store.get(".."), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn unreadable_value_is_an_error() {
        let (store, temp_dir) = create_test_backend();
        // A directory where the value file should be cannot be read as a string
        fs::create_dir(temp_dir.path().join("store").join("broken.val")).unwrap();
        assert!(store.get("broken").is_err());
    }
}
