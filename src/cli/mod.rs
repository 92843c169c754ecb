//! CLI command implementations.

pub mod chat;
pub mod gate;
pub mod recommend;

use crate::config::Config;
use crate::error::Result;
use crate::storage::{FileBackend, KeyValueStore};
use std::sync::Arc;

/// Open the file store under the configured home directory.
fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    Ok(Arc::new(FileBackend::new(config.storage.path.clone())?))
}
