//! agriplay - local state of the Agriplay gardening app.
//!
//! Persists chat sessions and the first-launch onboarding flag in a small
//! key-value store, and talks to the crop-recommendation service with a
//! bundled fallback when it is unreachable.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod recommend;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
