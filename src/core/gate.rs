//! First-launch routing.
//!
//! A single persisted flag decides whether the app opens on the onboarding
//! carousel or the login screen. The decision is taken once per launch.

use crate::error::Result;
use crate::storage::KeyValueStore;
use std::fmt;
use tracing::{debug, warn};

/// Key of the onboarding flag.
pub const ONBOARDING_FLAG_KEY: &str = "hasSeenOnboarding";

/// Initial navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Show the onboarding carousel.
    Onboarding,

    /// Onboarding already seen; go to login.
    Login,
}

impl Route {
    /// Route path as used by the navigator.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Onboarding => "/onboarding",
            Self::Login => "/login",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Gate state. Moves to `Decided` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    /// Flag not read yet.
    #[default]
    Undetermined,

    /// Route chosen for this launch.
    Decided(Route),
}

/// One-shot onboarding gate.
#[derive(Debug, Default)]
pub struct OnboardingGate {
    state: GateState,
}

impl OnboardingGate {
    /// Create an undetermined gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Decide the initial route.
    ///
    /// Only the literal `"true"` routes to login. A missing flag, any other
    /// value, or a failed read routes to onboarding. Later calls return the
    /// first decision without touching the store.
    pub fn check_gate(&mut self, kv: &dyn KeyValueStore) -> Route {
        if let GateState::Decided(route) = self.state {
            return route;
        }

        let route = match kv.get(ONBOARDING_FLAG_KEY) {
            Ok(Some(value)) if value == "true" => Route::Login,
            Ok(_) => Route::Onboarding,
            Err(e) => {
                warn!(error = %e, "failed to read onboarding flag");
                Route::Onboarding
            }
        };

        debug!(%route, "onboarding gate decided");
        self.state = GateState::Decided(route);
        route
    }
}

/// Record that onboarding was completed.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn mark_seen(kv: &dyn KeyValueStore) -> Result<()> {
    kv.set(ONBOARDING_FLAG_KEY, "true")
}

/// Clear the onboarding flag so the next launch shows onboarding again.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn reset(kv: &dyn KeyValueStore) -> Result<()> {
    kv.remove(ONBOARDING_FLAG_KEY)
}
