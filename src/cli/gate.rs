//! `agriplay gate`, `onboard` and `logout` command implementations.

use crate::cli::open_store;
use crate::config::load_config;
use crate::core::gate::{self, OnboardingGate};
use crate::error::Result;

/// Run the gate command.
///
/// Prints the route the app would open on.
///
/// # Errors
///
/// Returns an error if the config or the store cannot be opened. A failed
/// flag read is not an error; it routes to onboarding.
pub fn run() -> Result<()> {
    let config = load_config()?;
    let store = open_store(&config)?;

    let route = OnboardingGate::new().check_gate(store.as_ref());
    println!("{route}");

    Ok(())
}

/// Run the onboard command: mark onboarding as finished.
///
/// # Errors
///
/// Returns an error if the flag cannot be written.
pub fn run_onboard() -> Result<()> {
    let config = load_config()?;
    let store = open_store(&config)?;

    gate::mark_seen(store.as_ref())?;
    println!("Onboarding marked as seen.");

    Ok(())
}

/// Run the logout command: clear the onboarding flag.
///
/// # Errors
///
/// Returns an error if the flag cannot be removed.
pub fn run_logout() -> Result<()> {
    let config = load_config()?;
    let store = open_store(&config)?;

    gate::reset(store.as_ref())?;
    println!("Logged out; onboarding will show on next launch.");

    Ok(())
}
