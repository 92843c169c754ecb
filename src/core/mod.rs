//! Chat sessions and launch routing.

pub mod controller;
pub mod gate;
pub mod state;
pub mod store;

pub use controller::ChatController;
pub use gate::{GateState, OnboardingGate, Route};
pub use state::{Message, Sender, Session};
pub use store::{SessionStore, SessionSummary};
