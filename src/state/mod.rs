//! State management module
//!
//! This module contains the shared application state and the snapshot
//! structure published to pollers.

pub mod app_state;
pub mod timer_snapshot;

// Re-export main types
pub use app_state::{AppState, SharedClock, TransitionOutcome};
pub use timer_snapshot::TimerSnapshot;
