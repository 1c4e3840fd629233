//! Countdown timer core
//!
//! This module contains the timer entity, its elapsed/remaining time
//! arithmetic and the state machine that drives it.

mod delta;
pub mod engine;
pub mod entity;
mod queries;

// Re-export main types
pub use engine::{TimerEngine, TransitionListener};
pub use entity::{Timer, TimerId, TimerState};
