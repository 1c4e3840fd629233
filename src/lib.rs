//! Thaw Timer - A countdown timer with pause and freeze interruptions
//!
//! The library core is [`timer`]: a [`Timer`] entity, pure elapsed/remaining
//! time queries over it and the [`TimerEngine`] state machine that drives it
//! against an injectable [`Clock`]. The remaining modules wire one timer into
//! an HTTP control service.

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::TimerError;
pub use state::{AppState, TimerSnapshot};
pub use timer::{Timer, TimerEngine, TimerId, TimerState};
pub use utils::signals::shutdown_signal;
