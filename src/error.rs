//! Error types for timer construction

use thiserror::Error;

/// Errors surfaced by the timer library.
///
/// Transitions never fail; only malformed configuration is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("invalid timer configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl TimerError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
