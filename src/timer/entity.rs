//! Timer data entity

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::delta::{checked_duration, saturating_add};
use crate::error::TimerError;

const DEFAULT_ID: &str = "timer-default";

/// Lifecycle state of a countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// Never started
    #[default]
    Default,
    Running,
    Paused,
    Frozen,
    Stopped,
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerState::Default => "default",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
            TimerState::Frozen => "frozen",
            TimerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Opaque timer identifier, stable for the timer's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(String);

impl TimerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TimerId {
    fn default() -> Self {
        Self(DEFAULT_ID.to_string())
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Configuration and accumulated timing facts for one countdown.
///
/// The entity only records facts. Transitions live on
/// [`TimerEngine`](crate::timer::TimerEngine) and the arithmetic over these
/// fields lives in the query methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    pub(crate) id: TimerId,
    pub(crate) state: TimerState,
    pub(crate) previous_state: TimerState,
    #[serde(with = "nanos")]
    pub(crate) duration: TimeDelta,
    pub(crate) start_time: Option<DateTime<Utc>>,
    pub(crate) stop_time: Option<DateTime<Utc>>,
    pub(crate) pause_start_time: Option<DateTime<Utc>>,
    pub(crate) pause_end_time: Option<DateTime<Utc>>,
    pub(crate) freeze_start_time: Option<DateTime<Utc>>,
    #[serde(with = "nanos")]
    pub(crate) freeze_duration: TimeDelta,
    #[serde(with = "nanos")]
    pub(crate) total_paused_time: TimeDelta,
    #[serde(with = "nanos")]
    pub(crate) total_freezed_time: TimeDelta,
    /// Pause time carved out of the currently open freeze window
    #[serde(with = "nanos")]
    pub(crate) total_paused_during_freezed_time: TimeDelta,
}

impl Timer {
    /// Create a timer with an explicit id and duration.
    ///
    /// The duration must be non-negative and fit in i64 nanoseconds.
    pub fn new(id: impl Into<TimerId>, duration: TimeDelta) -> Result<Self, TimerError> {
        Ok(Self {
            id: id.into(),
            duration: checked_duration(duration)?,
            ..Self::default()
        })
    }

    /// Create a timer with a generated id
    pub fn with_duration(duration: TimeDelta) -> Result<Self, TimerError> {
        Self::new(TimerId::generate(), duration)
    }

    /// Carry the id and duration forward into a fresh timer, discarding progress
    pub fn carry_forward(&self) -> Self {
        Self {
            id: self.id.clone(),
            duration: self.duration,
            ..Self::default()
        }
    }

    /// Return to the never-started state, keeping only id and duration
    pub fn reset(&mut self) {
        *self = self.carry_forward();
    }

    /// Move to `next`, remembering the state held until now
    pub(crate) fn set_state(&mut self, next: TimerState) {
        self.previous_state = self.state;
        self.state = next;
    }

    /// Close the current pause, crediting it into the paused total
    pub(crate) fn record_pause_end(&mut self, at: DateTime<Utc>) {
        self.pause_end_time = Some(at);
        self.total_paused_time = saturating_add(self.total_paused_time, self.last_pause_time());
    }

    /// Length of the most recently closed pause
    pub fn last_pause_time(&self) -> TimeDelta {
        match (self.pause_start_time, self.pause_end_time) {
            (Some(start), Some(end)) => end - start,
            _ => TimeDelta::zero(),
        }
    }

    pub fn id(&self) -> &TimerId {
        &self.id
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn previous_state(&self) -> TimerState {
        self.previous_state
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn stop_time(&self) -> Option<DateTime<Utc>> {
        self.stop_time
    }

    pub fn pause_start_time(&self) -> Option<DateTime<Utc>> {
        self.pause_start_time
    }

    pub fn pause_end_time(&self) -> Option<DateTime<Utc>> {
        self.pause_end_time
    }

    pub fn freeze_start_time(&self) -> Option<DateTime<Utc>> {
        self.freeze_start_time
    }

    pub fn freeze_duration(&self) -> TimeDelta {
        self.freeze_duration
    }

    pub fn total_paused_time(&self) -> TimeDelta {
        self.total_paused_time
    }

    pub fn total_freezed_time(&self) -> TimeDelta {
        self.total_freezed_time
    }

    pub fn total_paused_during_freezed_time(&self) -> TimeDelta {
        self.total_paused_during_freezed_time
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            id: TimerId::default(),
            state: TimerState::Default,
            previous_state: TimerState::Default,
            duration: TimeDelta::zero(),
            start_time: None,
            stop_time: None,
            pause_start_time: None,
            pause_end_time: None,
            freeze_start_time: None,
            freeze_duration: TimeDelta::zero(),
            total_paused_time: TimeDelta::zero(),
            total_freezed_time: TimeDelta::zero(),
            total_paused_during_freezed_time: TimeDelta::zero(),
        }
    }
}

/// Serde codec storing a `TimeDelta` as whole nanoseconds
mod nanos {
    use chrono::TimeDelta;
    use serde::{ser, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        let nanos = value
            .num_nanoseconds()
            .ok_or_else(|| ser::Error::custom("duration out of nanosecond range"))?;
        serializer.serialize_i64(nanos)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        i64::deserialize(deserializer).map(TimeDelta::nanoseconds)
    }
}
