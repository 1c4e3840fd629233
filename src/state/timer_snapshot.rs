//! Point-in-time view of a timer and every query over it

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Timer, TimerId, TimerState};

/// Every timer query evaluated at one instant, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub id: TimerId,
    pub state: TimerState,
    pub previous_state: TimerState,
    pub duration_ms: i64,
    pub remaining_ms: i64,
    /// Fill amount for a remaining-time bar
    pub remaining_fraction: f64,
    pub elapsed_paused_ms: i64,
    pub total_paused_ms: i64,
    pub freeze_duration_ms: i64,
    pub elapsed_freeze_ms: i64,
    pub total_freeze_ms: i64,
    pub defrosted: bool,
    pub expired: bool,
    pub taken_at: DateTime<Utc>,
}

fn ms(delta: TimeDelta) -> i64 {
    delta.num_milliseconds()
}

impl TimerSnapshot {
    /// Evaluate all queries against `timer` at `now`
    pub fn capture(timer: &Timer, now: DateTime<Utc>) -> Self {
        Self {
            id: timer.id().clone(),
            state: timer.state(),
            previous_state: timer.previous_state(),
            duration_ms: ms(timer.duration()),
            remaining_ms: ms(timer.remaining_time(now)),
            remaining_fraction: timer.remaining_fraction(now),
            elapsed_paused_ms: ms(timer.elapsed_paused_time(now)),
            total_paused_ms: ms(timer.total_elapsed_paused_time(now)),
            freeze_duration_ms: ms(timer.freeze_duration()),
            elapsed_freeze_ms: ms(timer.elapsed_freeze_time(now)),
            total_freeze_ms: ms(timer.total_elapsed_freeze_time(now)),
            defrosted: timer.is_defrosted(now),
            expired: timer.is_expired(now),
            taken_at: now,
        }
    }

    pub fn remaining(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.remaining_ms)
    }

    /// Whether the countdown is consuming time right now
    pub fn is_counting(&self) -> bool {
        self.state == TimerState::Running && !self.expired
    }
}
