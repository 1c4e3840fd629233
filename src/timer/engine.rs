//! Timer state machine
//!
//! Transitions are defensive: a call made in a state where it does not apply
//! is ignored and reported as `false`, so a UI can fire them speculatively.

use chrono::TimeDelta;
use tracing::{debug, warn};

use super::delta::{in_range, saturating_add};
use super::entity::{Timer, TimerState};
use crate::clock::{Clock, SystemClock};

/// Callback fired after every accepted transition
pub type TransitionListener = Box<dyn Fn(&Timer) + Send + Sync>;

/// Drives [`Timer`] transitions against a clock and notifies listeners
pub struct TimerEngine<C: Clock = SystemClock> {
    clock: C,
    listeners: Vec<TransitionListener>,
}

impl<C: Clock> TimerEngine<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            listeners: Vec::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Register a listener; listeners run in registration order
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&Timer) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self, timer: &Timer) {
        for listener in &self.listeners {
            listener(timer);
        }
    }

    fn ignore(&self, operation: &str, timer: &Timer) -> bool {
        debug!(
            "Ignoring {} for timer {} in state {}",
            operation, timer.id, timer.state
        );
        false
    }

    /// Start the countdown with its configured duration
    pub fn start(&self, timer: &mut Timer) -> bool {
        let duration = timer.duration;
        self.start_with(timer, duration)
    }

    /// Start the countdown with a new duration
    pub fn start_with(&self, timer: &mut Timer, duration: TimeDelta) -> bool {
        if timer.state == TimerState::Running {
            return self.ignore("start", timer);
        }
        if !in_range(duration) {
            warn!(
                "Start duration {}s for timer {} exceeds the nanosecond range",
                duration.num_seconds(),
                timer.id
            );
            return self.ignore("start", timer);
        }

        timer.duration = if duration < TimeDelta::zero() {
            warn!(
                "Negative start duration {}ms for timer {}, using zero",
                duration.num_milliseconds(),
                timer.id
            );
            TimeDelta::zero()
        } else {
            duration
        };
        timer.freeze_duration = TimeDelta::zero();
        timer.set_state(TimerState::Running);
        timer.start_time = Some(self.clock.now());
        self.notify(timer);
        true
    }

    pub fn stop(&self, timer: &mut Timer) -> bool {
        if timer.state == TimerState::Stopped {
            return self.ignore("stop", timer);
        }

        timer.set_state(TimerState::Stopped);
        timer.stop_time = Some(self.clock.now());
        self.notify(timer);
        true
    }

    pub fn pause(&self, timer: &mut Timer) -> bool {
        if matches!(timer.state, TimerState::Paused | TimerState::Stopped) {
            return self.ignore("pause", timer);
        }

        timer.set_state(TimerState::Paused);
        timer.pause_start_time = Some(self.clock.now());
        self.notify(timer);
        true
    }

    /// Leave a pause, restoring whatever state it interrupted
    pub fn resume(&self, timer: &mut Timer) -> bool {
        if timer.state != TimerState::Paused {
            return self.ignore("resume", timer);
        }

        timer.set_state(timer.previous_state);
        timer.record_pause_end(self.clock.now());
        if timer.state == TimerState::Frozen {
            timer.total_paused_during_freezed_time =
                saturating_add(timer.total_paused_during_freezed_time, timer.last_pause_time());
        }
        self.notify(timer);
        true
    }

    /// Open a freeze window of the given length
    pub fn freeze(&self, timer: &mut Timer, freeze_duration: TimeDelta) -> bool {
        if matches!(
            timer.state,
            TimerState::Frozen | TimerState::Paused | TimerState::Stopped
        ) {
            return self.ignore("freeze", timer);
        }
        if !in_range(freeze_duration) {
            warn!(
                "Freeze duration {}s for timer {} exceeds the nanosecond range",
                freeze_duration.num_seconds(),
                timer.id
            );
            return self.ignore("freeze", timer);
        }

        timer.set_state(TimerState::Frozen);
        timer.freeze_duration = freeze_duration;
        timer.freeze_start_time = Some(self.clock.now());
        timer.total_paused_during_freezed_time = TimeDelta::zero();
        self.notify(timer);
        true
    }

    /// Close a freeze window whose full length has elapsed
    pub fn defrost(&self, timer: &mut Timer) -> bool {
        if timer.state != TimerState::Frozen || !self.is_defrosted(timer) {
            return self.ignore("defrost", timer);
        }

        timer.set_state(TimerState::Running);
        timer.total_freezed_time = saturating_add(timer.total_freezed_time, timer.freeze_duration);
        timer.freeze_duration = TimeDelta::zero();
        self.notify(timer);
        true
    }

    pub fn reset(&self, timer: &mut Timer) -> bool {
        timer.reset();
        self.notify(timer);
        true
    }

    pub fn elapsed_paused_time(&self, timer: &Timer) -> TimeDelta {
        timer.elapsed_paused_time(self.clock.now())
    }

    pub fn total_elapsed_paused_time(&self, timer: &Timer) -> TimeDelta {
        timer.total_elapsed_paused_time(self.clock.now())
    }

    pub fn elapsed_freeze_time(&self, timer: &Timer) -> TimeDelta {
        timer.elapsed_freeze_time(self.clock.now())
    }

    pub fn total_elapsed_freeze_time(&self, timer: &Timer) -> TimeDelta {
        timer.total_elapsed_freeze_time(self.clock.now())
    }

    pub fn is_defrosted(&self, timer: &Timer) -> bool {
        timer.is_defrosted(self.clock.now())
    }

    pub fn is_expired(&self, timer: &Timer) -> bool {
        timer.is_expired(self.clock.now())
    }

    pub fn remaining_time(&self, timer: &Timer) -> TimeDelta {
        timer.remaining_time(self.clock.now())
    }

    pub fn remaining_fraction(&self, timer: &Timer) -> f64 {
        timer.remaining_fraction(self.clock.now())
    }
}

impl Default for TimerEngine<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}
