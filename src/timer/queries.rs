//! Elapsed and remaining time arithmetic
//!
//! Every query is pure: it reads the timer and the instant it is given and
//! never mutates anything. Pause and freeze time both push the deadline back,
//! so only time spent running counts against the configured duration.

use chrono::{DateTime, TimeDelta, Utc};

use super::delta::{saturating_add, saturating_sub};
use super::entity::{Timer, TimerState};

fn span(from: Option<DateTime<Utc>>, to: DateTime<Utc>) -> TimeDelta {
    from.map_or_else(TimeDelta::zero, |from| to - from)
}

impl Timer {
    /// Length of the pause in progress, zero unless currently paused
    pub fn elapsed_paused_time(&self, now: DateTime<Utc>) -> TimeDelta {
        match self.state {
            TimerState::Paused => span(self.pause_start_time, now),
            _ => TimeDelta::zero(),
        }
    }

    /// All pause time, closed pauses plus the one in progress.
    ///
    /// A timer stopped while paused still counts the open pause, measured up
    /// to the stop instant.
    pub fn total_elapsed_paused_time(&self, now: DateTime<Utc>) -> TimeDelta {
        let open = match (self.state, self.previous_state, self.stop_time) {
            (TimerState::Paused, _, _) => self.elapsed_paused_time(now),
            (TimerState::Stopped, TimerState::Paused, Some(stop)) => {
                span(self.pause_start_time, stop)
            }
            _ => TimeDelta::zero(),
        };
        saturating_add(self.total_paused_time, open)
    }

    /// Freeze-active time of the open freeze window.
    ///
    /// Pauses taken inside the window are carved out; while such a pause is
    /// in progress the freeze clock holds at the instant the pause began.
    pub fn elapsed_freeze_time(&self, now: DateTime<Utc>) -> TimeDelta {
        let window = match (self.state, self.previous_state) {
            (TimerState::Frozen, _) => span(self.freeze_start_time, now),
            (TimerState::Paused, TimerState::Frozen) => saturating_sub(
                span(self.freeze_start_time, now),
                self.elapsed_paused_time(now),
            ),
            (TimerState::Stopped, TimerState::Frozen) => match self.stop_time {
                Some(stop) => saturating_sub(
                    span(self.freeze_start_time, stop),
                    self.elapsed_paused_time(now),
                ),
                None => return TimeDelta::zero(),
            },
            _ => return TimeDelta::zero(),
        };

        saturating_sub(window, self.total_paused_during_freezed_time)
    }

    /// Closed freeze windows plus the freeze-active time of the open one
    pub fn total_elapsed_freeze_time(&self, now: DateTime<Utc>) -> TimeDelta {
        match self.state {
            TimerState::Frozen | TimerState::Paused | TimerState::Stopped => {
                saturating_add(self.total_freezed_time, self.elapsed_freeze_time(now))
            }
            _ => self.total_freezed_time,
        }
    }

    /// Whether the open freeze, if any, has run its full length
    pub fn is_defrosted(&self, now: DateTime<Utc>) -> bool {
        match self.state {
            TimerState::Frozen | TimerState::Paused => {
                self.elapsed_freeze_time(now) >= self.freeze_duration
            }
            _ => true,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining_time(now) <= TimeDelta::zero()
    }

    /// Countdown time left, never negative.
    ///
    /// A stopped timer only accounts for time up to its stop instant.
    pub fn remaining_time(&self, now: DateTime<Utc>) -> TimeDelta {
        let Some(start) = self.start_time else {
            return self.duration;
        };

        let remaining = match self.state {
            TimerState::Default => return self.duration,
            TimerState::Stopped => {
                let Some(stop) = self.stop_time else {
                    return self.duration;
                };
                let consumed = saturating_sub(
                    saturating_sub(stop - start, self.total_elapsed_paused_time(now)),
                    self.total_elapsed_freeze_time(now),
                );
                saturating_sub(self.duration, consumed)
            }
            _ => {
                let extended = saturating_add(
                    saturating_add(self.duration, self.total_elapsed_paused_time(now)),
                    self.total_elapsed_freeze_time(now),
                );
                saturating_sub(extended, now - start)
            }
        };

        remaining.max(TimeDelta::zero())
    }

    /// Remaining time as a fraction of the duration, in `[0, 1]`
    pub fn remaining_fraction(&self, now: DateTime<Utc>) -> f64 {
        let total = self.duration.num_milliseconds();
        if total <= 0 {
            return 0.0;
        }
        let left = self.remaining_time(now).num_milliseconds() as f64 / total as f64;
        left.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: i64) -> TimeDelta {
        TimeDelta::seconds(s)
    }

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn running(duration: i64) -> Timer {
        let mut timer = Timer::new("q", secs(duration)).unwrap();
        timer.set_state(TimerState::Running);
        timer.start_time = Some(t0());
        timer
    }

    #[test]
    fn never_started_reports_full_duration() {
        let timer = Timer::new("q", secs(10)).unwrap();
        assert_eq!(timer.remaining_time(t0() + secs(100)), secs(10));
        assert!(!timer.is_expired(t0()));
        assert_eq!(timer.remaining_fraction(t0()), 1.0);
    }

    #[test]
    fn remaining_clamps_to_zero() {
        let timer = running(3);
        assert_eq!(timer.remaining_time(t0() + secs(2)), secs(1));
        assert_eq!(timer.remaining_time(t0() + secs(10)), TimeDelta::zero());
        assert!(timer.is_expired(t0() + secs(3)));
    }

    #[test]
    fn open_pause_holds_remaining() {
        let mut timer = running(10);
        timer.set_state(TimerState::Paused);
        timer.pause_start_time = Some(t0() + secs(4));

        assert_eq!(timer.elapsed_paused_time(t0() + secs(9)), secs(5));
        assert_eq!(timer.remaining_time(t0() + secs(4)), secs(6));
        assert_eq!(timer.remaining_time(t0() + secs(9)), secs(6));
    }

    #[test]
    fn paused_inside_freeze_holds_freeze_clock() {
        let mut timer = running(10);
        timer.set_state(TimerState::Frozen);
        timer.freeze_start_time = Some(t0() + secs(1));
        timer.freeze_duration = secs(3);
        timer.total_paused_during_freezed_time = secs(1);
        timer.set_state(TimerState::Paused);
        timer.pause_start_time = Some(t0() + secs(3));

        assert_eq!(timer.elapsed_freeze_time(t0() + secs(3)), secs(1));
        assert_eq!(timer.elapsed_freeze_time(t0() + secs(8)), secs(1));
        assert!(!timer.is_defrosted(t0() + secs(8)));
    }

    #[test]
    fn pause_without_freeze_has_no_freeze_time() {
        let mut timer = running(10);
        timer.set_state(TimerState::Paused);
        timer.pause_start_time = Some(t0() + secs(2));

        assert_eq!(timer.elapsed_freeze_time(t0() + secs(5)), TimeDelta::zero());
        assert!(timer.is_defrosted(t0() + secs(5)));
    }

    #[test]
    fn stopped_timer_uses_stop_instant() {
        let mut timer = running(10);
        timer.set_state(TimerState::Stopped);
        timer.stop_time = Some(t0() + secs(4));

        assert_eq!(timer.remaining_time(t0() + secs(4)), secs(6));
        assert_eq!(timer.remaining_time(t0() + secs(60)), secs(6));
    }

    #[test]
    fn stopped_while_paused_counts_open_pause() {
        let mut timer = running(10);
        timer.set_state(TimerState::Paused);
        timer.pause_start_time = Some(t0() + secs(2));
        timer.set_state(TimerState::Stopped);
        timer.stop_time = Some(t0() + secs(7));

        assert_eq!(timer.elapsed_paused_time(t0() + secs(30)), TimeDelta::zero());
        assert_eq!(timer.total_elapsed_paused_time(t0() + secs(30)), secs(5));
        assert_eq!(timer.remaining_time(t0() + secs(30)), secs(8));
    }

    #[test]
    fn stopped_mid_freeze_counts_freeze_to_stop() {
        let mut timer = running(10);
        timer.set_state(TimerState::Frozen);
        timer.freeze_start_time = Some(t0() + secs(2));
        timer.freeze_duration = secs(5);
        timer.set_state(TimerState::Stopped);
        timer.stop_time = Some(t0() + secs(4));

        assert_eq!(timer.elapsed_freeze_time(t0() + secs(30)), secs(2));
        assert_eq!(timer.total_elapsed_freeze_time(t0() + secs(30)), secs(2));
        assert_eq!(timer.remaining_time(t0() + secs(30)), secs(8));
    }

    #[test]
    fn fraction_tracks_progress() {
        let timer = running(4);
        assert_eq!(timer.remaining_fraction(t0() + secs(1)), 0.75);
        assert_eq!(timer.remaining_fraction(t0() + secs(9)), 0.0);
        assert_eq!(Timer::default().remaining_fraction(t0()), 0.0);
    }
}
