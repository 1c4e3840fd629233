//! Bounded duration helpers

use chrono::TimeDelta;

use crate::error::TimerError;

/// Check that a configured duration is non-negative and fits in i64 nanoseconds
pub(crate) fn checked_duration(duration: TimeDelta) -> Result<TimeDelta, TimerError> {
    if duration < TimeDelta::zero() {
        return Err(TimerError::invalid(format!(
            "duration must not be negative, got {}ms",
            duration.num_milliseconds()
        )));
    }
    if duration.num_nanoseconds().is_none() {
        return Err(TimerError::invalid(format!(
            "duration {}s exceeds the nanosecond range",
            duration.num_seconds()
        )));
    }
    Ok(duration)
}

/// Whether a duration fits in i64 nanoseconds, sign ignored
pub(crate) fn in_range(duration: TimeDelta) -> bool {
    duration.num_nanoseconds().is_some()
}

pub(crate) fn saturating_add(lhs: TimeDelta, rhs: TimeDelta) -> TimeDelta {
    lhs.checked_add(&rhs).unwrap_or(if rhs < TimeDelta::zero() {
        TimeDelta::MIN
    } else {
        TimeDelta::MAX
    })
}

pub(crate) fn saturating_sub(lhs: TimeDelta, rhs: TimeDelta) -> TimeDelta {
    lhs.checked_sub(&rhs).unwrap_or(if rhs < TimeDelta::zero() {
        TimeDelta::MAX
    } else {
        TimeDelta::MIN
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_duration_bounds() {
        assert!(checked_duration(TimeDelta::zero()).is_ok());
        assert!(checked_duration(TimeDelta::nanoseconds(i64::MAX)).is_ok());
        assert!(checked_duration(TimeDelta::seconds(-1)).is_err());
        assert!(checked_duration(TimeDelta::MAX).is_err());
    }

    #[test]
    fn saturating_arithmetic_clamps() {
        assert_eq!(saturating_add(TimeDelta::MAX, TimeDelta::seconds(1)), TimeDelta::MAX);
        assert_eq!(saturating_sub(TimeDelta::MIN, TimeDelta::seconds(1)), TimeDelta::MIN);
        assert_eq!(saturating_sub(TimeDelta::MAX, TimeDelta::seconds(-1)), TimeDelta::MAX);
        assert_eq!(
            saturating_add(TimeDelta::seconds(2), TimeDelta::seconds(3)),
            TimeDelta::seconds(5)
        );
    }
}
