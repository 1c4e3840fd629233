//! Duration formatting for log output

use chrono::TimeDelta;

/// Format a duration as "HH:MM:SS.cs", clamping negatives to zero
pub fn format_hms_cs(delta: TimeDelta) -> String {
    let ms = delta.num_milliseconds().max(0);
    let total_secs = ms / 1000;
    let cs = (ms % 1000) / 10;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}:{:02}.{:02}", h, m, s, cs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms_cs() {
        assert_eq!(format_hms_cs(TimeDelta::zero()), "00:00:00.00");
        assert_eq!(format_hms_cs(TimeDelta::milliseconds(12_340)), "00:00:12.34");
        assert_eq!(format_hms_cs(TimeDelta::seconds(3661)), "01:01:01.00");
        assert_eq!(format_hms_cs(TimeDelta::seconds(-5)), "00:00:00.00");
    }
}
