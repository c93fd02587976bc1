pub struct TimeUtils;

impl TimeUtils {
    pub const SECS_IN_MIN: u32 = 60;
    pub const SECS_IN_H: u32 = Self::SECS_IN_MIN * 60;
    pub const SECS_IN_D: u32 = Self::SECS_IN_H * 24;
}

// Time Helper functions

/// Wraps any (possibly negative, possibly fractional) second count into [0, 86400).
pub fn wrap_day_secs(secs: f64) -> f64 {
    let day = TimeUtils::SECS_IN_D as f64;
    let wrapped = secs.rem_euclid(day);
    // rem_euclid can round up to exactly `day` for tiny negative inputs
    if wrapped >= day { 0.0 } else { wrapped }
}

/// Circular distance between two times of day, in seconds. Never more than 12h.
pub fn circular_day_distance(a_secs: f64, b_secs: f64) -> f64 {
    let day = TimeUtils::SECS_IN_D as f64;
    let diff = (a_secs - b_secs).abs() % day;
    diff.min(day - diff)
}

/// `HH:MM:SS`, zero padded.
pub fn format_hms(secs: u32) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        secs / TimeUtils::SECS_IN_H,
        (secs % TimeUtils::SECS_IN_H) / TimeUtils::SECS_IN_MIN,
        secs % TimeUtils::SECS_IN_MIN
    )
}

/// `HH:MM`, zero padded. Seconds are dropped.
pub fn format_hm(secs: u32) -> String {
    format!(
        "{:02}:{:02}",
        secs / TimeUtils::SECS_IN_H,
        (secs % TimeUtils::SECS_IN_H) / TimeUtils::SECS_IN_MIN
    )
}

pub fn format_duration(secs: f64) -> String {
    let total = secs.max(0.0).round() as u64;
    let mins = total / 60;
    if mins == 0 {
        return format!("{}s", total);
    }
    let hours = mins / 60;
    if hours == 0 {
        return format!("{}m {:02}s", mins, total % 60);
    }
    format!("{}h {:02}m", hours, mins % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_day_secs() {
        assert_eq!(wrap_day_secs(90_000.0), 3_600.0);
        assert_eq!(wrap_day_secs(-60.0), 86_340.0);
        assert_eq!(wrap_day_secs(86_400.0), 0.0);
        assert_eq!(wrap_day_secs(12.5), 12.5);
    }

    #[test]
    fn test_circular_day_distance_wraps_midnight() {
        assert_eq!(circular_day_distance(86_000.0, 400.0), 800.0);
        assert_eq!(circular_day_distance(400.0, 86_000.0), 800.0);
        assert_eq!(circular_day_distance(0.0, 43_200.0), 43_200.0);
        assert_eq!(circular_day_distance(3_600.0, 3_600.0), 0.0);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(3_661), "01:01:01");
        assert_eq!(format_hm(86_399), "23:59");
        assert_eq!(format_duration(42.0), "42s");
        assert_eq!(format_duration(605.0), "10m 05s");
        assert_eq!(format_duration(3_900.0), "1h 05m");
    }
}
