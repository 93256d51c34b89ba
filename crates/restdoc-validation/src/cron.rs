//! Schedule helpers
//!
//! Standalone utilities for endpoints that accept schedules. They are not
//! wired into the schema engine; hosts call them from user checks.

use cron::Schedule;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

/// `HH:MM` on the hour or half hour
static TIME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):(00|30)$").unwrap());

/// Validate a cron expression
///
/// Accepts the classic five-field form (`minute hour day month weekday`) as
/// well as the six/seven-field form with seconds and year.
///
/// # Example
/// ```
/// use restdoc_validation::cron::validate_cron;
///
/// assert!(validate_cron("30 14 * * *"));
/// assert!(!validate_cron("every day at noon"));
/// ```
pub fn validate_cron(expr: &str) -> bool {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    let normalized = match fields.len() {
        5 => format!("0 {}", fields.join(" ")),
        6 | 7 => fields.join(" "),
        _ => return false,
    };
    Schedule::from_str(&normalized).is_ok()
}

/// Validate a plain `HH:MM` time restricted to `:00` and `:30`
pub fn validate_time(value: &str) -> bool {
    TIME_REGEX.is_match(value)
}

/// Convert an `HH:MM` time to a daily five-field cron expression
///
/// Returns `None` for anything [`validate_time`] rejects.
///
/// # Example
/// ```
/// use restdoc_validation::cron::time_to_cron;
///
/// assert_eq!(time_to_cron("14:30").as_deref(), Some("30 14 * * *"));
/// assert_eq!(time_to_cron("14:15"), None);
/// ```
pub fn time_to_cron(value: &str) -> Option<String> {
    if !validate_time(value) {
        return None;
    }
    let (hour, minute) = value.split_once(':')?;
    let hour: u8 = hour.parse().ok()?;
    let minute: u8 = minute.parse().ok()?;
    Some(format!("{} {} * * *", minute, hour))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_cron() {
        assert!(validate_cron("0 12 * * *"));
        assert!(validate_cron("*/15 * * * *"));
        assert!(validate_cron("0 0 12 * * MON-FRI"));

        assert!(!validate_cron(""));
        assert!(!validate_cron("* * *"));
        assert!(!validate_cron("61 * * * *"));
    }

    #[test]
    fn test_validate_time() {
        assert!(validate_time("00:00"));
        assert!(validate_time("09:30"));
        assert!(validate_time("23:30"));

        assert!(!validate_time("24:00"));
        assert!(!validate_time("12:15"));
        assert!(!validate_time("9:30"));
    }

    #[test]
    fn test_time_to_cron() {
        assert_eq!(time_to_cron("00:00").as_deref(), Some("0 0 * * *"));
        assert_eq!(time_to_cron("09:30").as_deref(), Some("30 9 * * *"));
        assert_eq!(time_to_cron("25:00"), None);

        let expr = time_to_cron("18:00").unwrap();
        assert!(validate_cron(&expr));
    }
}
