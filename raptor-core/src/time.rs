//! Formatting helpers for search times, durations and generalized costs.
//!
//! All times inside the search are plain seconds relative to the start of the
//! service day. Costs (c1) are stored in centi-seconds, so a cost of `100`
//! is one second of "generalized time".

use chrono::{Duration, NaiveTime};

const SECONDS_PER_DAY: i32 = 24 * 60 * 60;

/// Format a search time as `HH:MM:SS`, with a day offset suffix when the
/// time falls outside the service day.
///
/// # Examples
///
/// ```
/// use raptor_core::time::format_time;
///
/// assert_eq!(format_time(8 * 3600 + 30 * 60), "08:30:00");
/// assert_eq!(format_time(25 * 3600), "01:00:00+1d");
/// assert_eq!(format_time(-3600), "23:00:00-1d");
/// ```
pub fn format_time(seconds: i32) -> String {
    let day = seconds.div_euclid(SECONDS_PER_DAY);
    let second_of_day = seconds.rem_euclid(SECONDS_PER_DAY) as u32;

    let clock = NaiveTime::from_num_seconds_from_midnight_opt(second_of_day, 0)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_default();

    match day {
        0 => clock,
        d if d > 0 => format!("{clock}+{d}d"),
        d => format!("{clock}{d}d"),
    }
}

/// Format a duration in seconds compactly, e.g. `1h2m3s`, `5m`, `0s`.
pub fn format_duration(seconds: i32) -> String {
    let duration = Duration::seconds(i64::from(seconds).abs());
    let hours = duration.num_hours();
    let minutes = duration.num_minutes() % 60;
    let secs = duration.num_seconds() % 60;

    let mut out = String::new();
    if seconds < 0 {
        out.push('-');
    }
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if secs > 0 || (hours == 0 && minutes == 0) {
        out.push_str(&format!("{secs}s"));
    }
    out
}

/// Format a cost given in centi-seconds as `$<units>.<cents>`.
///
/// ```
/// use raptor_core::time::format_cost_centi;
///
/// assert_eq!(format_cost_centi(120_050), "$1200.50");
/// assert_eq!(format_cost_centi(-25), "-$0.25");
/// ```
pub fn format_cost_centi(c1: i32) -> String {
    let sign = if c1 < 0 { "-" } else { "" };
    let abs = i64::from(c1).abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}
