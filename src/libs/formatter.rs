//! Time and duration formatting for display.
//!
//! The backend and the local cache hand us clock times in several shapes:
//! full ISO timestamps (`2025-05-26T09:37:00`), zero-padded `HH:MM`, and
//! unpadded `H:MM`. Everything shown to the user or used in arithmetic is
//! first normalised into the canonical `HH:MM` form by [`format_to_canonical`].
//!
//! ## Error Handling
//!
//! Formatting never fails. Input that matches no known shape is passed
//! through unchanged so that a malformed value still renders.
//!
//! ## Examples
//!
//! ```rust
//! use kintai::libs::formatter::{format_to_canonical, format_work_duration};
//!
//! assert_eq!(format_to_canonical(Some("2025-05-26T09:37:00")), Some("09:37".to_string()));
//! assert_eq!(format_to_canonical(Some("9:5")), Some("09:05".to_string()));
//! assert_eq!(format_work_duration(465), "7h 45m");
//! ```

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

/// Canonical clock time layout used across the application.
pub const CANONICAL_TIME_FORMAT: &str = "%H:%M";

static ISO_TIME_FRAGMENT: OnceLock<Regex> = OnceLock::new();

fn iso_time_fragment() -> &'static Regex {
    ISO_TIME_FRAGMENT.get_or_init(|| Regex::new(r"T(\d{2}:\d{2})").expect("static pattern is valid"))
}

/// Normalises a raw clock time into `HH:MM`.
///
/// - absent or empty input → `None`
/// - an embedded `T` + `HH:MM` fragment → that fragment
/// - a `:`-delimited pair → both parts zero-padded to two digits
/// - anything else → the input unchanged
pub fn format_to_canonical(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw.is_empty() {
        return None;
    }

    if let Some(fragment) = iso_time_fragment().captures(raw).and_then(|caps| caps.get(1)) {
        return Some(fragment.as_str().to_string());
    }

    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() >= 2 {
        return Some(format!("{:0>2}:{:0>2}", parts[0], parts[1]));
    }

    Some(raw.to_string())
}

/// Parses a canonical (or padable) clock time into a `NaiveTime`.
///
/// Unlike [`format_to_canonical`], this is strict: the result feeds
/// arithmetic, so an unrecognised value yields `None`.
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let canonical = format_to_canonical(Some(raw.trim()))?;
    NaiveTime::parse_from_str(&canonical, CANONICAL_TIME_FORMAT).ok()
}

/// Renders a `NaiveTime` as `HH:MM`.
pub fn format_clock_time(time: &NaiveTime) -> String {
    time.format(CANONICAL_TIME_FORMAT).to_string()
}

/// Formats worked minutes as `"Xh Ym"`. Negative values are clamped to zero.
pub fn format_work_duration(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Formats a deducted break as whole or fractional hours: `"1h"`, `"0h"`, `"0.5h"`.
pub fn format_break(minutes: i64) -> String {
    let minutes = minutes.max(0);
    if minutes % 60 == 0 {
        format!("{}h", minutes / 60)
    } else {
        let hours = minutes as f64 / 60.0;
        format!("{}h", (hours * 100.0).round() / 100.0)
    }
}

/// Formats overtime minutes as `"Xm"`, or `"Xh Ym"` from one hour upwards.
pub fn format_overtime(minutes: i64) -> String {
    let minutes = minutes.max(0);
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        format_work_duration(minutes)
    }
}

/// Formats minute totals for the history table.
///
/// `None` renders as `"-"`; zero parts are dropped (`"45m"`, `"2h"`, `"2h 5m"`).
pub fn format_history_minutes(minutes: Option<i64>) -> String {
    let Some(minutes) = minutes else {
        return "-".to_string();
    };
    let minutes = minutes.max(0);
    let (hours, mins) = (minutes / 60, minutes % 60);

    match (hours, mins) {
        (0, 0) => "0m".to_string(),
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Renders an optional canonical time for tables, `"-"` when absent.
pub fn display_time(time: Option<&str>) -> String {
    format_to_canonical(time).unwrap_or_else(|| "-".to_string())
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(month: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d").ok()
}

/// `YYYY-MM` of a date.
pub fn format_month(date: &NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_passthrough_for_unrecognised_input() {
        assert_eq!(format_to_canonical(Some("noon")), Some("noon".to_string()));
        assert_eq!(format_to_canonical(Some("")), None);
        assert_eq!(format_to_canonical(None), None);
    }

    #[test]
    fn test_iso_fragment_wins_over_colon_split() {
        assert_eq!(format_to_canonical(Some("2025-06-15T18:30:00.000Z")), Some("18:30".to_string()));
    }

    #[test]
    fn test_break_formatting() {
        assert_eq!(format_break(60), "1h");
        assert_eq!(format_break(0), "0h");
        assert_eq!(format_break(30), "0.5h");
    }
}
