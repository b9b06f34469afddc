//! Conversions between the two time notations used by the dashboard.
//!
//! The CSV measurements write times as `H.MM` ("22.45" is 22:45, not 22.45
//! hours), while the hourly reference dataset uses `HH:MM`. Charts and the
//! nearest-time join work on decimal hours and minutes since midnight.

use serde::Serialize;

/// An hour/minute pair parsed from a `H.MM` time string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourMinute {
    pub hour: u64,
    pub minute: u64,
}

/// Parses the leading decimal digits of `s`, ignoring leading whitespace.
///
/// `"07"` → 7, `"5x"` → 5, `"x5"` → `None`. A digit run too long for `u64`
/// saturates at `u64::MAX`.
fn leading_int(s: &str) -> Option<u64> {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    let digits = &s[..end];
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

fn minutes_of(hour: u64, minute: u64) -> u64 {
    hour.saturating_mul(60).saturating_add(minute)
}

/// Splits a `H.MM` string into hour and minute.
///
/// The minute part is optional and defaults to 0 when missing or unparsable.
/// No range checks are made, so `"25.75"` parses as-is. Returns `None` only when
/// the hour itself has no leading digits.
pub fn parse_fractional_time(s: &str) -> Option<HourMinute> {
    let mut parts = s.split('.');
    let hour = leading_int(parts.next().unwrap_or(""))?;
    let minute = parts.next().and_then(leading_int).unwrap_or(0);
    Some(HourMinute { hour, minute })
}

/// `"22.45"` → `22.75`.
pub fn to_decimal_hour(s: &str) -> Option<f64> {
    parse_fractional_time(s).map(|t| t.hour as f64 + t.minute as f64 / 60.0)
}

/// Renders a decimal hour as zero-padded `HH:MM`.
///
/// The minute is rounded, so this is not an exact inverse of
/// [`to_decimal_hour`] for every input. A minute that rounds up to 60 carries
/// into the hour.
pub fn decimal_hour_to_clock(decimal: f64) -> String {
    let mut hour = decimal.floor();
    let mut minute = ((decimal - hour) * 60.0).round();
    if minute >= 60.0 {
        hour += 1.0;
        minute -= 60.0;
    }
    format!("{:02}:{:02}", hour as i64, minute as i64)
}

/// Minutes since midnight for a `H.MM` CSV time. Saturates instead of
/// overflowing for absurd hours.
pub fn fractional_to_minutes(s: &str) -> Option<u64> {
    parse_fractional_time(s).map(|t| minutes_of(t.hour, t.minute))
}

/// Minutes since midnight for a `HH:MM` reference time.
pub fn clock_to_minutes(s: &str) -> Option<u64> {
    let (hour, minute) = s.split_once(':')?;
    Some(minutes_of(leading_int(hour)?, leading_int(minute)?))
}

/// `"25.12.28"` → `"2025년 12월 28일"`.
///
/// A two-digit year is taken to be in the 2000s; any other year is used
/// verbatim. Input that does not split into three numeric parts is returned
/// unchanged.
pub fn format_date(s: &str) -> String {
    let mut parts = s.split('.');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return s.to_string();
    };
    let (Some(month), Some(day)) = (leading_int(month), leading_int(day)) else {
        return s.to_string();
    };

    if year.len() == 2 {
        format!("20{year}년 {month}월 {day}일")
    } else {
        format!("{year}년 {month}월 {day}일")
    }
}

/// `"22.45"` → `"22시 45분"`. Unparsable input is returned unchanged.
pub fn format_clock_label(s: &str) -> String {
    match parse_fractional_time(s) {
        Some(t) => format!("{}시 {:02}분", t.hour, t.minute),
        None => s.to_string(),
    }
}

/// `"9.45"` → `"09시"`. Unparsable input is returned unchanged.
pub fn format_hour_label(s: &str) -> String {
    match parse_fractional_time(s) {
        Some(t) => format!("{:02}시", t.hour),
        None => s.to_string(),
    }
}

/// `"22:00"` → `"22시 00분"`.
pub fn format_reference_label(s: &str) -> String {
    format!("{}분", s.replacen(':', "시 ", 1))
}
