//! Display formatting for dates and counters.
//!
//! Backends emit timestamps as RFC 3339, RFC 2822 (`Sat, 18 Oct 2026
//! 09:10:00 GMT`, the Flask default) or bare `YYYY-MM-DD HH:MM:SS`. All are
//! rendered in UTC in the locale's format; anything else shows as `-`.
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::i18n::Locale;

/// Placeholder for missing values.
pub const MISSING: &str = "-";

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub fn format_date(raw: Option<&str>, locale: Locale) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| dt.format(locale.date_format()).to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// Group digits in threes with the locale's separator.
pub fn format_number(n: u64, locale: Locale) -> String {
    let sep = locale.group_separator();
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(sep);
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
