//! Utility functions and helpers

use chrono::{DateTime, Local, NaiveDateTime};

const ISO_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current local time as an ISO-8601 string without offset
pub fn now_iso8601() -> String {
    Local::now().format(ISO_LOCAL_FORMAT).to_string()
}

/// Parse an ISO-8601 timestamp, with or without an offset
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Render a timestamp as `dd/mm HH:MM`, or return it unchanged if unparsable
pub fn short_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%d/%m %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Keep at most `max_chars` characters of `s`
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
