//! Shared formatting utilities used by both CLI and TUI
//!
//! This module consolidates string truncation, id shortening, timestamp and
//! confidence formatting so both front ends render values identically.

use chrono::{DateTime, Local, Utc};

/// Number of characters of a job id shown in tables.
pub const SHORT_ID_LEN: usize = 8;

/// Truncate a string to a maximum length (in characters), adding "..." at the end if truncated.
///
/// This function is Unicode-safe and counts characters, not bytes.
///
/// # Examples
/// ```
/// use acore::formatting::truncate_string;
/// assert_eq!(truncate_string("hello", 10), "hello");
/// assert_eq!(truncate_string("hello world", 8), "hello...");
/// ```
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Shorten an opaque job id to its first eight characters plus an ellipsis.
///
/// Ids shorter than the prefix are shown unchanged.
#[must_use]
pub fn short_id(id: &str) -> String {
    if id.chars().count() <= SHORT_ID_LEN {
        id.to_string()
    } else {
        let prefix: String = id.chars().take(SHORT_ID_LEN).collect();
        format!("{}...", prefix)
    }
}

/// Format a confidence score in [0, 1] as a percentage with one decimal place.
///
/// # Examples
/// ```
/// use acore::formatting::format_confidence;
/// assert_eq!(format_confidence(0.873), "87.3%");
/// ```
#[must_use]
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

/// Format an optional UTC timestamp in the local timezone, or "N/A".
#[must_use]
pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "N/A".to_string(),
    }
}

/// Compact "how long ago" display for the status bar.
#[must_use]
pub fn format_age(age: std::time::Duration) -> String {
    let secs = age.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m{:02}s", secs / 60, secs % 60)
    } else {
        format!("{}h{:02}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Collapse whitespace runs so multi-line submitted text fits a table cell.
#[must_use]
pub fn preview_text(text: &str, max_len: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_string(&collapsed, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("ab", 2), "ab");
        assert_eq!(truncate_string("abcdef", 2), "ab");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(
            short_id("4b1c6c0e-9f4e-4ab1-94a6-0c7c9c3a1f11"),
            "4b1c6c0e..."
        );
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("12345678"), "12345678");
    }

    #[test]
    fn test_format_confidence_one_decimal() {
        assert_eq!(format_confidence(0.873), "87.3%");
        assert_eq!(format_confidence(0.0), "0.0%");
        assert_eq!(format_confidence(1.0), "100.0%");
        assert_eq!(format_confidence(0.5), "50.0%");
        assert_eq!(format_confidence(0.955), "95.5%");
    }

    #[test]
    fn test_format_timestamp_none() {
        assert_eq!(format_timestamp(None), "N/A");
    }

    #[test]
    fn test_format_timestamp_some() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let rendered = format_timestamp(Some(ts));
        // Local offset varies; the date portion must be present
        assert!(rendered.contains("2025-06-01") || rendered.contains("2025-05-31") || rendered.contains("2025-06-02"));
        assert_ne!(rendered, "N/A");
    }

    #[test]
    fn test_format_age() {
        use std::time::Duration;
        assert_eq!(format_age(Duration::from_secs(5)), "5s");
        assert_eq!(format_age(Duration::from_secs(125)), "2m05s");
        assert_eq!(format_age(Duration::from_secs(3700)), "1h01m");
    }

    #[test]
    fn test_preview_text_collapses_whitespace() {
        assert_eq!(preview_text("a\nb\t c", 40), "a b c");
        assert_eq!(preview_text("word ".repeat(20).as_str(), 12), "word word...");
    }
}
