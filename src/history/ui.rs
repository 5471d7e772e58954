//! Text formatting for the history list.
//!
//! Each entry renders as `METHOD URL - STATUS STATUSTEXT (timestamp)`, e.g.
//! `GET https://api.example.com/users - 200 OK (2025-01-15 14:30:45)`.

use super::models::HistoryEntry;
use chrono::{DateTime, Local, Utc};

/// Formats every entry, keeping history order.
pub fn format_history_list(entries: &[HistoryEntry]) -> Vec<String> {
    entries.iter().map(format_history_entry).collect()
}

/// Formats a single history entry for list display.
pub fn format_history_entry(entry: &HistoryEntry) -> String {
    let timestamp = entry
        .recorded_at()
        .map(|t| format_timestamp(&t))
        .unwrap_or_else(|| entry.timestamp.to_string());

    format!(
        "{} {} - {} {} ({})",
        entry.method.as_str(),
        entry.url,
        entry.status,
        entry.status_text,
        timestamp
    )
}

/// Formats an entry with a relative time, measured against `now`.
pub fn format_history_entry_relative(entry: &HistoryEntry, now: DateTime<Utc>) -> String {
    let when = entry
        .recorded_at()
        .map(|t| format_relative_time(&t, now))
        .unwrap_or_else(|| "unknown time".to_string());

    format!(
        "{} {} - {} ({})",
        entry.method.as_str(),
        entry.url,
        entry.status,
        when
    )
}

/// Formats a timestamp in local time as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    let local_time: DateTime<Local> = timestamp.with_timezone(&Local);
    local_time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Describes how long before `now` the timestamp was ("2 hours ago").
pub fn format_relative_time(timestamp: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(*timestamp);

    if duration.num_seconds() < 60 {
        "just now".to_string()
    } else if duration.num_minutes() < 60 {
        let minutes = duration.num_minutes();
        format!("{} minute{} ago", minutes, plural(minutes))
    } else if duration.num_hours() < 24 {
        let hours = duration.num_hours();
        format!("{} hour{} ago", hours, plural(hours))
    } else if duration.num_days() == 1 {
        "yesterday".to_string()
    } else {
        format!("{} days ago", duration.num_days())
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
