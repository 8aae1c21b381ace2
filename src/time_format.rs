use chrono::{DateTime, Utc};

/// Formats a response time for display
///
/// Examples:
/// - 4.23 seconds: "4.2s"
/// - 65 seconds: "1m 05s"
/// - not a number: "-"
pub fn format_seconds(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "-".to_string();
    }
    let seconds = seconds.max(0.0);

    if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else {
        let total = seconds.round() as i64;
        format!("{}m {:02}s", total / 60, total % 60)
    }
}

/// Formats a past datetime relative to `now`
///
/// Examples:
/// - less than a minute ago: "just now"
/// - 5 minutes ago: "5 minutes ago"
/// - 1 hour ago: "1 hour ago"
/// - 1 day ago: "yesterday"
/// - 3 days ago: "3 days ago"
/// - 30 days ago or more: "on 2025-12-10"
pub fn format_time_ago(past: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(past);

    if duration.num_seconds() < 60 {
        "just now".to_string()
    } else if duration.num_minutes() < 60 {
        let mins = duration.num_minutes();
        format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if duration.num_hours() < 24 {
        let hours = duration.num_hours();
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if duration.num_days() == 1 {
        "yesterday".to_string()
    } else if duration.num_days() < 30 {
        format!("{} days ago", duration.num_days())
    } else {
        format!("on {}", past.format("%Y-%m-%d"))
    }
}
