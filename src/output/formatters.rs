//! Reusable formatting utilities for CLI output
//!
//! Timestamps, durations and risk scores as they appear in tables and in the
//! published report body.

use chrono::{DateTime, Utc};

/// Parse an RFC 3339 timestamp or Unix epoch milliseconds
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    value
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

/// Elapsed time between two timestamps as `HH:MM:SS`.
///
/// `None` when either end is missing or unparseable, or the end precedes the
/// start.
pub fn scan_duration(started_at: Option<&str>, ended_at: Option<&str>) -> Option<String> {
    let start = parse_timestamp(started_at?)?;
    let end = parse_timestamp(ended_at?)?;
    let secs = (end - start).num_seconds();
    if secs < 0 {
        return None;
    }
    Some(format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    ))
}

/// Render the backend's risk score, which is either a bare number or an
/// object carrying a `score` field
pub fn format_risk_score(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) if !s.is_empty() => s.clone(),
        serde_json::Value::Object(map) => map
            .get("score")
            .filter(|s| !s.is_null())
            .map(format_risk_score)
            .unwrap_or_else(|| "N/A".to_string()),
        _ => "N/A".to_string(),
    }
}
