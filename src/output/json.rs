//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Envelope for JSON output: payload plus run metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    /// RFC 3339 time the output was produced
    pub generated_at: String,
    pub tool: &'static str,
    pub version: &'static str,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                generated_at: Utc::now().to_rfc3339(),
                tool: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}

/// Pretty-print data wrapped in the metadata envelope
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Severities;

    #[test]
    fn test_envelope_metadata() {
        let output = JsonOutput::new(Severities::default());
        assert_eq!(output.meta.tool, "ctscan");
        assert_eq!(output.meta.version, env!("CARGO_PKG_VERSION"));
        assert!(!output.meta.generated_at.is_empty());
    }

    #[test]
    fn test_format_json_wraps_payload() {
        let severities = Severities {
            critical: 1,
            high: 2,
            ..Severities::default()
        };
        let text = format_json(&severities).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed["data"]["critical"], 1);
        assert_eq!(parsed["data"]["high"], 2);
        assert_eq!(parsed["meta"]["tool"], "ctscan");
    }

    #[test]
    fn test_format_json_empty_list() {
        let rows: Vec<Severities> = Vec::new();
        assert!(format_json(&rows).unwrap().contains("\"data\": []"));
    }
}
