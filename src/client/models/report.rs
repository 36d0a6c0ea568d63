//! Report models

use serde::{Deserialize, Serialize};

use super::scan::deserialize_count;

/// Software-composition-analysis severity counts (capitalized keys on the wire).
///
/// Counts are read as leniently as the scan severities: null reads as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaSeverities {
    #[serde(default, rename = "Critical", deserialize_with = "deserialize_count")]
    pub critical: u64,
    #[serde(default, rename = "High", deserialize_with = "deserialize_count")]
    pub high: u64,
    #[serde(default, rename = "Medium", deserialize_with = "deserialize_count")]
    pub medium: u64,
    #[serde(default, rename = "Low", deserialize_with = "deserialize_count")]
    pub low: u64,
}

/// Raw payload of the report helper endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    /// `null` means the backend produced no report for this scan
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub report: Option<String>,

    #[serde(default)]
    pub sca_severity_counts: Option<ScaSeverities>,
}

/// Final report artifact handed to the publisher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Human-readable summary produced by the backend
    pub summary: String,

    /// SCA counts, when the backend ran composition analysis
    pub sca: Option<ScaSeverities>,
}

impl ReportResponse {
    /// Convert into a report, or `None` for the "no report" sentinel
    pub fn into_report(self) -> Option<Report> {
        if self.kind.is_none() {
            return None;
        }
        Some(Report {
            summary: self.report.unwrap_or_default(),
            sca: self.sca_severity_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_type_is_no_report() {
        let response: ReportResponse =
            serde_json::from_str(r#"{"type":null,"report":"ignored"}"#).unwrap();
        assert!(response.into_report().is_none());
    }

    #[test]
    fn test_report_with_sca_counts() {
        let response: ReportResponse = serde_json::from_str(
            r#"{"type":"success","report":"Test Report","scaSeverityCounts":{"Critical":1,"High":3}}"#,
        )
        .unwrap();
        let report = response.into_report().unwrap();
        assert_eq!(report.summary, "Test Report");
        let sca = report.sca.unwrap();
        assert_eq!(sca.critical, 1);
        assert_eq!(sca.high, 3);
        assert_eq!(sca.low, 0);
    }

    #[test]
    fn test_sca_counts_tolerate_null_and_strings() {
        let response: ReportResponse = serde_json::from_str(
            r#"{"type":"github","report":"x","scaSeverityCounts":{"Critical":null,"High":"2","Low":1.0}}"#,
        )
        .unwrap();
        let sca = response.into_report().unwrap().sca.unwrap();
        assert_eq!(sca.critical, 0);
        assert_eq!(sca.high, 2);
        assert_eq!(sca.medium, 0);
        assert_eq!(sca.low, 1);
    }

    #[test]
    fn test_report_without_sca() {
        let response: ReportResponse =
            serde_json::from_str(r#"{"type":"success","report":"ok"}"#).unwrap();
        let report = response.into_report().unwrap();
        assert!(report.sca.is_none());
    }
}
