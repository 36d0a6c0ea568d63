//! Scan display models and helpers

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{ScanState, ScanStatus};
use crate::output::formatters::{format_risk_score, scan_duration};

/// One scan snapshot as a table row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ScanDisplay {
    #[tabled(rename = "SCAN ID")]
    pub scan_id: String,

    #[tabled(rename = "STATE")]
    pub state: String,

    #[tabled(rename = "PROGRESS")]
    pub progress: String,

    /// Severity counts (e.g., "C1 H3 M0 L2")
    #[tabled(rename = "FINDINGS")]
    pub findings: String,

    #[tabled(rename = "WEAKNESSES")]
    pub weaknesses: usize,

    #[tabled(rename = "RISK")]
    pub risk: String,

    #[tabled(rename = "DURATION")]
    pub duration: String,
}

impl ScanDisplay {
    pub fn new(scan_id: &str, status: &ScanStatus) -> Self {
        let sev = &status.severities;
        Self {
            scan_id: scan_id.to_string(),
            state: format_state(status.state),
            progress: format!("{}%", status.progress()),
            findings: format!("C{} H{} M{} L{}", sev.critical, sev.high, sev.medium, sev.low),
            weaknesses: status.weaknesses.len(),
            risk: status
                .riskscore
                .as_ref()
                .map(format_risk_score)
                .unwrap_or_else(|| "--".to_string()),
            duration: scan_duration(status.started_at.as_deref(), status.ended_at.as_deref())
                .unwrap_or_else(|| "--".to_string()),
        }
    }
}

/// Per-severity row for the snapshot printed while a scan runs
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SeverityRow {
    #[tabled(rename = "SEVERITY")]
    pub severity: &'static str,

    #[tabled(rename = "COUNT")]
    pub count: u64,
}

impl SeverityRow {
    pub fn rows(status: &ScanStatus) -> Vec<Self> {
        let sev = &status.severities;
        vec![
            Self {
                severity: "Critical",
                count: sev.critical,
            },
            Self {
                severity: "High",
                count: sev.high,
            },
            Self {
                severity: "Medium",
                count: sev.medium,
            },
            Self {
                severity: "Low",
                count: sev.low,
            },
        ]
    }
}

/// Human label for a scan state
pub fn format_state(state: ScanState) -> String {
    match state {
        ScanState::Running => "Running".to_string(),
        ScanState::End => "Complete".to_string(),
        ScanState::Failure => "Failed".to_string(),
        ScanState::Pending => "Pending".to_string(),
    }
}

/// Colored one-line marker for a scan state
pub fn state_marker(state: ScanState) -> String {
    match state {
        ScanState::End => "✓".green().to_string(),
        ScanState::Failure => "✗".red().to_string(),
        ScanState::Running | ScanState::Pending => "○".dimmed().to_string(),
    }
}
