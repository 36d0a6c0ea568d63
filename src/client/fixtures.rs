//! Test fixtures and builders for API model types
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use super::models::{
    ProgressData, Report, ScaSeverities, ScanState, ScanStatus, Severities, Weakness,
};

// ============================================================================
// ScanStatusBuilder
// ============================================================================

/// Builder for creating test ScanStatus instances.
///
/// # Example
/// ```ignore
/// let status = ScanStatusBuilder::running()
///     .progress(40)
///     .critical(1)
///     .weakness("sql-injection-01")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ScanStatusBuilder {
    state: ScanState,
    progress: u64,
    severities: Severities,
    weaknesses: Vec<Weakness>,
    started_at: Option<String>,
    ended_at: Option<String>,
}

impl ScanStatusBuilder {
    /// Create a builder in the given state with no findings.
    pub fn new(state: ScanState) -> Self {
        Self {
            state,
            progress: 0,
            severities: Severities::default(),
            weaknesses: Vec::new(),
            started_at: None,
            ended_at: None,
        }
    }

    /// A scan still in progress.
    pub fn running() -> Self {
        Self::new(ScanState::Running)
    }

    /// A finished scan at 100%.
    pub fn ended() -> Self {
        Self::new(ScanState::End).progress(100)
    }

    /// A scan the backend reports as failed.
    pub fn failed() -> Self {
        Self::new(ScanState::Failure)
    }

    pub fn progress(mut self, progress: u64) -> Self {
        self.progress = progress;
        self
    }

    pub fn critical(mut self, count: u64) -> Self {
        self.severities.critical = count;
        self
    }

    pub fn high(mut self, count: u64) -> Self {
        self.severities.high = count;
        self
    }

    pub fn medium(mut self, count: u64) -> Self {
        self.severities.medium = count;
        self
    }

    pub fn low(mut self, count: u64) -> Self {
        self.severities.low = count;
        self
    }

    /// Add a weakness record with the given identifier.
    pub fn weakness(mut self, weakness_id: &str) -> Self {
        self.weaknesses.push(Weakness {
            weakness_id: weakness_id.to_string(),
            title: None,
            severity: None,
        });
        self
    }

    /// Set start/end timestamps (RFC 3339).
    pub fn timing(mut self, started_at: &str, ended_at: &str) -> Self {
        self.started_at = Some(started_at.to_string());
        self.ended_at = Some(ended_at.to_string());
        self
    }

    /// Build the ScanStatus.
    pub fn build(self) -> ScanStatus {
        ScanStatus {
            state: self.state,
            progress_data: ProgressData {
                progress: self.progress,
            },
            severities: self.severities,
            weaknesses: self.weaknesses,
            riskscore: None,
            started_at: self.started_at,
            ended_at: self.ended_at,
        }
    }
}

// ============================================================================
// Reports
// ============================================================================

/// A report with the given summary and no SCA counts.
pub fn report(summary: &str) -> Report {
    Report {
        summary: summary.to_string(),
        sca: None,
    }
}

/// A report carrying SCA critical/high counts.
pub fn report_with_sca(summary: &str, critical: u64, high: u64) -> Report {
    Report {
        summary: summary.to_string(),
        sca: Some(ScaSeverities {
            critical,
            high,
            ..ScaSeverities::default()
        }),
    }
}

// ============================================================================
// Weaknesses
// ============================================================================

/// Weakness records with the given identifiers.
pub fn weaknesses(ids: &[&str]) -> Vec<Weakness> {
    ids.iter()
        .map(|id| Weakness {
            weakness_id: id.to_string(),
            title: None,
            severity: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_builder_defaults() {
        let status = ScanStatusBuilder::running().build();
        assert_eq!(status.state, ScanState::Running);
        assert_eq!(status.severities, Severities::default());
        assert!(status.weaknesses.is_empty());
    }

    #[test]
    fn test_ended_builder_is_complete() {
        let status = ScanStatusBuilder::ended().critical(2).weakness("xss-1").build();
        assert_eq!(status.state, ScanState::End);
        assert_eq!(status.progress(), 100);
        assert_eq!(status.severities.critical, 2);
        assert_eq!(status.weaknesses[0].weakness_id, "xss-1");
    }
}
