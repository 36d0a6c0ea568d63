//! Scan models

use serde::{Deserialize, Serialize};

/// Body of the scan start call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartScanRequest {
    pub project: String,
    pub branch: String,
    pub account: String,
    pub id: String,
    pub action: bool,
    pub commit_id: String,
    pub committer: String,
    pub commit_message: String,
    #[serde(rename = "type")]
    pub visibility: String,
    pub githubtoken: String,
    #[serde(rename = "policy_id")]
    pub policy_name: String,
}

/// Scan start response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartScanResponse {
    #[serde(default)]
    pub scan_id: Option<String>,
}

/// Backend-reported scan state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanState {
    #[default]
    Running,
    End,
    Failure,
    /// Any intermediate state the backend may add (queued, analyzing, ...)
    #[serde(other)]
    Pending,
}

impl ScanState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanState::Running => "running",
            ScanState::End => "end",
            ScanState::Failure => "failure",
            ScanState::Pending => "pending",
        }
    }
}

impl std::fmt::Display for ScanState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity counts; any absent or null bucket reads as zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Severities {
    #[serde(default, deserialize_with = "deserialize_count")]
    pub critical: u64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub high: u64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub medium: u64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub low: u64,
}

impl Severities {
    pub fn total(&self) -> u64 {
        self.critical + self.high + self.medium + self.low
    }
}

/// A weakness record reported alongside a scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weakness {
    #[serde(default)]
    pub weakness_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProgressData {
    #[serde(default, deserialize_with = "deserialize_count")]
    pub progress: u64,
}

/// Scan status snapshot returned by each poll
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStatus {
    #[serde(default)]
    pub state: ScanState,

    #[serde(default)]
    pub progress_data: ProgressData,

    /// `null` severities are treated like an empty object
    #[serde(default, deserialize_with = "deserialize_severities")]
    pub severities: Severities,

    #[serde(default, rename = "weaknessesArr", deserialize_with = "deserialize_weaknesses")]
    pub weaknesses: Vec<Weakness>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub riskscore: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
}

impl ScanStatus {
    /// Progress percentage clamped to [0, 100]
    pub fn progress(&self) -> u64 {
        self.progress_data.progress.min(100)
    }
}

/// Counts arrive as integers, floats, numeric strings, or null
pub(super) fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: serde::de::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CountValue {
        Integer(i64),
        Float(f64),
        String(String),
    }

    Ok(match Option::<CountValue>::deserialize(deserializer)? {
        Some(CountValue::Integer(i)) => i.max(0) as u64,
        Some(CountValue::Float(f)) if f.is_finite() && f > 0.0 => f as u64,
        Some(CountValue::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    })
}

fn deserialize_severities<'de, D>(deserializer: D) -> std::result::Result<Severities, D::Error>
where
    D: serde::de::Deserializer<'de>,
{
    Ok(Option::<Severities>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_weaknesses<'de, D>(deserializer: D) -> std::result::Result<Vec<Weakness>, D::Error>
where
    D: serde::de::Deserializer<'de>,
{
    Ok(Option::<Vec<Weakness>>::deserialize(deserializer)?.unwrap_or_default())
}
