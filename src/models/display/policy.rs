//! Policy display model

use serde::Serialize;
use tabled::Tabled;

use crate::config::PolicyConfig;

/// One policy setting as a table row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PolicyDisplay {
    #[tabled(rename = "SETTING")]
    pub setting: &'static str,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

fn limit(value: Option<u64>) -> String {
    value.map_or_else(|| "no limit".to_string(), |v| v.to_string())
}

impl PolicyDisplay {
    /// Rows for every normalized setting, in evaluation order
    pub fn rows(policy: &PolicyConfig) -> Vec<Self> {
        let row = |setting, value| Self { setting, value };
        vec![
            row("max_number_of_critical", limit(policy.max_critical)),
            row("max_number_of_high", limit(policy.max_high)),
            row(
                "weakness_is",
                if policy.weakness_is.is_empty() {
                    "--".to_string()
                } else {
                    policy.weakness_is.clone()
                },
            ),
            row("sca_max_number_of_critical", limit(policy.sca_max_critical)),
            row("sca_max_number_of_high", limit(policy.sca_max_high)),
            row("condition", policy.condition.to_string()),
            row("automerge", policy.automerge.to_string()),
            row("sync_scan", policy.sync_scan.to_string()),
            row("policy_name", policy.policy_name.clone()),
        ]
    }
}
