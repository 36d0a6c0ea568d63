//! Findings policy evaluation
//!
//! Pure decision logic: no I/O, no state. The orchestrator calls it once per
//! in-flight status snapshot and once more when the scan has finished.

use regex::Regex;
use serde::Serialize;

use crate::client::models::{ScaSeverities, Severities, Weakness};
use crate::config::{Condition, PolicyConfig};

pub const CRITICAL_REASON: &str = "Critical limit exceeded";
pub const HIGH_REASON: &str = "High limit exceeded";
pub const WEAKNESS_REASON: &str =
    "Weaknesses entered in the weakness_is key were found during the scan.";
pub const SCA_CRITICAL_REASON: &str = "SCA Critical limit exceeded";
pub const SCA_HIGH_REASON: &str = "SCA High limit exceeded";

/// Outcome of a policy check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub violated: bool,
    pub reasons: Vec<String>,
}

impl Verdict {
    fn pass() -> Self {
        Self::default()
    }

    fn fail(reasons: Vec<String>) -> Self {
        Self {
            violated: true,
            reasons,
        }
    }
}

/// Build the keyword pattern from a comma-separated list.
///
/// Each keyword is reduced to `[A-Za-z0-9.,]`; `None` when nothing remains.
pub fn keyword_pattern(weakness_is: &str) -> Option<Regex> {
    let keywords: Vec<String> = weakness_is
        .split(',')
        .map(|k| {
            k.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == ',')
                .collect::<String>()
        })
        .filter(|k| !k.is_empty())
        .collect();

    if keywords.is_empty() {
        return None;
    }

    // Only [A-Za-z0-9.] survives, so the alternation is always a valid pattern
    Regex::new(&format!("(?i)({})", keywords.join("|"))).ok()
}

/// Weakness records whose id matches any configured keyword
pub fn matching_weaknesses<'a>(weaknesses: &'a [Weakness], weakness_is: &str) -> Vec<&'a Weakness> {
    match keyword_pattern(weakness_is) {
        Some(pattern) => weaknesses
            .iter()
            .filter(|w| pattern.is_match(&w.weakness_id))
            .collect(),
        None => Vec::new(),
    }
}

/// Evaluate the policy against one snapshot of findings.
///
/// Pass `sca` only at completion; in-flight checks never see SCA counts.
/// Conditions are checked in a fixed order: critical, high, weakness match,
/// SCA critical, SCA high. `Or` keeps only the first breach; `And` fails on
/// any breach and reports all of them.
pub fn evaluate(
    severities: &Severities,
    weaknesses: &[Weakness],
    sca: Option<&ScaSeverities>,
    policy: &PolicyConfig,
) -> Verdict {
    let exceeds = |limit: Option<u64>, count: u64| limit.is_some_and(|max| count > max);

    let mut checks = vec![
        (exceeds(policy.max_critical, severities.critical), CRITICAL_REASON),
        (exceeds(policy.max_high, severities.high), HIGH_REASON),
        (
            !matching_weaknesses(weaknesses, &policy.weakness_is).is_empty(),
            WEAKNESS_REASON,
        ),
    ];
    if let Some(sca) = sca {
        checks.push((exceeds(policy.sca_max_critical, sca.critical), SCA_CRITICAL_REASON));
        checks.push((exceeds(policy.sca_max_high, sca.high), SCA_HIGH_REASON));
    }

    let mut breaches = checks
        .into_iter()
        .filter(|(tripped, _)| *tripped)
        .map(|(_, reason)| reason.to_string());

    match policy.condition {
        Condition::Or => match breaches.next() {
            Some(reason) => Verdict::fail(vec![reason]),
            None => Verdict::pass(),
        },
        Condition::And => {
            let reasons: Vec<String> = breaches.collect();
            if reasons.is_empty() {
                Verdict::pass()
            } else {
                Verdict::fail(reasons)
            }
        }
    }
}
