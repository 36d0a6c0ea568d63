//! Findings policy (`FAILED_ARGS`) parsing
//!
//! The policy block is YAML: either a single mapping or a sequence of
//! partial mappings. Declarations merge left to right and the first
//! non-empty value of each field wins.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Policy profile used when none is configured
pub const DEFAULT_POLICY_NAME: &str = "Advanced Security";

/// How individual policy conditions combine into a verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Condition {
    /// Any configured breach fails the build, and every breach is reported
    #[default]
    And,
    /// The first breach in priority order fails the build
    Or,
}

impl std::str::FromStr for Condition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(Condition::And),
            "OR" => Ok(Condition::Or),
            other => Err(ConfigError::Invalid(format!(
                "condition must be AND or OR, got '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::And => write!(f, "AND"),
            Condition::Or => write!(f, "OR"),
        }
    }
}

/// Normalized, immutable policy snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyConfig {
    pub max_critical: Option<u64>,
    pub max_high: Option<u64>,
    pub sca_max_critical: Option<u64>,
    pub sca_max_high: Option<u64>,
    /// Comma-separated weakness keywords (may be empty)
    pub weakness_is: String,
    pub condition: Condition,
    pub automerge: bool,
    pub sync_scan: bool,
    pub policy_name: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_critical: None,
            max_high: None,
            sca_max_critical: None,
            sca_max_high: None,
            weakness_is: String::new(),
            condition: Condition::default(),
            automerge: false,
            sync_scan: true,
            policy_name: DEFAULT_POLICY_NAME.to_string(),
        }
    }
}

/// One partial policy declaration as written by the user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialPolicy {
    #[serde(default, deserialize_with = "lenient::count")]
    pub max_number_of_critical: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub max_number_of_high: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub sca_max_number_of_critical: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub sca_max_number_of_high: Option<u64>,
    #[serde(default, deserialize_with = "lenient::keywords")]
    pub weakness_is: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub automerge: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub sync_scan: Option<bool>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub policy_name: Option<String>,
}

impl PolicyConfig {
    /// Parse a `FAILED_ARGS` block. Blank input yields the defaults.
    pub fn from_yaml(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: serde_yaml::Value = serde_yaml::from_str(input)?;
        let parts: Vec<PartialPolicy> = match value {
            serde_yaml::Value::Null => Vec::new(),
            serde_yaml::Value::Sequence(items) => items
                .into_iter()
                .filter(|item| !item.is_null())
                .map(serde_yaml::from_value)
                .collect::<Result<_, _>>()?,
            mapping @ serde_yaml::Value::Mapping(_) => vec![serde_yaml::from_value(mapping)?],
            other => {
                return Err(ConfigError::ParseError(format!(
                    "expected a mapping or a list of mappings, got {:?}",
                    other
                )));
            }
        };

        Self::merge(parts)
    }

    /// Merge partial declarations; the first non-empty value of each field wins
    pub fn merge(parts: impl IntoIterator<Item = PartialPolicy>) -> Result<Self, ConfigError> {
        let mut acc = PartialPolicy::default();
        for part in parts {
            acc.max_number_of_critical = acc.max_number_of_critical.or(part.max_number_of_critical);
            acc.max_number_of_high = acc.max_number_of_high.or(part.max_number_of_high);
            acc.sca_max_number_of_critical = acc
                .sca_max_number_of_critical
                .or(part.sca_max_number_of_critical);
            acc.sca_max_number_of_high = acc.sca_max_number_of_high.or(part.sca_max_number_of_high);
            acc.weakness_is = acc.weakness_is.or(part.weakness_is);
            acc.condition = acc.condition.or(part.condition);
            acc.automerge = acc.automerge.or(part.automerge);
            acc.sync_scan = acc.sync_scan.or(part.sync_scan);
            acc.policy_name = acc.policy_name.or(part.policy_name);
        }

        let defaults = Self::default();
        Ok(Self {
            max_critical: acc.max_number_of_critical,
            max_high: acc.max_number_of_high,
            sca_max_critical: acc.sca_max_number_of_critical,
            sca_max_high: acc.sca_max_number_of_high,
            weakness_is: acc.weakness_is.unwrap_or_default(),
            condition: acc
                .condition
                .map(|c| c.parse())
                .transpose()?
                .unwrap_or(defaults.condition),
            automerge: acc.automerge.unwrap_or(defaults.automerge),
            sync_scan: acc.sync_scan.unwrap_or(defaults.sync_scan),
            policy_name: acc.policy_name.unwrap_or(defaults.policy_name),
        })
    }
}

/// Deserializers that accept the loose shapes users write in workflow YAML.
/// Empty values read as absent so they never shadow later declarations.
mod lenient {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Integer(i64),
        Float(f64),
        Text(String),
        List(Vec<String>),
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        match Option::<Scalar>::deserialize(d)? {
            None => Ok(None),
            Some(Scalar::Integer(i)) if i >= 0 => Ok(Some(i as u64)),
            Some(Scalar::Integer(i)) => Err(D::Error::custom(format!(
                "limit must not be negative, got {}",
                i
            ))),
            Some(Scalar::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Scalar::Text(s)) => s
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("limit must be a number, got '{}'", s))),
            Some(_) => Err(D::Error::custom("limit must be a non-negative integer")),
        }
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        match Option::<Scalar>::deserialize(d)? {
            None => Ok(None),
            Some(Scalar::Bool(b)) => Ok(Some(b)),
            Some(Scalar::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "" => Ok(None),
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                other => Err(D::Error::custom(format!("expected true or false, got '{}'", other))),
            },
            Some(_) => Err(D::Error::custom("expected true or false")),
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        match Option::<Scalar>::deserialize(d)? {
            None => Ok(None),
            Some(Scalar::Text(s)) => Ok(Some(s.trim().to_string()).filter(|s| !s.is_empty())),
            Some(Scalar::Integer(i)) => Ok(Some(i.to_string())),
            Some(_) => Err(D::Error::custom("expected a string")),
        }
    }

    /// Keywords may be a comma-separated string or a YAML list
    pub fn keywords<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        match Option::<Scalar>::deserialize(d)? {
            None => Ok(None),
            Some(Scalar::Text(s)) => Ok(Some(s).filter(|s| !s.trim().is_empty())),
            Some(Scalar::List(items)) => {
                Ok(Some(items.join(",")).filter(|s| !s.trim().is_empty()))
            }
            Some(_) => Err(D::Error::custom("weakness_is must be a string or a list")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_uses_defaults() {
        let policy = PolicyConfig::from_yaml("  \n").unwrap();
        assert_eq!(policy, PolicyConfig::default());
        assert!(policy.sync_scan);
        assert!(!policy.automerge);
        assert_eq!(policy.condition, Condition::And);
        assert_eq!(policy.policy_name, DEFAULT_POLICY_NAME);
    }

    #[test]
    fn test_single_mapping() {
        let policy = PolicyConfig::from_yaml(
            "max_number_of_critical: 0\nmax_number_of_high: 5\nweakness_is: \"sql,xss\"\ncondition: or\n",
        )
        .unwrap();

        assert_eq!(policy.max_critical, Some(0));
        assert_eq!(policy.max_high, Some(5));
        assert_eq!(policy.weakness_is, "sql,xss");
        assert_eq!(policy.condition, Condition::Or);
    }

    #[test]
    fn test_sequence_first_non_empty_wins() {
        let policy = PolicyConfig::from_yaml(
            r#"
- max_number_of_critical: 3
- max_number_of_critical: 9
  max_number_of_high: 4
- weakness_is: ""
- weakness_is: "xss"
  automerge: true
"#,
        )
        .unwrap();

        assert_eq!(policy.max_critical, Some(3));
        assert_eq!(policy.max_high, Some(4));
        assert_eq!(policy.weakness_is, "xss");
        assert!(policy.automerge);
    }

    #[test]
    fn test_zero_is_a_configured_limit() {
        let policy = PolicyConfig::from_yaml("- max_number_of_critical: 0\n- max_number_of_critical: 7\n")
            .unwrap();
        assert_eq!(policy.max_critical, Some(0));
    }

    #[test]
    fn test_string_values_are_accepted() {
        let policy = PolicyConfig::from_yaml(
            "max_number_of_high: \"2\"\nsync_scan: \"false\"\nsca_max_number_of_critical: 1\n",
        )
        .unwrap();
        assert_eq!(policy.max_high, Some(2));
        assert!(!policy.sync_scan);
        assert_eq!(policy.sca_max_critical, Some(1));
    }

    #[test]
    fn test_explicit_false_is_not_empty() {
        let policy =
            PolicyConfig::from_yaml("- sync_scan: false\n- sync_scan: true\n").unwrap();
        assert!(!policy.sync_scan);
    }

    #[test]
    fn test_weakness_list_joined() {
        let policy = PolicyConfig::from_yaml("weakness_is:\n  - sql\n  - xss\n").unwrap();
        assert_eq!(policy.weakness_is, "sql,xss");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let policy = PolicyConfig::from_yaml("max_number_of_low: 3\npolicy_name: Strict\n").unwrap();
        assert_eq!(policy.policy_name, "Strict");
    }

    #[test]
    fn test_invalid_condition_rejected() {
        let err = PolicyConfig::from_yaml("condition: XOR\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_negative_limit_rejected() {
        let err = PolicyConfig::from_yaml("max_number_of_high: -1\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_scalar_document_rejected() {
        let err = PolicyConfig::from_yaml("just a string").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_condition_display() {
        assert_eq!(Condition::And.to_string(), "AND");
        assert_eq!("or".parse::<Condition>().unwrap(), Condition::Or);
    }
}
