//! Configuration options for validation behavior

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Presence Strategy
// ============================================================================

/// What counts as "provided" when checking fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStrategy {
    /// Absent keys and falsy values (`null`, `false`, `0`, `""`) are treated
    /// as not provided (default)
    #[default]
    Falsy,
    /// Only an absent key is treated as not provided
    Strict,
}

impl PresenceStrategy {
    /// Whether `value` (the lookup result for a field) counts as provided
    pub fn is_provided(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (_, None) => false,
            (Self::Strict, Some(_)) => true,
            (Self::Falsy, Some(value)) => !is_falsy(value),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

// ============================================================================
// Check Mode
// ============================================================================

/// How the user checks of a single field are awaited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckMode {
    /// One check at a time, in declaration order (default)
    #[default]
    Sequential,
    /// All checks of a field polled together; the reported failure is still
    /// the first failing check in declaration order
    Concurrent,
}

// ============================================================================
// Validator Config
// ============================================================================

/// Configuration options for the schema validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Field presence semantics for the required pass
    pub presence: PresenceStrategy,

    /// How user checks are awaited
    pub checks: CheckMode,
}

impl ValidatorConfig {
    /// Create a new validator config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the presence strategy
    pub fn presence(mut self, presence: PresenceStrategy) -> Self {
        self.presence = presence;
        self
    }

    /// Treat only missing keys as absent
    pub fn strict_presence(mut self) -> Self {
        self.presence = PresenceStrategy::Strict;
        self
    }

    /// Set the check mode
    pub fn checks(mut self, checks: CheckMode) -> Self {
        self.checks = checks;
        self
    }

    /// Poll the checks of one field concurrently
    pub fn concurrent_checks(mut self) -> Self {
        self.checks = CheckMode::Concurrent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.presence, PresenceStrategy::Falsy);
        assert_eq!(config.checks, CheckMode::Sequential);
    }

    #[test]
    fn test_config_builder() {
        let config = ValidatorConfig::new().strict_presence().concurrent_checks();
        assert_eq!(config.presence, PresenceStrategy::Strict);
        assert_eq!(config.checks, CheckMode::Concurrent);
    }

    #[test]
    fn test_falsy_presence() {
        let falsy = PresenceStrategy::Falsy;
        assert!(!falsy.is_provided(None));
        assert!(!falsy.is_provided(Some(&json!(null))));
        assert!(!falsy.is_provided(Some(&json!(false))));
        assert!(!falsy.is_provided(Some(&json!(0))));
        assert!(!falsy.is_provided(Some(&json!(0.0))));
        assert!(!falsy.is_provided(Some(&json!(""))));

        assert!(falsy.is_provided(Some(&json!(true))));
        assert!(falsy.is_provided(Some(&json!(-1))));
        assert!(falsy.is_provided(Some(&json!([]))));
        assert!(falsy.is_provided(Some(&json!({}))));
    }

    #[test]
    fn test_strict_presence() {
        let strict = PresenceStrategy::Strict;
        assert!(!strict.is_provided(None));
        assert!(strict.is_provided(Some(&json!(null))));
        assert!(strict.is_provided(Some(&json!(false))));
        assert!(strict.is_provided(Some(&json!(0))));
        assert!(strict.is_provided(Some(&json!(""))));
    }

    #[test]
    fn test_config_deserialize() {
        let config: ValidatorConfig =
            serde_json::from_value(json!({ "presence": "strict" })).unwrap();
        assert_eq!(config.presence, PresenceStrategy::Strict);
        assert_eq!(config.checks, CheckMode::Sequential);
    }
}
