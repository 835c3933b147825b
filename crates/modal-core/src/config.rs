use crate::error::ConfigError;
use crate::markup::{DECISION_KEY_PREFIX, DEFAULT_RETENTION_DAYS};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Behaviour toggles for the controller.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ModalConfig {
    /// Leave triggers unbound when their dialog already has a decision.
    pub skip_decided_triggers: bool,
    /// Open dialogs from fragment links inside `.trigger-modal` containers.
    pub external_triggers: bool,
    /// Toggle the `active-modal` class on `<body>` while a dialog is shown.
    pub active_marker: bool,
    /// Retention used when a dialog has no usable retention attribute.
    pub default_retention_days: i64,
    pub key_prefix: String,
    pub log_level: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            skip_decided_triggers: false,
            external_triggers: false,
            active_marker: false,
            default_retention_days: DEFAULT_RETENTION_DAYS,
            key_prefix: DECISION_KEY_PREFIX.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ModalConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bad = self.key_prefix.is_empty()
            || self.key_prefix.chars().any(|c| {
                c.is_whitespace() || c.is_control() || matches!(c, ';' | ',' | '=' | '"')
            });
        if bad {
            return Err(ConfigError::KeyPrefix(self.key_prefix.clone()));
        }
        Ok(())
    }

    /// Configured log level, falling back to `Info` for unknown names.
    pub fn level(&self) -> log::Level {
        log::Level::from_str(&self.log_level).unwrap_or(log::Level::Info)
    }
}
