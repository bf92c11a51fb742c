//! Engine configuration, readable from TOML.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid filter configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// What to do with a filter entry whose key names no known filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFilterPolicy {
    /// The definition does not apply.
    #[default]
    Reject,
    /// The entry is skipped and the remaining filters decide.
    Ignore,
}

/// Configuration for a [`FilterEngine`](super::FilterEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub unknown_filters: UnknownFilterPolicy,

    /// Stop testing a definition at its first failing filter. When off,
    /// every filter is still evaluated (and traced) but the outcome is the
    /// same.
    pub short_circuit: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            unknown_filters: UnknownFilterPolicy::Reject,
            short_circuit: true,
        }
    }
}

impl FilterConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FilterConfig::default();
        assert_eq!(config.unknown_filters, UnknownFilterPolicy::Reject);
        assert!(config.short_circuit);
        assert_eq!(FilterConfig::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn test_from_toml() {
        let config = FilterConfig::from_toml_str(
            r#"
            unknown_filters = "ignore"
            short_circuit = false
            "#,
        )
        .unwrap();

        assert_eq!(config.unknown_filters, UnknownFilterPolicy::Ignore);
        assert!(!config.short_circuit);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = FilterConfig::from_toml_str(r#"unknown_filters = "ignore""#).unwrap();
        assert!(config.short_circuit);
    }

    #[test]
    fn test_invalid_policy() {
        let err = FilterConfig::from_toml_str(r#"unknown_filters = "maybe""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
