//! Page configuration
//!
//! Each practice page declares which topic it covers. The topic key also
//! namespaces persisted progress in LocalStorage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading the page configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed page config: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Per-page configuration supplied alongside the problem list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Namespace for persisted progress (empty disables persistence)
    #[serde(default, alias = "topicKey")]
    pub topic_key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
}

impl PageConfig {
    pub fn new(topic_key: impl Into<String>) -> Self {
        Self {
            topic_key: topic_key.into(),
            ..Self::default()
        }
    }

    /// Parse a config object from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether progress for this page should be loaded and saved
    pub fn persists_progress(&self) -> bool {
        !self.topic_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_camel_case() {
        let config = PageConfig::from_json(
            r#"{"topicKey": "tvm", "title": "Time Value of Money", "subtitle": "Week 2"}"#,
        )
        .unwrap();
        assert_eq!(config.topic_key, "tvm");
        assert_eq!(config.title, "Time Value of Money");
        assert!(config.persists_progress());
    }

    #[test]
    fn test_missing_topic_disables_persistence() {
        let config = PageConfig::from_json(r#"{"title": "Bonds"}"#).unwrap();
        assert!(!config.persists_progress());
        assert!(!PageConfig::new("   ").persists_progress());
    }

    #[test]
    fn test_malformed_config() {
        assert!(PageConfig::from_json("{not json").is_err());
    }
}
