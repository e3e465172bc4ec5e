//! Configuration for the pai engine and UI.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the stock demo behavior.

use crate::conversation::{GREETING, PLACEHOLDER_REPLY, TITLE_MAX_CHARS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration for pai.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Delay before the simulated assistant reply is delivered.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// How long a message timestamp stays visible after it is shown.
    #[serde(default = "default_timestamp_visible_ms")]
    pub timestamp_visible_ms: u64,

    /// Maximum characters taken from the first user message for the title.
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,

    /// UI tick interval.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Start with the sample conversations in the sidebar.
    #[serde(default = "default_seed_demo_history")]
    pub seed_demo_history: bool,

    /// Greeting seeded into every new conversation.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Canned assistant reply.
    #[serde(default = "default_placeholder_reply")]
    pub placeholder_reply: String,
}

fn default_reply_delay_ms() -> u64 {
    1000
}

fn default_timestamp_visible_ms() -> u64 {
    3000
}

fn default_title_max_chars() -> usize {
    TITLE_MAX_CHARS
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_seed_demo_history() -> bool {
    true
}

fn default_greeting() -> String {
    GREETING.into()
}

fn default_placeholder_reply() -> String {
    PLACEHOLDER_REPLY.into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            timestamp_visible_ms: default_timestamp_visible_ms(),
            title_max_chars: default_title_max_chars(),
            tick_rate_ms: default_tick_rate_ms(),
            seed_demo_history: default_seed_demo_history(),
            greeting: default_greeting(),
            placeholder_reply: default_placeholder_reply(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Reject values the UI cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title_max_chars == 0 {
            return Err(ConfigError::Invalid(
                "title_max_chars must be greater than zero".into(),
            ));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_rate_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn timestamp_visible(&self) -> Duration {
        Duration::from_millis(self.timestamp_visible_ms)
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A value is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.reply_delay_ms, 1000);
        assert_eq!(config.timestamp_visible_ms, 3000);
        assert_eq!(config.title_max_chars, 30);
        assert!(config.seed_demo_history);
        assert_eq!(config.greeting, GREETING);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config: Config =
            serde_json::from_str(r#"{"reply_delay_ms": 50, "seed_demo_history": false}"#).unwrap();
        assert_eq!(config.reply_delay(), Duration::from_millis(50));
        assert!(!config.seed_demo_history);
        assert_eq!(config.tick_rate_ms, 250);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            placeholder_reply: "canned".into(),
            ..Config::default()
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"title_max_chars": 0}"#).unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }
}
