//! Runtime configuration: scenario feed cadence/capacity and the generation endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use platform_host::DEFAULT_GENAI_MODEL;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Delay between scenario requests while the owning window is open.
    pub interval_ms: u64,
    /// Maximum scenarios held in the inbox; polling pauses while it is full.
    pub capacity: usize,
    /// Request one scenario immediately when the window opens.
    pub fetch_on_open: bool,
}

impl FeedConfig {
    pub const fn new(interval_ms: u64, capacity: usize) -> Self {
        Self {
            interval_ms,
            capacity,
            fetch_on_open: true,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(30_000, 8)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenAiConfig {
    /// Chat-completions endpoint. Relative URLs resolve against the page origin.
    pub endpoint: String,
    pub model: String,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/genai/chat".to_string(),
            model: DEFAULT_GENAI_MODEL.to_string(),
        }
    }
}

/// Feed fields as written in a config file; omitted fields fall back to the channel's defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FeedOverrides {
    interval_ms: Option<u64>,
    capacity: Option<usize>,
    fetch_on_open: Option<bool>,
}

impl FeedOverrides {
    fn apply(self, base: FeedConfig) -> FeedConfig {
        FeedConfig {
            interval_ms: self.interval_ms.unwrap_or(base.interval_ms),
            capacity: self.capacity.unwrap_or(base.capacity),
            fetch_on_open: self.fetch_on_open.unwrap_or(base.fetch_on_open),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RuntimeConfigFile {
    mail_feed: FeedOverrides,
    sms_feed: FeedOverrides,
    genai: GenAiConfig,
}

impl From<RuntimeConfigFile> for RuntimeConfig {
    fn from(file: RuntimeConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            mail_feed: file.mail_feed.apply(defaults.mail_feed),
            sms_feed: file.sms_feed.apply(defaults.sms_feed),
            genai: file.genai,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RuntimeConfigFile")]
pub struct RuntimeConfig {
    pub mail_feed: FeedConfig,
    pub sms_feed: FeedConfig,
    pub genai: GenAiConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            mail_feed: FeedConfig::new(25_000, 10),
            sms_feed: FeedConfig::new(30_000, 8),
            genai: GenAiConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid runtime config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("feed `{feed}` must have a non-zero {field}")]
    ZeroValue {
        feed: &'static str,
        field: &'static str,
    },
}

impl RuntimeConfig {
    /// Parses a JSON config; omitted fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed JSON or a zero interval/capacity.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (feed, cfg) in [("mail_feed", &self.mail_feed), ("sms_feed", &self.sms_feed)] {
            if cfg.interval_ms == 0 {
                return Err(ConfigError::ZeroValue {
                    feed,
                    field: "interval_ms",
                });
            }
            if cfg.capacity == 0 {
                return Err(ConfigError::ZeroValue {
                    feed,
                    field: "capacity",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = RuntimeConfig::from_json_str(r#"{"sms_feed": {"interval_ms": 5000}}"#)
            .expect("config");
        assert_eq!(config.sms_feed.interval_ms, 5000);
        assert_eq!(config.sms_feed.capacity, 8);
        assert_eq!(config.mail_feed, FeedConfig::new(25_000, 10));
        assert_eq!(config.genai.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn partial_mail_feed_keeps_mail_defaults() {
        let config = RuntimeConfig::from_json_str(r#"{"mail_feed": {"interval_ms": 5000}}"#)
            .expect("config");
        assert_eq!(
            config.mail_feed,
            FeedConfig {
                interval_ms: 5000,
                capacity: 10,
                fetch_on_open: true,
            }
        );
        assert_eq!(config.sms_feed, FeedConfig::new(30_000, 8));
    }

    #[test]
    fn serialized_config_loads_back_unchanged() {
        let mut config = RuntimeConfig::default();
        config.mail_feed.fetch_on_open = false;
        config.genai.endpoint = "https://llm.internal/v1/chat".to_string();
        let raw = serde_json::to_string(&config).expect("serialize");
        assert_eq!(RuntimeConfig::from_json_str(&raw).expect("config"), config);
    }

    #[test]
    fn zero_values_are_rejected() {
        let err = RuntimeConfig::from_json_str(r#"{"mail_feed": {"capacity": 0}}"#)
            .expect_err("zero capacity");
        assert_eq!(err.to_string(), "feed `mail_feed` must have a non-zero capacity");
        assert!(RuntimeConfig::from_json_str("not json").is_err());
    }
}
