// 7.0 config.rs: all settings in one place. wire delimiter, risk limits, journal.
// 7.1 every section has a Default so a partial TOML file is enough.

use crate::decoder::{DEFAULT_DELIMITER, SOH};
use crate::risk::RiskLimits;
use serde::{Deserialize, Serialize};
use std::path::Path;

/** 7.2: event journal settings */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventLogConfig {
    // Maximum number of events to retain in memory
    pub max_events: usize,
    // Log every recorded event
    pub verbose: bool,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            max_events: 100_000,
            verbose: false,
        }
    }
}

// The complete pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    // Segment delimiter on the wire
    pub delimiter: char,
    pub risk: RiskLimits,
    pub events: EventLogConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            risk: RiskLimits::default(),
            events: EventLogConfig::default(),
        }
    }
}

impl PipelineConfig {
    // Same limits, SOH-delimited messages as they arrive off a real session
    pub fn fix_wire() -> Self {
        Self {
            delimiter: SOH,
            ..Self::default()
        }
    }

    // Half the default limits
    pub fn conservative() -> Self {
        let mut config = Self::default();
        config.risk.max_order_size /= 2;
        config.risk.max_position /= 2;
        config
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    // Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter == '=' {
            return Err(ConfigError::InvalidDelimiter {
                reason: "delimiter cannot be the tag/value separator".to_string(),
            });
        }

        self.risk.validate()?;

        if self.events.max_events == 0 {
            return Err(ConfigError::InvalidEvents {
                reason: "max_events must be positive".to_string(),
            });
        }

        Ok(())
    }
}

// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid delimiter: {reason}")]
    InvalidDelimiter { reason: String },

    #[error("Invalid risk limits: {reason}")]
    InvalidRisk { reason: String },

    #[error("Invalid event settings: {reason}")]
    InvalidEvents { reason: String },

    #[error("Failed to parse config: {reason}")]
    Parse { reason: String },

    #[error("Failed to read config {path}: {reason}")]
    Io { path: String, reason: String },
}

// Environment presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Conservative,
}

impl Environment {
    pub fn config(&self) -> PipelineConfig {
        match self {
            Environment::Development => PipelineConfig::default(),
            Environment::Conservative => PipelineConfig::conservative(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.delimiter, '|');
        assert_eq!(config.risk.max_order_size, 1000);
        assert_eq!(config.risk.max_position, 2000);
    }

    #[test]
    fn test_presets_valid() {
        for env in [Environment::Development, Environment::Conservative] {
            assert!(env.config().validate().is_ok());
        }
        assert_eq!(Environment::Conservative.config().risk.max_order_size, 500);
        assert_eq!(PipelineConfig::fix_wire().delimiter, '\x01');
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PipelineConfig::from_toml_str(
            r#"
            [risk]
            max_order_size = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.risk.max_order_size, 250);
        assert_eq!(config.risk.max_position, 2000);
        assert_eq!(config.delimiter, '|');
        assert_eq!(config.events.max_events, 100_000);
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = PipelineConfig::default();
        config.delimiter = '=';
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDelimiter { .. })));

        let mut config = PipelineConfig::default();
        config.risk.max_position = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRisk { .. })));

        let mut config = PipelineConfig::default();
        config.events.max_events = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidEvents { .. })));

        assert!(matches!(
            PipelineConfig::from_toml_str("risk = 5"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            PipelineConfig::load("/nonexistent/fixflow.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
