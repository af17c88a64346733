use std::collections::HashSet;

use thiserror::Error;

use crate::notify::validate_recipient;

use super::schema::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

/// One day.
pub const MAX_MONITOR_INTERVAL_SECS: u64 = 86_400;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor_interval == 0 || self.monitor_interval > MAX_MONITOR_INTERVAL_SECS {
            return Err(ConfigError::Validation(format!(
                "monitor_interval must be between 1 and {} seconds",
                MAX_MONITOR_INTERVAL_SECS
            )));
        }
        if !self.series.max_gap_hours.is_finite() || self.series.max_gap_hours <= 0.0 {
            return Err(ConfigError::Validation(
                "series.max_gap_hours must be a positive number".to_string(),
            ));
        }
        if self.series.lookback_days == 0 {
            return Err(ConfigError::Validation(
                "series.lookback_days must be greater than 0".to_string(),
            ));
        }
        if self.dispatch.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "dispatch.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.dispatch.queue_capacity == 0 {
            return Err(ConfigError::Validation(
                "dispatch.queue_capacity must be greater than 0".to_string(),
            ));
        }
        if self.telegram.enabled && self.telegram.bot_token.trim().is_empty() {
            return Err(ConfigError::Validation(
                "telegram.bot_token must not be empty when telegram.enabled is true".to_string(),
            ));
        }
        if self.telegram.enabled && self.telegram.chat_id == 0 {
            return Err(ConfigError::Validation(
                "telegram.chat_id must be set when telegram.enabled is true".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for scale in &self.scales {
            if scale.id.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "scales.id must not be empty".to_string(),
                ));
            }
            if !seen.insert(scale.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "scale {} is configured more than once",
                    scale.id
                )));
            }
            scale.thresholds().map_err(|error| {
                ConfigError::Validation(format!("scale {}: {}", scale.id, error))
            })?;
            validate_recipient(&scale.recipient).map_err(|error| {
                ConfigError::Validation(format!("scale {} recipient: {}", scale.id, error))
            })?;
        }
        Ok(())
    }
}
