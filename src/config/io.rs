use std::path::Path;

use super::{schema::Config, validate::ConfigError};

/// Reads, parses and validates a TOML config. Validation messages are prefixed with the
/// file path so a bad `[[scales]]` entry can be traced to the file it came from.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_str.clone(),
        source,
    })?;
    let config: Config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path_str.clone(),
        source,
    })?;

    config.validate().map_err(|error| match error {
        ConfigError::Validation(message) => {
            ConfigError::Validation(format!("{}: {}", path_str, message))
        }
        other => other,
    })?;

    log::info!(
        "config_loaded path={} scales={} channel={}",
        path_str,
        config.scales.len(),
        config.channel_name()
    );
    Ok(config)
}
