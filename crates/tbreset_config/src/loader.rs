//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// Loads and validates the configuration from the given file path.
///
/// A missing file is not an error: the defaults apply. Any other read
/// failure, parse failure, or validation failure is reported.
pub fn load_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ProjectConfig::default());
        }
        Err(e) => return Err(ConfigError::IoError(e)),
    };
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are usable.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.clean.suffix.is_empty() {
        return Err(ConfigError::ValidationError(
            "clean.suffix must not be empty".to_string(),
        ));
    }
    if let Some(input) = &config.clean.input {
        if input.is_empty() {
            return Err(ConfigError::ValidationError(
                "clean.input must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}
