//! Configuration validation logic.

use crate::errors::ConfigError;
use crate::types::PartytrackConfig;

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a PartytrackConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - Log level, if set, must be one of [`VALID_LOG_LEVELS`] (case-insensitive)
/// - Default dialog directory, if set, must be an absolute path
/// - Log file, if set, must be an absolute path
pub fn validate_config(config: &PartytrackConfig) -> Result<(), ConfigError> {
    if let Some(ref level) = config.logging.level
        && !VALID_LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "Invalid log level '{}'. Valid options: {}",
                level,
                VALID_LOG_LEVELS.join(", ")
            ),
        });
    }

    if let Some(ref file) = config.logging.file
        && !file.is_absolute()
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("Log file '{}' must be an absolute path", file.display()),
        });
    }

    if let Some(ref dir) = config.dialogs.default_directory
        && !dir.is_absolute()
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "Default dialog directory '{}' must be an absolute path",
                dir.display()
            ),
        });
    }

    Ok(())
}
