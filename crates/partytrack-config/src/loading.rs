//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.partytrack/config.toml` (global user preferences)
//! 3. **Project config** - `./.partytrack/config.toml` (project-specific overrides)

use std::fs;
use std::path::Path;

use partytrack_paths::PartytrackPaths;
use tracing::debug;

use crate::errors::ConfigError;
use crate::types::{DialogsConfig, LoggingConfig, PartytrackConfig};
use crate::validation::validate_config;

/// Load configuration from the user home and the current directory.
///
/// # Errors
///
/// Returns an error if a file fails to parse or validation fails. Missing
/// config files are not errors.
pub fn load_hierarchy() -> Result<PartytrackConfig, ConfigError> {
    let paths = PartytrackPaths::resolve()?;
    let project_root = std::env::current_dir()?;
    load_hierarchy_from(&paths, &project_root)
}

/// Load configuration from an explicit user directory layout and project root.
pub fn load_hierarchy_from(
    paths: &PartytrackPaths,
    project_root: &Path,
) -> Result<PartytrackConfig, ConfigError> {
    let mut config = PartytrackConfig::default();

    let sources = [
        paths.user_config(),
        PartytrackPaths::project_config(project_root),
    ];

    for path in sources {
        match load_config_file(&path) {
            Ok(loaded) => {
                debug!(event = "config.loading.file_loaded", path = %path.display());
                config = merge_configs(config, loaded);
            }
            Err(e) if e.is_file_not_found() => {
                debug!(event = "config.loading.file_missing", path = %path.display());
            }
            Err(e) => return Err(e),
        }
    }

    validate_config(&config)?;

    Ok(config)
}

/// Load a configuration file from the given path.
fn load_config_file(path: &Path) -> Result<PartytrackConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Merge two configurations, with override_config taking precedence.
///
/// Override values replace base values only if present.
pub fn merge_configs(base: PartytrackConfig, override_config: PartytrackConfig) -> PartytrackConfig {
    PartytrackConfig {
        logging: LoggingConfig::merge(&base.logging, &override_config.logging),
        dialogs: DialogsConfig::merge(&base.dialogs, &override_config.dialogs),
    }
}
