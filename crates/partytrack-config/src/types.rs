//! Configuration types.
//!
//! Every field is optional in TOML so that a project file can override a
//! single value from the user file. Accessors apply the built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Log level used when neither the config nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root configuration for partytrack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartytrackConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub dialogs: DialogsConfig,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level (`trace`, `debug`, `info`, `warn`, `error`).
    #[serde(default)]
    pub level: Option<String>,
    /// Emit JSON lines instead of human-readable output. Defaults to true.
    #[serde(default)]
    pub json: Option<bool>,
    /// Append logs to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn json(&self) -> bool {
        self.json.unwrap_or(true)
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Merge two logging configs, with `other` taking precedence.
    pub fn merge(base: &Self, other: &Self) -> Self {
        Self {
            level: other.level.clone().or_else(|| base.level.clone()),
            json: other.json.or(base.json),
            file: other.file.clone().or_else(|| base.file.clone()),
        }
    }
}

/// `[dialogs]` section: defaults applied to native file and folder pickers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogsConfig {
    /// Directory pickers open in when the request does not name one.
    #[serde(default)]
    pub default_directory: Option<PathBuf>,
    /// Reopen pickers in the directory of the last accepted selection.
    #[serde(default)]
    pub remember_last_directory: Option<bool>,
}

impl DialogsConfig {
    pub fn default_directory(&self) -> Option<&Path> {
        self.default_directory.as_deref()
    }

    pub fn remember_last_directory(&self) -> bool {
        self.remember_last_directory.unwrap_or(true)
    }

    /// Merge two dialog configs, with `other` taking precedence.
    pub fn merge(base: &Self, other: &Self) -> Self {
        Self {
            default_directory: other
                .default_directory
                .clone()
                .or_else(|| base.default_directory.clone()),
            remember_last_directory: other
                .remember_last_directory
                .or(base.remember_last_directory),
        }
    }
}
