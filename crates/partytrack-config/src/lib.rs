//! # partytrack-config
//!
//! TOML configuration types, loading and validation for partytrack.
//!
//! Single source of truth for `PartytrackConfig` and its sections. Depends
//! only on `partytrack-paths`.

mod loading;
mod validation;

pub mod errors;
pub mod types;

// Public API re-exports
pub use errors::ConfigError;
pub use loading::{load_hierarchy, load_hierarchy_from, merge_configs};
pub use types::{DialogsConfig, LoggingConfig, PartytrackConfig};
pub use validation::{VALID_LOG_LEVELS, validate_config};

impl PartytrackConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }
}
