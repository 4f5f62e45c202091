use std::error::Error;

/// Base trait for all application errors
pub trait PartytrackError: Error + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

impl PartytrackError for partytrack_config::ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            partytrack_config::ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            partytrack_config::ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            partytrack_config::ConfigError::PathError { .. } => "CONFIG_PATH_ERROR",
            partytrack_config::ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            partytrack_config::ConfigError::ConfigParseError { .. }
                | partytrack_config::ConfigError::InvalidConfiguration { .. }
        )
    }
}
