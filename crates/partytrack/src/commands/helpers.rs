use std::rc::Rc;

use partytrack_config::PartytrackConfig;
use partytrack_dialogs::{
    AppShell, DialogError, PartytrackError, RfdDialogs, ViewHandle, ViewModelRef,
};
use tracing::{error, warn};

use crate::console::{self, MainViewModel};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub fn load_config_with_warning() -> PartytrackConfig {
    match PartytrackConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.partytrack/config.toml and ./.partytrack/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                code = e.error_code(),
                error = %e
            );
            PartytrackConfig::default()
        }
    }
}

/// A running shell with its main window open.
pub(crate) struct Session {
    pub shell: AppShell,
    pub main_vm: ViewModelRef,
}

pub(crate) fn open_session(config: &PartytrackConfig) -> Result<Session, DialogError> {
    let mut shell = AppShell::new(
        console::type_map()?,
        Box::new(RfdDialogs::new()),
        config.dialogs.clone(),
    );

    let main_vm = ViewModelRef::new(Rc::new(MainViewModel));
    shell.open_main_window(ViewHandle::window("partytrack"), main_vm.clone());

    Ok(Session { shell, main_vm })
}

/// Print a dialog failure with its error code and turn it into the command
/// error.
pub(crate) fn report_failure(command: &str, e: DialogError) -> Box<dyn std::error::Error> {
    eprintln!("❌ {} failed [{}]: {}", command, e.error_code(), e);
    error!(
        event = "cli.command_failed",
        command = command,
        code = e.error_code(),
        error = %e
    );
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_main_view_model_owns_dialogs() {
        let session = open_session(&PartytrackConfig::default()).unwrap();
        let controller = session.shell.controller();

        let owner = controller
            .resolver()
            .find_owner_window(&session.main_vm)
            .unwrap();
        assert_eq!(owner.name(), "partytrack");
        assert_eq!(session.shell.registry().len(), 1);
    }
}
