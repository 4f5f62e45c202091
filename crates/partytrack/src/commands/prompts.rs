use std::rc::Rc;

use clap::ArgMatches;
use partytrack_config::PartytrackConfig;
use partytrack_dialogs::{MessageBoxButtons, MessageBoxIcon, ViewModelRef};
use tracing::info;

use super::helpers::{open_session, report_failure};
use crate::console::ConfirmViewModel;

pub(crate) fn handle_message_command(
    matches: &ArgMatches,
    config: &PartytrackConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = matches
        .get_one::<String>("text")
        .ok_or("Message text is required")?;
    let caption = matches
        .get_one::<String>("caption")
        .map(String::as_str)
        .unwrap_or("partytrack");
    let buttons = matches
        .get_one::<String>("buttons")
        .map(|s| s.parse::<MessageBoxButtons>())
        .transpose()?
        .unwrap_or_default();
    let icon = matches
        .get_one::<String>("icon")
        .map(|s| s.parse::<MessageBoxIcon>())
        .transpose()?
        .unwrap_or_default();

    info!(event = "cli.message_started", buttons = ?buttons, icon = ?icon);

    let session = open_session(config).map_err(|e| report_failure("message", e))?;
    let result = session
        .shell
        .controller()
        .show_message_box(&session.main_vm, text, caption, buttons, icon)
        .map_err(|e| report_failure("message", e))?;

    println!("{}", result);

    info!(event = "cli.message_completed", result = %result);
    Ok(())
}

pub(crate) fn handle_confirm_command(
    matches: &ArgMatches,
    config: &PartytrackConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let question = matches
        .get_one::<String>("text")
        .ok_or("Question text is required")?;

    info!(event = "cli.confirm_started");

    let session = open_session(config).map_err(|e| report_failure("confirm", e))?;
    let payload = ViewModelRef::new(Rc::new(ConfirmViewModel {
        question: question.clone(),
    }));

    let result = session
        .shell
        .controller()
        .show_dialog(&session.main_vm, &payload)
        .map_err(|e| report_failure("confirm", e))?;

    println!("{}", result);

    info!(event = "cli.confirm_completed", result = %result);
    Ok(())
}
