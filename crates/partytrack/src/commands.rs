use clap::ArgMatches;
use partytrack_config::PartytrackConfig;
use tracing::{error, info};

mod helpers;
mod pickers;
mod prompts;

pub use helpers::load_config_with_warning;

pub fn run_command(
    matches: &ArgMatches,
    config: &PartytrackConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        event = "cli.command_started",
        command = matches.subcommand_name().unwrap_or("none")
    );

    match matches.subcommand() {
        Some(("open", sub_matches)) => pickers::handle_open_command(sub_matches, config),
        Some(("save", sub_matches)) => pickers::handle_save_command(sub_matches, config),
        Some(("folder", sub_matches)) => pickers::handle_folder_command(sub_matches, config),
        Some(("message", sub_matches)) => prompts::handle_message_command(sub_matches, config),
        Some(("confirm", sub_matches)) => prompts::handle_confirm_command(sub_matches, config),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
