mod global;
mod pickers;
mod prompts;


use clap::Command;

pub fn build_cli() -> Command {
    global::root_command()
        .subcommand(pickers::open_command())
        .subcommand(pickers::save_command())
        .subcommand(pickers::folder_command())
        .subcommand(prompts::message_command())
        .subcommand(prompts::confirm_command())
}
