use clap::{Arg, ArgAction, Command};

pub fn root_command() -> Command {
    Command::new("partytrack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Show message boxes and file pickers from the terminal")
        .long_about("partytrack opens native message boxes, file pickers and folder pickers through the same dialog service the partytrack views use, and prints the user's choice on stdout.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
}
