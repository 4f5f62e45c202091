use clap::{Arg, Command};

pub fn message_command() -> Command {
    Command::new("message")
        .about("Show a message box and print the button pressed")
        .arg(
            Arg::new("text")
                .help("Message text")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("caption")
                .long("caption")
                .short('c')
                .help("Message box title")
                .default_value("partytrack"),
        )
        .arg(
            Arg::new("buttons")
                .long("buttons")
                .short('b')
                .help("Button set")
                .value_parser(["ok", "ok-cancel", "yes-no", "yes-no-cancel"])
                .default_value("ok"),
        )
        .arg(
            Arg::new("icon")
                .long("icon")
                .short('i')
                .help("Icon shown next to the text")
                .value_parser(["none", "info", "question", "warning", "error"])
                .default_value("none"),
        )
}

pub fn confirm_command() -> Command {
    Command::new("confirm")
        .about("Ask a yes/no question on the console and print the dialog result")
        .arg(
            Arg::new("text")
                .help("Question to ask")
                .required(true)
                .index(1),
        )
}
