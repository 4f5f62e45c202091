use clap::{Arg, ArgAction, Command};

fn title_arg() -> Arg {
    Arg::new("title")
        .long("title")
        .short('t')
        .help("Picker window title")
}

fn filter_arg() -> Arg {
    Arg::new("filter")
        .long("filter")
        .help("File filter, e.g. \"CSV files|*.csv|All files|*.*\"")
}

fn dir_arg() -> Arg {
    Arg::new("dir")
        .long("dir")
        .short('d')
        .help("Directory the picker starts in")
}

pub fn open_command() -> Command {
    Command::new("open")
        .about("Pick one or more existing files")
        .arg(title_arg())
        .arg(filter_arg())
        .arg(dir_arg())
        .arg(
            Arg::new("multi")
                .long("multi")
                .short('m')
                .help("Allow selecting several files")
                .action(ArgAction::SetTrue),
        )
}

pub fn save_command() -> Command {
    Command::new("save")
        .about("Pick a file name to save to")
        .arg(title_arg())
        .arg(filter_arg())
        .arg(dir_arg())
        .arg(
            Arg::new("default-ext")
                .long("default-ext")
                .help("Extension appended when the chosen name has none"),
        )
        .arg(
            Arg::new("file-name")
                .long("file-name")
                .help("Initial file name"),
        )
        .arg(
            Arg::new("no-overwrite-prompt")
                .long("no-overwrite-prompt")
                .help("Do not ask before overwriting an existing file")
                .action(ArgAction::SetTrue),
        )
}

pub fn folder_command() -> Command {
    Command::new("folder")
        .about("Pick a folder")
        .arg(
            Arg::new("description")
                .long("description")
                .help("Text shown in the folder picker"),
        )
        .arg(dir_arg())
}
