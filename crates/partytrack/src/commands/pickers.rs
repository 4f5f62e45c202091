use std::path::PathBuf;

use clap::ArgMatches;
use partytrack_config::PartytrackConfig;
use partytrack_dialogs::pickers::FileDialogRequest;
use partytrack_dialogs::{FolderBrowserRequest, OpenFileRequest, SaveFileRequest};
use tracing::info;

use super::helpers::{open_session, report_failure};

/// Shared open/save arguments layered over `base`.
fn file_request_from_matches(matches: &ArgMatches, base: FileDialogRequest) -> FileDialogRequest {
    FileDialogRequest {
        title: matches.get_one::<String>("title").cloned(),
        filter: matches.get_one::<String>("filter").cloned(),
        initial_directory: matches.get_one::<String>("dir").map(PathBuf::from),
        ..base
    }
}

fn print_paths(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}

pub(crate) fn handle_open_command(
    matches: &ArgMatches,
    config: &PartytrackConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.open_started");

    let session = open_session(config).map_err(|e| report_failure("open", e))?;

    let defaults = OpenFileRequest::new();
    let mut request = OpenFileRequest {
        file: file_request_from_matches(matches, defaults.file),
        multiselect: matches.get_flag("multi"),
    };

    let accepted = session
        .shell
        .controller()
        .show_open_file_dialog(&session.main_vm, &mut request)
        .map_err(|e| report_failure("open", e))?;

    if accepted {
        print_paths(&request.file.file_names);
    }

    info!(event = "cli.open_completed", accepted = accepted);
    Ok(())
}

pub(crate) fn handle_save_command(
    matches: &ArgMatches,
    config: &PartytrackConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.save_started");

    let session = open_session(config).map_err(|e| report_failure("save", e))?;

    let mut request = save_request_from_matches(matches);

    let accepted = session
        .shell
        .controller()
        .show_save_file_dialog(&session.main_vm, &mut request)
        .map_err(|e| report_failure("save", e))?;

    if accepted {
        print_paths(&request.file.file_names);
    }

    info!(event = "cli.save_completed", accepted = accepted);
    Ok(())
}

fn save_request_from_matches(matches: &ArgMatches) -> SaveFileRequest {
    let mut file = file_request_from_matches(matches, FileDialogRequest::default());
    file.default_ext = matches.get_one::<String>("default-ext").cloned();
    file.file_name = matches.get_one::<String>("file-name").map(PathBuf::from);

    SaveFileRequest {
        file,
        overwrite_prompt: !matches.get_flag("no-overwrite-prompt"),
    }
}

pub(crate) fn handle_folder_command(
    matches: &ArgMatches,
    config: &PartytrackConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.folder_started");

    let session = open_session(config).map_err(|e| report_failure("folder", e))?;

    let mut request = FolderBrowserRequest {
        description: matches.get_one::<String>("description").cloned(),
        root_directory: matches.get_one::<String>("dir").map(PathBuf::from),
        ..FolderBrowserRequest::new()
    };

    let accepted = session
        .shell
        .controller()
        .show_folder_browser_dialog(&session.main_vm, &mut request)
        .map_err(|e| report_failure("folder", e))?;

    if accepted
        && let Some(folder) = &request.selected_path
    {
        println!("{}", folder.display());
    }

    info!(event = "cli.folder_completed", accepted = accepted);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::build_cli;

    fn sub_matches(args: &[&str]) -> ArgMatches {
        let matches = build_cli().try_get_matches_from(args.iter().copied()).unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        sub.clone()
    }

    #[test]
    fn test_open_arguments_keep_open_defaults() {
        let matches = sub_matches(&["partytrack", "open", "--title", "Guest list", "--dir", "/srv"]);
        let request = file_request_from_matches(&matches, OpenFileRequest::new().file);

        assert_eq!(request.title.as_deref(), Some("Guest list"));
        assert_eq!(request.initial_directory, Some(PathBuf::from("/srv")));
        assert!(request.check_file_exists);
        assert!(request.filter.is_none());
    }

    #[test]
    fn test_save_arguments() {
        let matches = sub_matches(&[
            "partytrack",
            "save",
            "--default-ext",
            "csv",
            "--file-name",
            "attendance",
            "--no-overwrite-prompt",
        ]);
        let request = save_request_from_matches(&matches);

        assert_eq!(request.file.default_ext.as_deref(), Some("csv"));
        assert_eq!(request.file.file_name, Some(PathBuf::from("attendance")));
        assert!(!request.overwrite_prompt);
        assert!(request.file.add_extension);
    }
}
