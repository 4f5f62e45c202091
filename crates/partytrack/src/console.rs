//! View-models and console windows behind the CLI.

use std::io::{self, BufRead, Write};

use partytrack_dialogs::{DialogError, DialogResult, DialogWindow, ViewHandle, ViewModelTypeMap};
use tracing::debug;

/// View-model bound to the invisible main window of a CLI run.
pub struct MainViewModel;

/// A yes/no question.
pub struct ConfirmViewModel {
    pub question: String,
}

/// Terminal stand-in for a confirmation window. Reads one line from stdin.
pub struct ConsoleConfirmWindow {
    surface: ViewHandle,
}

impl Default for ConsoleConfirmWindow {
    fn default() -> Self {
        Self {
            surface: ViewHandle::window("confirm"),
        }
    }
}

impl DialogWindow for ConsoleConfirmWindow {
    fn surface(&self) -> &ViewHandle {
        &self.surface
    }

    fn show_modal(&mut self) -> DialogResult {
        let question = self
            .surface
            .data_context()
            .and_then(|context| context.downcast::<ConfirmViewModel>())
            .map(|vm| vm.question.clone())
            .unwrap_or_default();

        // stdout is reserved for the result.
        eprint!("{} [y/n] ", question);
        io::stderr().flush().ok();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => DialogResult::Unset,
            Ok(_) => parse_answer(&line),
            Err(e) => {
                debug!(event = "cli.confirm.read_failed", error = %e);
                DialogResult::Unset
            }
        }
    }

    fn can_open_windows(&self) -> bool {
        false
    }
}

/// `y`/`yes` accepts, `n`/`no` cancels, anything else leaves the result unset.
pub fn parse_answer(input: &str) -> DialogResult {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => DialogResult::Accepted,
        "n" | "no" => DialogResult::Cancelled,
        _ => DialogResult::Unset,
    }
}

/// Windows available to `show_dialog` in the CLI.
pub fn type_map() -> Result<ViewModelTypeMap, DialogError> {
    ViewModelTypeMap::builder()
        .map::<ConfirmViewModel, ConsoleConfirmWindow>()
        .build()
}
