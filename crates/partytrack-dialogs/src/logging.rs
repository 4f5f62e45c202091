use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use partytrack_config::LoggingConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level; `quiet` limits
/// output to errors. Events go to stderr, or appended to the configured log
/// file. Calling this twice keeps the first subscriber.
pub fn init_logging(quiet: bool, config: &LoggingConfig) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level()))
    };

    let file = config.file().and_then(|path| match open_log_file(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
            None
        }
    });

    let registry = tracing_subscriber::registry().with(filter);

    // Each arm builds a different layer type.
    let installed = match (file, config.json()) {
        (Some(file), true) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_target(false),
            )
            .try_init(),
        (Some(file), false) => registry
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_target(false),
            )
            .try_init(),
        (None, true) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
        (None, false) => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(
            event = "dialogs.logging.init_completed",
            quiet = quiet,
            json = config.json()
        );
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
