use partytrack_dialogs::init_logging;

mod app;
mod commands;
mod console;

fn main() {
    let app = app::build_cli();
    let matches = app.get_matches();

    let verbose = matches.get_flag("verbose");
    let quiet = !verbose;
    let config = commands::load_config_with_warning();
    init_logging(quiet, &config.logging);

    if let Err(e) = commands::run_command(&matches, &config) {
        // Already reported on stderr by the command handler.
        drop(e);
        std::process::exit(1);
    }
}
