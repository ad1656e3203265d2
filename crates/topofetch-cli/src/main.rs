use topofetch_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the
    // state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch. Individual download failures never surface
    // here; a non-zero exit means an environment-level error.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("topofetch error: {:#}", err);
        std::process::exit(1);
    }
}
