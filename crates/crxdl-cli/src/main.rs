use crxdl_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Log file under the XDG state dir; stderr if that is not writable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = Cli::run_from_args() {
        eprintln!("crxdl error: {:#}", err);
        std::process::exit(1);
    }
}
