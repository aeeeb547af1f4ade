use uif_core::logging;

mod cli;

fn main() {
    // Initialize logging as early as possible.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Errors are printed; the exit code stays 0.
    if let Err(err) = cli::run_from_args() {
        tracing::error!("{:#}", err);
        eprintln!("uif error: {:#}", err);
    }
}
