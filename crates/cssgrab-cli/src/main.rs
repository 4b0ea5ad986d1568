use clap::Parser;
use cssgrab_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Log file under the XDG state dir; stderr when that is unusable.
    if let Err(e) = logging::init_logging(cli.verbose) {
        logging::init_logging_stderr(cli.verbose);
        tracing::warn!("log file unavailable: {:#}", e);
    }

    if let Err(err) = cli.run() {
        eprintln!("cssgrab error: {:#}", err);
        std::process::exit(1);
    }
}
