//! photo-rename: renumber scan files sharing a prefix

use clap::Parser;
use filmscan::cli;
use filmscan_logging::{init_logging, LogConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::rename::RenameArgs::parse();
    let json_mode = args.json;
    let _log_guard = init_logging(LogConfig {
        app_name: "photo-rename",
        verbose: args.verbose,
    });

    match cli::rename::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            cli::error::report(&err, json_mode);
            ExitCode::from(1)
        }
    }
}
