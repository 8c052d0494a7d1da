//! photo-exif: set EXIF tags for scanned photos/negatives using exiftool

use clap::Parser;
use filmscan::cli;
use filmscan_logging::{init_logging, LogConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::exif::ExifArgs::parse();
    let json_mode = args.json;
    let _log_guard = init_logging(LogConfig {
        app_name: "photo-exif",
        verbose: args.verbose,
    });

    match cli::exif::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            cli::error::report(&err, json_mode);
            ExitCode::from(1)
        }
    }
}
