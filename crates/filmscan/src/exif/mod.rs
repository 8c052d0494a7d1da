//! Metadata tagger: stamp camera, lens, film and capture data onto scans.
//!
//! Tagging is delegated to exiftool. This module only decides which tags
//! each file gets:
//! - [`ExifOptions`] resolves table indices into tag values shared by the batch
//! - [`ShotClock`] gives every file its own capture time
//! - [`plan`] turns a [`TagRequest`] into one [`Invocation`] per file
//! - [`execute`] runs them in order through a [`CommandRunner`]

mod clock;
mod options;
mod runner;

pub use clock::{ClockParseError, ClockTime, ShotClock, ShotDate, DEFAULT_START};
pub use options::ExifOptions;
pub use runner::{
    execute, CommandRunner, CommandStatus, DryRunRunner, FileOutcome, Invocation, Outcome,
    ProcessRunner, TagReport, OVERWRITE_FLAG,
};

use filmscan_catalog::CatalogError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Everything the user asked for, before table lookup.
///
/// Index and numeric fields treat `Some(0)` the same as `None`.
#[derive(Debug, Clone, Default)]
pub struct TagRequest {
    pub camera: Option<u32>,
    pub lens: Option<u32>,
    pub film: Option<u32>,
    pub iso: Option<u32>,
    pub aperture: Option<f64>,
    pub date: Option<ShotDate>,
    /// Ignored without a date.
    pub time: Option<ClockTime>,
    pub files: Vec<PathBuf>,
}

#[derive(Error, Debug)]
pub enum TagError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("No input files given")]
    NoFiles,
}

/// Build the exiftool invocation for every file, in the order given.
pub fn plan(request: &TagRequest, program: &Path) -> Result<Vec<Invocation>, TagError> {
    if request.files.is_empty() {
        return Err(TagError::NoFiles);
    }

    let options = ExifOptions::resolve(request)?;
    let shared = options.args();
    let mut clock = request
        .date
        .map(|date| ShotClock::new(date, request.time.unwrap_or_default()));
    if options.is_empty() && clock.is_none() {
        warn!("no tags requested; exiftool will only rewrite the files");
    }

    let invocations = request
        .files
        .iter()
        .map(|file| {
            let mut args = Vec::with_capacity(shared.len() + 3);
            args.push(OVERWRITE_FLAG.to_string());
            args.extend(shared.iter().cloned());
            if let Some(clock) = clock.as_mut() {
                args.extend(clock.next_args());
            }
            Invocation {
                program: program.to_path_buf(),
                args,
                file: file.clone(),
            }
        })
        .collect();

    Ok(invocations)
}
