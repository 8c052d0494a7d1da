//! `photo-exif` command - set EXIF tags on scanned photos/negatives

use anyhow::Result;
use clap::Parser;
use filmscan_catalog::{cameras, films, lenses};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

use crate::cli::error::HelpfulError;
use crate::cli::output::{format_count, print_json, print_table};
use crate::exif::{
    self, ClockTime, CommandRunner, DryRunRunner, ProcessRunner, ShotDate, TagError, TagRequest,
};

/// Value of a table flag: an index, or the help index that lists the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    List,
    Index(u32),
}

impl Selector {
    fn index(self) -> Option<u32> {
        match self {
            Selector::List => None,
            Selector::Index(idx) => Some(idx),
        }
    }
}

impl FromStr for Selector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "h" | "help" | "list" => Ok(Selector::List),
            other => other
                .parse()
                .map(Selector::Index)
                .map_err(|_| format!("expected an index or 'h', got '{}'", other)),
        }
    }
}

fn parse_aperture(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid aperture '{}'", s))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("aperture must be a positive number, got '{}'", s));
    }
    Ok(value)
}

/// Arguments for `photo-exif`
#[derive(Parser, Debug)]
#[command(
    name = "photo-exif",
    about = "Munge EXIF data of scanned negatives using exiftool",
    after_help = "Table flags take `h` instead of an index to list the table, e.g. `photo-exif -f h`."
)]
pub struct ExifArgs {
    /// Set camera make and model (`h` lists cameras)
    #[arg(short = 'c', long, value_name = "N|h")]
    pub camera: Option<Selector>,

    /// Set lens and focal length (`h` lists lenses)
    #[arg(short = 'l', long, value_name = "N|h")]
    pub lens: Option<Selector>,

    /// Set film and ISO (`h` lists films)
    #[arg(short = 'f', long, value_name = "N|h")]
    pub film: Option<Selector>,

    /// Override the film ISO
    #[arg(short = 'i', long)]
    pub iso: Option<u32>,

    /// Aperture, e.g. 5.6
    #[arg(short = 'a', long, value_parser = parse_aperture)]
    pub aperture: Option<f64>,

    /// Capture date: YYYY:MM:DD
    #[arg(short = 'd', long)]
    pub date: Option<ShotDate>,

    /// Start time: HH:MM (incremented by a minute per file, default 12:00)
    #[arg(short = 't', long)]
    pub time: Option<ClockTime>,

    /// Print the exiftool commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Print table listings as JSON
    #[arg(long)]
    pub json: bool,

    /// exiftool executable
    #[arg(long, env = "FILMSCAN_EXIFTOOL", default_value = "exiftool")]
    pub exiftool: PathBuf,

    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Files to tag
    pub files: Vec<PathBuf>,
}

/// Which reference table to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Cameras,
    Lenses,
    Films,
}

impl ExifArgs {
    /// First help index in camera, lens, film order.
    pub fn listing(&self) -> Option<Listing> {
        [
            (self.camera, Listing::Cameras),
            (self.lens, Listing::Lenses),
            (self.film, Listing::Films),
        ]
        .into_iter()
        .find(|(sel, _)| *sel == Some(Selector::List))
        .map(|(_, listing)| listing)
    }

    pub fn to_request(&self) -> TagRequest {
        TagRequest {
            camera: self.camera.and_then(Selector::index),
            lens: self.lens.and_then(Selector::index),
            film: self.film.and_then(Selector::index),
            iso: self.iso,
            aperture: self.aperture,
            date: self.date,
            time: self.time,
            files: self.files.clone(),
        }
    }
}

#[derive(Serialize)]
struct Listed<'a, T: Serialize> {
    index: u32,
    #[serde(flatten)]
    entry: &'a T,
}

/// Print one reference table, as a text table or JSON.
pub fn print_listing(listing: Listing, json: bool) -> Result<()> {
    match listing {
        Listing::Cameras => {
            if json {
                let rows: Vec<_> = cameras().map(|(index, entry)| Listed { index, entry }).collect();
                return print_json(&rows);
            }
            println!("Supported Camera Models:");
            let rows = cameras()
                .map(|(idx, c)| vec![idx.to_string(), c.make.to_string(), c.model.to_string()])
                .collect();
            print_table(&["Index", "Manufacturer", "Model"], rows);
        }
        Listing::Lenses => {
            if json {
                let rows: Vec<_> = lenses().map(|(index, entry)| Listed { index, entry }).collect();
                return print_json(&rows);
            }
            println!("Supported Lens Models:");
            let rows = lenses()
                .map(|(idx, l)| {
                    let focal = l
                        .focal_length
                        .map(|mm| format!("{} mm", mm))
                        .unwrap_or_else(|| "unknown".to_string());
                    vec![idx.to_string(), l.description.to_string(), focal]
                })
                .collect();
            print_table(&["Index", "Lens", "Focal length"], rows);
        }
        Listing::Films => {
            if json {
                let rows: Vec<_> = films().map(|(index, entry)| Listed { index, entry }).collect();
                return print_json(&rows);
            }
            println!("Supported Films:");
            let rows = films()
                .map(|(idx, f)| {
                    vec![
                        idx.to_string(),
                        f.iso.to_string(),
                        f.description.to_string(),
                        f.inscription.to_string(),
                    ]
                })
                .collect();
            print_table(&["Index", "ISO", "Description", "Inscription"], rows);
        }
    }
    Ok(())
}

fn helpful(err: TagError) -> anyhow::Error {
    match err {
        TagError::Catalog(ref catalog) => HelpfulError::unknown_index(catalog).into(),
        TagError::NoFiles => HelpfulError::no_input_files().into(),
    }
}

/// Run `photo-exif`.
pub fn run(args: ExifArgs) -> Result<()> {
    if let Some(listing) = args.listing() {
        return print_listing(listing, args.json);
    }

    let request = args.to_request();
    let invocations = exif::plan(&request, &args.exiftool).map_err(helpful)?;
    info!(
        files = invocations.len(),
        program = %args.exiftool.display(),
        dry_run = args.dry_run,
        "tagging"
    );

    let mut runner: Box<dyn CommandRunner> = if args.dry_run {
        Box::new(DryRunRunner)
    } else {
        Box::new(ProcessRunner)
    };
    let report = exif::execute(&invocations, runner.as_mut(), |inv| println!("{}", inv));

    if args.dry_run {
        println!("Dry run: {} not tagged", format_count(report.total(), "file"));
        return Ok(());
    }

    let failed: Vec<_> = report.failed().collect();
    if failed.is_empty() {
        println!("Tagged {}", format_count(report.succeeded(), "file"));
    } else {
        println!(
            "Tagged {} of {}; {} failed",
            report.succeeded(),
            format_count(report.total(), "file"),
            failed.len()
        );
    }
    Ok(())
}
