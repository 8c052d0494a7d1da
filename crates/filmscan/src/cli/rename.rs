//! `photo-rename` command - renumber scan files by prefix
//!
//! Rename `<prefix><anything>nnn.<ext>` to `<label>-nnn.<ext>`.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use crate::cli::error::HelpfulError;
use crate::cli::output::{format_count, print_json};
use crate::rename::{self, RenameError, RenameMode};

/// Arguments for `photo-rename`
#[derive(Parser, Debug)]
#[command(
    name = "photo-rename",
    about = "Rename <prefix>...nnn.<ext> scan files to <label>-nnn.<ext>"
)]
pub struct RenameArgs {
    /// Leading part of the file names to rename
    pub prefix: String,

    /// Replacement, e.g. <camera>-<film number>
    pub label: String,

    /// Any value here numbers the files backwards, like --reverse
    pub reverse_trigger: Option<String>,

    /// Number files from the count of matches down to 1
    #[arg(short = 'r', long)]
    pub reverse: bool,

    /// Directory holding the scans
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Show the renames without applying them
    #[arg(long)]
    pub dry_run: bool,

    /// Output the rename plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl RenameArgs {
    pub fn mode(&self) -> RenameMode {
        if self.reverse || self.reverse_trigger.is_some() {
            RenameMode::Reverse
        } else {
            RenameMode::Keep
        }
    }
}

/// Run `photo-rename`.
pub fn run(args: RenameArgs) -> Result<()> {
    let names = rename::matching_files(&args.dir, &args.prefix).map_err(|err| match err {
        RenameError::ReadDir { ref path, ref source } => {
            HelpfulError::directory_unreadable(path, &source.to_string()).into()
        }
        other => anyhow::Error::new(other),
    })?;

    if names.is_empty() {
        return Err(HelpfulError::no_matching_files(&args.dir, &args.prefix).into());
    }

    let mode = args.mode();
    let plans = rename::plan_renames(&names, &args.label, mode);
    info!(
        matched = names.len(),
        renames = plans.len(),
        ?mode,
        dir = %args.dir.display(),
        "rename plan"
    );

    if args.json {
        print_json(&plans)?;
    }

    if args.dry_run {
        if !args.json {
            for plan in &plans {
                println!("rename {} -> {}", plan.from, plan.to);
            }
            println!("Dry run: {} not applied", format_count(plans.len(), "rename"));
        }
        return Ok(());
    }

    let echo = !args.json;
    let count = rename::apply(&args.dir, &plans, |plan| {
        if echo {
            println!("rename {} -> {}", plan.from, plan.to);
        }
    })?;

    if echo {
        println!("Renamed {}", format_count(count, "file"));
    }
    Ok(())
}
