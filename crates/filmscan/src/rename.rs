//! Batch renamer for numbered scan files.
//!
//! Scanner software names frames like `04110nnn.jpg`. Files sharing a prefix
//! are renamed to `<label>-nnn.<ext>`, keeping the trailing frame number or,
//! in reverse mode, numbering them backwards (for rolls scanned last frame
//! first).

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Number of trailing stem characters kept as the frame number.
pub const FRAME_DIGITS: usize = 3;

#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Failed to read directory {}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to rename {from} -> {to}")]
    Rename {
        from: String,
        to: String,
        #[source]
        source: io::Error,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, RenameError>;

/// How the number in the new name is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameMode {
    /// Keep the last three characters of the old stem.
    Keep,
    /// Count down from the number of matched files to 1.
    Reverse,
}

/// One rename, by file name within the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamePlan {
    pub from: String,
    pub to: String,
}

/// Split at the last `.`: `"a.tar.gz"` gives `("a.tar", Some("gz"))`.
pub fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (name, None),
    }
}

/// Last `n` characters of `s`, or all of it when shorter.
fn tail_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    let start = s
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    &s[start..]
}

fn new_name(label: &str, number: &str, ext: Option<&str>) -> String {
    match ext {
        Some(ext) => format!("{}-{}.{}", label, number, ext),
        None => format!("{}-{}", label, number),
    }
}

/// Regular files in `dir` whose name starts with `prefix`, sorted.
pub fn matching_files(dir: &Path, prefix: &str) -> Result<Vec<String>> {
    let read_err = |source| RenameError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let walker = WalkDir::new(dir).min_depth(1).max_depth(1);

    let mut names = Vec::new();
    for entry in walker {
        let entry = entry.map_err(read_err)?;
        if !entry.path().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            debug!(name = ?entry.file_name(), "skipping non UTF-8 file name");
            continue;
        };
        if name.starts_with(prefix) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Compute new names for `names`, which must already be sorted.
/// Files whose name would not change are left out.
pub fn plan_renames(names: &[String], label: &str, mode: RenameMode) -> Vec<RenamePlan> {
    let count = names.len();
    names
        .iter()
        .enumerate()
        .map(|(pos, name)| {
            let (stem, ext) = split_name(name);
            let to = match mode {
                RenameMode::Keep => new_name(label, tail_chars(stem, FRAME_DIGITS), ext),
                RenameMode::Reverse => {
                    let index = count - pos;
                    new_name(label, &format!("{:0width$}", index, width = FRAME_DIGITS), ext)
                }
            };
            RenamePlan {
                from: name.clone(),
                to,
            }
        })
        .filter(|plan| plan.from != plan.to)
        .collect()
}

/// Apply renames in order. An existing destination is overwritten.
/// Stops at the first failure; earlier renames stay applied.
pub fn apply<F>(dir: &Path, plans: &[RenamePlan], mut on_rename: F) -> Result<usize>
where
    F: FnMut(&RenamePlan),
{
    for plan in plans {
        on_rename(plan);
        fs::rename(dir.join(&plan.from), dir.join(&plan.to)).map_err(|source| {
            RenameError::Rename {
                from: plan.from.clone(),
                to: plan.to.clone(),
                source,
            }
        })?;
        debug!(from = %plan.from, to = %plan.to, "renamed");
    }
    info!(count = plans.len(), dir = %dir.display(), "renames applied");
    Ok(plans.len())
}
