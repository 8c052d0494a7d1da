//! Per-file exiftool invocations and the loop that runs them.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Tells exiftool to rewrite the file instead of keeping a `_original` copy.
pub const OVERWRITE_FLAG: &str = "-overwrite_original";

/// One exiftool call against a single file.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub file: PathBuf,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        write!(f, " {}", shell_quote(&self.file.to_string_lossy()))
    }
}

/// Quote a word for display so the echoed line can be pasted into a shell.
fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=+./:,@%".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Exit code of a finished command; `None` when killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub code: Option<i32>,
}

impl CommandStatus {
    pub const SUCCESS: Self = Self { code: Some(0) };

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an invocation to completion.
pub trait CommandRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<CommandStatus>;
}

/// Spawns the real program. Stdio is inherited so exiftool's own messages
/// reach the user unchanged.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<CommandStatus> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .arg(&invocation.file)
            .status()?;
        Ok(CommandStatus {
            code: status.code(),
        })
    }
}

/// Pretends every invocation succeeded.
#[derive(Debug, Default)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&mut self, _invocation: &Invocation) -> io::Result<CommandStatus> {
        Ok(CommandStatus::SUCCESS)
    }
}

/// Result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed { code: Option<i32> },
    SpawnFailed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub file: PathBuf,
    pub outcome: Outcome,
}

/// Outcomes of a whole batch, in file order.
#[derive(Debug, Clone, Default)]
pub struct TagReport {
    pub files: Vec<FileOutcome>,
}

impl TagReport {
    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn succeeded(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome == Outcome::Succeeded)
            .count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files
            .iter()
            .filter(|f| f.outcome != Outcome::Succeeded)
    }
}

/// Run every invocation in order. A failing file is logged and recorded;
/// the loop always continues with the next one.
pub fn execute<R, F>(invocations: &[Invocation], runner: &mut R, mut echo: F) -> TagReport
where
    R: CommandRunner + ?Sized,
    F: FnMut(&Invocation),
{
    let mut report = TagReport::default();

    for invocation in invocations {
        echo(invocation);
        let outcome = match runner.run(invocation) {
            Ok(status) if status.success() => {
                debug!(file = %invocation.file.display(), "tagged");
                Outcome::Succeeded
            }
            Ok(status) => {
                warn!(
                    file = %invocation.file.display(),
                    code = ?status.code,
                    "{} exited with failure",
                    program_name(&invocation.program)
                );
                Outcome::Failed { code: status.code }
            }
            Err(err) => {
                warn!(
                    file = %invocation.file.display(),
                    "failed to start {}: {}",
                    program_name(&invocation.program),
                    err
                );
                Outcome::SpawnFailed {
                    error: err.to_string(),
                }
            }
        };
        report.files.push(FileOutcome {
            file: invocation.file.clone(),
            outcome,
        });
    }

    info!(
        total = report.total(),
        succeeded = report.succeeded(),
        "batch finished"
    );
    report
}

fn program_name(program: &Path) -> String {
    program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned results and records what it was asked to run.
    struct ScriptedRunner {
        results: VecDeque<io::Result<CommandStatus>>,
        seen: Vec<PathBuf>,
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&mut self, invocation: &Invocation) -> io::Result<CommandStatus> {
            self.seen.push(invocation.file.clone());
            self.results
                .pop_front()
                .unwrap_or(Ok(CommandStatus::SUCCESS))
        }
    }

    fn invocation(file: &str) -> Invocation {
        Invocation {
            program: PathBuf::from("exiftool"),
            args: vec![OVERWRITE_FLAG.to_string()],
            file: PathBuf::from(file),
        }
    }

    #[test]
    fn test_display_quotes_spaces() {
        let inv = Invocation {
            program: PathBuf::from("exiftool"),
            args: vec![
                OVERWRITE_FLAG.to_string(),
                "-Make=Leica".to_string(),
                "-Model=Leica M7".to_string(),
                "-HierarchicalSubject+=Film|Kodak TRI-X 400".to_string(),
            ],
            file: PathBuf::from("roll 1/it's.jpg"),
        };
        assert_eq!(
            inv.to_string(),
            "exiftool -overwrite_original -Make=Leica '-Model=Leica M7' \
             '-HierarchicalSubject+=Film|Kodak TRI-X 400' 'roll 1/it'\\''s.jpg'"
        );
    }

    #[test]
    fn test_failures_do_not_stop_batch() {
        let mut runner = ScriptedRunner {
            results: VecDeque::from([
                Ok(CommandStatus { code: Some(1) }),
                Err(io::Error::new(io::ErrorKind::NotFound, "no exiftool")),
                Ok(CommandStatus::SUCCESS),
            ]),
            seen: Vec::new(),
        };
        let invocations = [invocation("a.jpg"), invocation("b.jpg"), invocation("c.jpg")];
        let mut echoed = 0;
        let report = execute(&invocations, &mut runner, |_| echoed += 1);

        assert_eq!(echoed, 3);
        assert_eq!(runner.seen.len(), 3);
        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.files[0].outcome, Outcome::Failed { code: Some(1) });
        assert!(matches!(
            report.files[1].outcome,
            Outcome::SpawnFailed { .. }
        ));
        assert_eq!(report.failed().count(), 2);
    }

    #[test]
    fn test_dry_run_succeeds() {
        let invocations = [invocation("a.jpg")];
        let report = execute(&invocations, &mut DryRunRunner, |_| {});
        assert_eq!(report.succeeded(), 1);
    }
}
