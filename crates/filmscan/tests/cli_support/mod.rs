#![allow(dead_code)]

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn photo_exif_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_photo-exif"))
}

pub fn photo_rename_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_photo-rename"))
}

/// Run a binary inside `cwd` with an isolated FILMSCAN_HOME.
pub fn run_in(bin: &Path, cwd: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let home = TempDir::new().expect("create temp home");
    let mut cmd = Command::new(bin);
    cmd.args(args)
        .current_dir(cwd)
        .env("FILMSCAN_HOME", home.path())
        .env("RUST_LOG", "error")
        .env_remove("FILMSCAN_EXIFTOOL");
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("failed to execute filmscan CLI")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn assert_cli_success(output: &Output, args: &[&str]) {
    assert!(
        output.status.success(),
        "command failed: {}\nstdout:\n{}\nstderr:\n{}",
        args.join(" "),
        stdout(output),
        stderr(output)
    );
}

pub fn assert_cli_failure(output: &Output, args: &[&str]) {
    assert!(
        !output.status.success(),
        "command unexpectedly succeeded: {}\nstdout:\n{}\nstderr:\n{}",
        args.join(" "),
        stdout(output),
        stderr(output)
    );
}

pub fn parse_json<T: DeserializeOwned>(output: &Output) -> T {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|err| {
        panic!(
            "failed to parse JSON output: {}\nstdout:\n{}\nstderr:\n{}",
            err,
            stdout(output),
            stderr(output)
        )
    })
}

/// Sorted file names in `dir`.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// A stand-in for exiftool that appends its argv, one argument per line and
/// a `---` line per call, to the file named by `FAKE_EXIFTOOL_LOG`. Exits
/// with `FAKE_EXIFTOOL_EXIT` (default 0).
#[cfg(unix)]
pub fn fake_exiftool(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-exiftool");
    std::fs::write(
        &path,
        "#!/bin/sh\n\
         for arg in \"$@\"; do printf '%s\\n' \"$arg\" >> \"$FAKE_EXIFTOOL_LOG\"; done\n\
         printf -- '---\\n' >> \"$FAKE_EXIFTOOL_LOG\"\n\
         exit \"${FAKE_EXIFTOOL_EXIT:-0}\"\n",
    )
    .expect("write fake exiftool");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod fake exiftool");
    path
}

/// Argument lists recorded by [`fake_exiftool`], one per call.
pub fn recorded_calls(log: &Path) -> Vec<Vec<String>> {
    let Ok(text) = std::fs::read_to_string(log) else {
        return Vec::new();
    };
    let mut calls = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line == "---" {
            calls.push(std::mem::take(&mut current));
        } else {
            current.push(line.to_string());
        }
    }
    calls
}
