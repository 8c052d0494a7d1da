//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use filmscan_catalog::CatalogError;
use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    /// Create a new helpful error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add multiple suggestions
    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// Table index outside the camera/lens/film table
    pub fn unknown_index(err: &CatalogError) -> Self {
        let (flag, table) = match err {
            CatalogError::UnknownCamera { .. } => ("--camera", "cameras"),
            CatalogError::UnknownLens { .. } => ("--lens", "lenses"),
            CatalogError::UnknownFilm { .. } => ("--film", "films"),
        };
        Self::new(err.to_string())
            .with_context("No file was tagged")
            .with_suggestions([
                format!("TRY: List the known {}: photo-exif {} h", table, flag),
                format!("TRY: Pass {} 0 or leave it out to skip this field", flag),
            ])
    }

    /// Tagging requested without files
    pub fn no_input_files() -> Self {
        Self::new("No input files given")
            .with_context("photo-exif tags the files named after the options")
            .with_suggestions([
                "TRY: photo-exif -c 1 -l 2 -f 3 scan-001.jpg scan-002.jpg",
                "TRY: Use a shell glob to tag a whole roll: photo-exif -f 3 roll7-*.jpg",
            ])
    }

    /// Working directory cannot be listed
    pub fn directory_unreadable(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot read directory: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                format!("TRY: Check that the directory exists: ls -la {}", path.display()),
                "TRY: Verify you have read permissions for this directory".to_string(),
            ])
    }

    /// Nothing in the directory carries the prefix
    pub fn no_matching_files(path: &Path, prefix: &str) -> Self {
        Self::new(format!("No files starting with '{}'", prefix))
            .with_context(format!("Looked in {}", path.display()))
            .with_suggestions([
                format!("TRY: ls {}", path.display()),
                "TRY: Prefixes are case sensitive".to_string(),
            ])
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Print a command failure the way the user asked for output.
pub fn report(err: &anyhow::Error, json: bool) {
    if json {
        print_json_error(err);
    } else if let Some(helpful) = err.downcast_ref::<HelpfulError>() {
        eprint!("{}", helpful);
    } else {
        eprintln!("{:?}", err);
    }
}

/// Print an error as a JSON object on stdout.
pub fn print_json_error(err: &anyhow::Error) {
    let value = match err.downcast_ref::<HelpfulError>() {
        Some(helpful) => serde_json::json!({
            "error": {
                "message": helpful.message,
                "context": helpful.context,
                "suggestions": helpful.suggestions,
            }
        }),
        None => serde_json::json!({
            "error": {
                "message": format!("{:#}", err),
                "context": null,
                "suggestions": [],
            }
        }),
    };
    println!("{}", value);
}
