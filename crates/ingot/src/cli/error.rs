//! Helpful error types for the CLI
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use ingot::{FormatTag, LoadError};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug, Serialize)]
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

    /// Configuration file does not exist
    pub fn config_not_found(path: &Path) -> Self {
        Self::new(format!("Config file not found: {}", path.display()))
            .with_context("Ingot reads its data sources from a TOML config file")
            .with_suggestions([
                "TRY: Create config.toml with a [\"DATA SOURCE\"] section".to_string(),
                "TRY: Set DataSource1 and DataSource2 to a file or directory path".to_string(),
                "TRY: Point to another file: ingot --config path/to/config.toml".to_string(),
            ])
    }

    /// Configured path does not exist
    pub fn path_not_found(path: &Path) -> Self {
        Self::new(format!("Path not found: {}", path.display()))
            .with_context("A configured data source is neither a file nor a directory")
            .with_suggestions([
                format!("TRY: Check that the path exists: ls -la {}", path.display()),
                "TRY: Relative paths are resolved against the working directory".to_string(),
                "TRY: Check for typos in DataSource1 / DataSource2".to_string(),
            ])
    }

    /// Directory has no file with the expected suffix
    pub fn empty_directory(dir: &Path, format: FormatTag) -> Self {
        Self::new(format!("No {} files in directory: {}", format, dir.display()))
            .with_context(format!(
                "Only files whose names end with '{}' are read from a directory",
                format.suffix()
            ))
            .with_suggestions([
                format!("TRY: List the directory: ls {}", dir.display()),
                "TRY: Set Format1 / Format2 if the directory holds another format".to_string(),
            ])
    }

    /// Format name not recognized
    pub fn unsupported_format(name: &str) -> Self {
        Self::new(format!("Unsupported format: {}", name))
            .with_context("Format1 / Format2 must name a supported format")
            .with_suggestions([format!(
                "TRY: Supported formats: {}",
                FormatTag::ALL
                    .iter()
                    .map(|tag| String::from(*tag))
                    .collect::<Vec<_>>()
                    .join(", ")
            )])
    }

    /// File could not be parsed in its declared format
    pub fn parse_error(path: &Path, format: FormatTag, details: &str) -> Self {
        Self::new(format!("{} parse error: {}", format, details))
            .with_context(format!("Failed to parse file: {}", path.display()))
            .with_suggestions([
                format!("TRY: Verify the file is well-formed {}", format),
                format!("TRY: Inspect the raw file: head -n 20 {}", path.display()),
                "TRY: Move files of other formats out of the source directory".to_string(),
            ])
    }

    /// Configuration file is malformed
    pub fn invalid_config(path: &Path, details: &str) -> Self {
        Self::new(format!("Invalid config: {}", path.display()))
            .with_context(details.to_string())
            .with_suggestions([
                "TRY: Quote the section name: [\"DATA SOURCE\"]".to_string(),
                "TRY: Quote path values: DataSource1 = \"data/sales\"".to_string(),
            ])
    }

    /// Map a loader error onto a helpful error.
    pub fn from_load_error(err: &LoadError, config_path: &Path) -> Self {
        match err {
            LoadError::PathNotFound(path) => Self::path_not_found(path),
            LoadError::EmptyDirectory { dir, format } => Self::empty_directory(dir, *format),
            LoadError::UnsupportedFormat(name) => Self::unsupported_format(name),
            LoadError::Parse { path, format, source } => {
                Self::parse_error(path, *format, &source.to_string())
            }
            LoadError::Config(details) => Self::invalid_config(config_path, details),
            other => Self::new(other.to_string()),
        }
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

/// Print an error as a JSON document on stdout (for `--json` mode).
pub fn print_json_error(err: &anyhow::Error) {
    let payload = match err.downcast_ref::<HelpfulError>() {
        Some(helpful) => serde_json::json!({ "error": helpful }),
        None => serde_json::json!({
            "error": { "message": format!("{:#}", err), "context": null, "suggestions": [] }
        }),
    };
    match serde_json::to_string_pretty(&payload) {
        Ok(text) => println!("{}", text),
        Err(_) => eprintln!("{:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_helpful_error_display() {
        let err = HelpfulError::new("Something went wrong")
            .with_context("While processing data")
            .with_suggestions(["Try again"]);

        let display = format!("{}", err);
        assert!(display.contains("ERROR: Something went wrong"));
        assert!(display.contains("CONTEXT: While processing data"));
        assert!(display.contains("Try again"));
    }

    #[test]
    fn test_path_not_found() {
        let path = PathBuf::from("/nonexistent/path");
        let err = HelpfulError::from_load_error(
            &LoadError::PathNotFound(path.clone()),
            Path::new("config.toml"),
        );

        let display = format!("{}", err);
        assert!(display.contains("/nonexistent/path"));
        assert!(display.contains("TRY:"));
    }

    #[test]
    fn test_empty_directory_mentions_suffix() {
        let err = HelpfulError::empty_directory(Path::new("/data"), FormatTag::Excel);
        let display = format!("{}", err);
        assert!(display.contains("EXCEL"));
        assert!(display.contains(".xlsx"));
    }

    #[test]
    fn test_unsupported_format_lists_formats() {
        let err = HelpfulError::unsupported_format("parquet");
        assert!(err.message.contains("parquet"));
        assert_eq!(err.suggestions, vec!["TRY: Supported formats: csv, excel, json"]);
    }

    #[test]
    fn test_config_error_mentions_file() {
        let err = HelpfulError::from_load_error(
            &LoadError::Config("missing field `DataSource2`".to_string()),
            Path::new("settings.toml"),
        );
        assert!(err.message.contains("settings.toml"));
        assert_eq!(err.context.as_deref(), Some("missing field `DataSource2`"));
    }
}
