//! Error types for loading sources into tables

use crate::source::FormatTag;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Loader error type
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Path not found: {} (neither a file nor a directory)", .0.display())]
    PathNotFound(PathBuf),

    #[error("No {format} files (*{suffix}) in directory: {}", .dir.display(), suffix = .format.suffix())]
    EmptyDirectory { dir: PathBuf, format: FormatTag },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse {format} file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        format: FormatTag,
        #[source]
        source: ParseError,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Config error: {0}")]
    Config(String),
}

/// Failure inside a single parse routine. Wrapped in [`LoadError::Parse`]
/// together with the offending path.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[error("{0}")]
    Layout(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, LoadError>;
