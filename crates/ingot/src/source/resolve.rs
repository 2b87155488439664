//! Path resolution: single file vs. directory of matching files.

use super::format::FormatTag;
use crate::error::{LoadError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Whether a source resolved to one file or to a directory's members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    SingleFile,
    Directory,
}

/// A resolved source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    /// Matching members of `root`, in lexical file-name order. Never empty.
    Directory { root: PathBuf, files: Vec<PathBuf> },
}

impl Location {
    pub fn kind(&self) -> LocationKind {
        match self {
            Location::File(_) => LocationKind::SingleFile,
            Location::Directory { .. } => LocationKind::Directory,
        }
    }

    /// Every file this location reads, in read order.
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            Location::File(path) => std::slice::from_ref(path),
            Location::Directory { files, .. } => files,
        }
    }

    /// The configured path (the file itself, or the directory).
    pub fn root(&self) -> &Path {
        match self {
            Location::File(path) => path,
            Location::Directory { root, .. } => root,
        }
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_path(path: &Path) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(path.strip_prefix("~").unwrap_or(path));
        }
    }
    path.to_path_buf()
}

/// Resolve a raw configured path for the given format.
///
/// A regular file resolves to itself. A directory resolves to its direct
/// members that are regular files ending with the format's suffix. Anything
/// else is [`LoadError::PathNotFound`]; a directory without matches is
/// [`LoadError::EmptyDirectory`].
pub fn resolve_location(raw: &Path, format: FormatTag) -> Result<Location> {
    let path = expand_path(raw);

    if path.is_file() {
        debug!(path = %path.display(), %format, "Resolved single file");
        return Ok(Location::File(path));
    }

    if path.is_dir() {
        let files = list_matching_files(&path, format)?;
        if files.is_empty() {
            return Err(LoadError::EmptyDirectory { dir: path, format });
        }
        debug!(
            path = %path.display(),
            %format,
            files = files.len(),
            "Resolved directory"
        );
        return Ok(Location::Directory { root: path, files });
    }

    Err(LoadError::PathNotFound(path))
}

/// List direct members of `dir` whose names end with the format's suffix.
fn list_matching_files(dir: &Path, format: FormatTag) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let matches_name = |path: &Path| {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| format.matches_file_name(name))
    };

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Broken members (dangling links) only matter when they would be read.
            Err(err) if err.depth() > 0 && !err.path().is_some_and(matches_name) => {
                debug!(error = %err, "Skipping unreadable directory entry");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if entry.file_type().is_file() && matches_name(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
