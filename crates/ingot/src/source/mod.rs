//! Sources - a configured location plus its declared file format
//!
//! A [`Source`] is resolved once, at construction: the raw path is probed and
//! either kept as a single file or expanded to the directory's members that
//! carry the format's suffix. Sources are immutable afterwards.

pub mod format;
pub mod resolve;

pub use format::FormatTag;
pub use resolve::{expand_path, resolve_location, Location, LocationKind};

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// A data source, one variant per supported format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Csv(Location),
    Excel(Location),
    Json(Location),
}

impl Source {
    /// Resolve `path` as a source of the given format.
    pub fn open(format: FormatTag, path: impl AsRef<Path>) -> Result<Self> {
        let location = resolve_location(path.as_ref(), format)?;
        let source = match format {
            FormatTag::Csv => Source::Csv(location),
            FormatTag::Excel => Source::Excel(location),
            FormatTag::Json => Source::Json(location),
        };
        info!(
            path = %source.location().root().display(),
            format = %format,
            kind = ?source.kind(),
            files = source.paths().len(),
            "Opened source"
        );
        Ok(source)
    }

    pub fn csv(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(FormatTag::Csv, path)
    }

    pub fn excel(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(FormatTag::Excel, path)
    }

    pub fn json(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(FormatTag::Json, path)
    }

    pub fn format(&self) -> FormatTag {
        match self {
            Source::Csv(_) => FormatTag::Csv,
            Source::Excel(_) => FormatTag::Excel,
            Source::Json(_) => FormatTag::Json,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Source::Csv(location) | Source::Excel(location) | Source::Json(location) => location,
        }
    }

    pub fn kind(&self) -> LocationKind {
        self.location().kind()
    }

    pub fn paths(&self) -> &[PathBuf] {
        self.location().paths()
    }

    /// Return the resolved location unchanged.
    ///
    /// All checks happen during construction, so this never fails and never
    /// mutates the source.
    pub fn validate(&self) -> &Location {
        self.location()
    }
}
