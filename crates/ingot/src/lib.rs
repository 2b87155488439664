//! Ingot - Core Library
//!
//! Loads CSV, Excel and JSON sources (one file, or every matching file in a
//! directory) into in-memory Arrow tables.
//!
//! - **Source**: a location plus a declared [`FormatTag`], resolved once
//! - **TableReader**: turns a Source into one [`Table`]
//! - **Pipeline**: reads every source named in an [`IngotConfig`]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod reader;
pub mod source;
pub mod table;

pub use config::{IngotConfig, SourceSpec};
pub use error::{LoadError, ParseError, Result};
pub use pipeline::{load_source, run, LoadedTable};
pub use reader::TableReader;
pub use source::{FormatTag, Location, LocationKind, Source};
pub use table::{concat_tables, Table};
