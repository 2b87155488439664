//! Config → sources → readers → tables.

use crate::config::{IngotConfig, SourceSpec};
use crate::error::Result;
use crate::reader::TableReader;
use crate::source::Source;
use crate::table::Table;
use tracing::{debug, info};

/// A table read from one configured source.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// Config key the source came from (e.g. `DataSource1`).
    pub name: String,
    pub source: Source,
    pub table: Table,
}

/// Open and read one configured source.
pub fn load_source(spec: &SourceSpec) -> Result<LoadedTable> {
    let source = Source::open(spec.format, &spec.path)?;
    debug!(name = %spec.name, source = ?source, "Source resolved");

    let reader = TableReader::new(source);
    let table = reader.read()?;

    Ok(LoadedTable {
        name: spec.name.clone(),
        source: reader.into_source(),
        table,
    })
}

/// Load every configured source, in order. Stops at the first failure.
pub fn run(config: &IngotConfig) -> Result<Vec<LoadedTable>> {
    info!("Starting...");
    let loaded = config
        .sources()
        .iter()
        .map(load_source)
        .collect::<Result<Vec<_>>>()?;
    info!(sources = loaded.len(), "All sources loaded");
    Ok(loaded)
}
