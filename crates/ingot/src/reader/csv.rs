use crate::error::ParseError;
use crate::table::{dedupe_schema, Table};
use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

/// Parse a CSV file whose first row is the header.
///
/// Column types are inferred over the whole file.
pub(crate) fn parse_csv(path: &Path) -> Result<Table, ParseError> {
    let mut file = File::open(path)?;
    let format = Format::default().with_header(true);

    let (schema, _) = format.infer_schema(&mut file, None)?;
    file.rewind()?;

    let schema = Arc::new(dedupe_schema(&schema));
    let reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .build(file)?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;

    Ok(Table::from_batch(concat_batches(&schema, &batches)?))
}
