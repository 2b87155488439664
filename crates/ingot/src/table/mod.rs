//! In-memory tables backed by Arrow record batches.

mod concat;

pub use concat::concat_tables;

use arrow::datatypes::{Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::collections::HashSet;
use std::sync::Arc;

/// The result of reading a source.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    batch: RecordBatch,
}

impl Table {
    pub fn from_batch(batch: RecordBatch) -> Self {
        Self { batch }
    }

    /// A table with the given columns and no rows.
    pub fn empty(schema: SchemaRef) -> Self {
        Self::from_batch(RecordBatch::new_empty(schema))
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// First `rows` rows (zero-copy slice).
    pub fn head(&self, rows: usize) -> Table {
        let len = rows.min(self.batch.num_rows());
        Table::from_batch(self.batch.slice(0, len))
    }
}

/// Make column names unique: repeats of `name` become `name.1`, `name.2`, ...
pub(crate) fn dedupe_column_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        let mut candidate = name.clone();
        let mut counter = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", name, counter);
            counter += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }

    out
}

/// Rebuild `schema` with unique field names, keeping types and metadata.
pub(crate) fn dedupe_schema(schema: &Schema) -> Schema {
    let names = schema.fields().iter().map(|f| f.name().clone()).collect();
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .zip(dedupe_column_names(names))
        .map(|(field, name)| field.as_ref().clone().with_name(name))
        .collect();
    Schema::new_with_metadata(fields, schema.metadata().clone())
}

pub(crate) fn schema_ref(fields: Vec<Field>) -> SchemaRef {
    Arc::new(Schema::new(fields))
}
