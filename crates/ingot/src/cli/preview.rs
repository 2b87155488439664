//! Preview rendering for loaded tables
//!
//! Shows the first rows of each table either as a terminal table or as a
//! JSON document (`--json`).

use crate::cli::output::{plural, print_table};
use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use ingot::{FormatTag, LoadedTable, LocationKind, Table};
use serde::Serialize;
use std::path::PathBuf;

/// Column schema shown in previews
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
}

/// Preview of one loaded source
#[derive(Debug, Serialize)]
pub struct PreviewResult {
    pub name: String,
    pub format: FormatTag,
    pub kind: LocationKind,
    pub path: PathBuf,
    pub files: Vec<PathBuf>,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnSchema>,
    pub preview_rows: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct PreviewDocument<'a> {
    sources: &'a [PreviewResult],
}

impl PreviewResult {
    pub fn from_loaded(loaded: &LoadedTable, rows: usize) -> Self {
        let table = &loaded.table;
        let schema = table.schema();
        let columns = schema
            .fields()
            .iter()
            .map(|field| ColumnSchema {
                name: field.name().clone(),
                data_type: arrow_type_to_string(field.data_type()),
                nullable: field.is_nullable(),
            })
            .collect();

        Self {
            name: loaded.name.clone(),
            format: loaded.source.format(),
            kind: loaded.source.kind(),
            path: loaded.source.location().root().to_path_buf(),
            files: loaded.source.paths().to_vec(),
            row_count: table.num_rows(),
            column_count: table.num_columns(),
            columns,
            preview_rows: preview_rows(table, rows),
        }
    }
}

/// Render the first `rows` rows of a table as strings.
pub fn preview_rows(table: &Table, rows: usize) -> Vec<Vec<String>> {
    let head = table.head(rows);
    let batch = head.batch();
    (0..batch.num_rows())
        .map(|row_idx| {
            batch
                .columns()
                .iter()
                .map(|col| cell_to_string(col, row_idx))
                .collect()
        })
        .collect()
}

fn cell_to_string(array: &ArrayRef, row: usize) -> String {
    if array.is_null(row) {
        return "null".to_string();
    }
    array_value_to_string(array, row).unwrap_or_else(|_| format!("<{:?}>", array.data_type()))
}

fn arrow_type_to_string(dt: &DataType) -> String {
    match dt {
        DataType::Null => "null".to_string(),
        DataType::Boolean => "boolean".to_string(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => "integer".to_string(),
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => "unsigned".to_string(),
        DataType::Float16 | DataType::Float32 | DataType::Float64 => "float".to_string(),
        DataType::Utf8 | DataType::LargeUtf8 => "string".to_string(),
        DataType::Date32 | DataType::Date64 => "date".to_string(),
        DataType::Timestamp(_, _) => "timestamp".to_string(),
        DataType::List(_) | DataType::LargeList(_) => "list".to_string(),
        DataType::Struct(_) => "struct".to_string(),
        _ => format!("{:?}", dt),
    }
}

// === Output functions ===

pub fn output_json(results: &[PreviewResult]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&PreviewDocument { sources: results })?;
    println!("{}", json);
    Ok(())
}

pub fn output_preview(result: &PreviewResult) {
    let location = match result.kind {
        LocationKind::SingleFile => "file".to_string(),
        LocationKind::Directory => format!("directory, {}", plural(result.files.len(), "file")),
    };
    println!(
        "{}: {} ({}, {})",
        result.name,
        result.path.display(),
        result.format,
        location
    );
    println!(
        "{} x {}",
        plural(result.row_count, "row"),
        plural(result.column_count, "column")
    );
    println!();

    if result.preview_rows.is_empty() {
        println!("(no data)");
        return;
    }

    let headers: Vec<&str> = result.columns.iter().map(|c| c.name.as_str()).collect();
    print_table(&headers, result.preview_rows.clone());
}
