use crate::error::ParseError;
use crate::table::{dedupe_column_names, schema_ref, Table};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use std::sync::Arc;

/// Parse the first worksheet of a workbook; the first row is the header.
pub(crate) fn parse_excel(path: &Path) -> Result<Table, ParseError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ParseError::Layout("Workbook has no worksheets".to_string()))??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::empty(schema_ref(Vec::new())));
    };

    let names = dedupe_column_names(
        header
            .iter()
            .enumerate()
            .map(|(idx, cell)| header_name(idx, cell))
            .collect(),
    );
    let body: Vec<&[Data]> = rows.collect();

    let mut fields = Vec::with_capacity(names.len());
    let mut columns = Vec::with_capacity(names.len());
    for (idx, name) in names.into_iter().enumerate() {
        let cells: Vec<&Data> = body.iter().map(|row| row.get(idx).unwrap_or(&Data::Empty)).collect();
        let column = build_column(&cells);
        fields.push(Field::new(name, column.data_type().clone(), true));
        columns.push(column);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(body.len()));
    let batch = RecordBatch::try_new_with_options(schema_ref(fields), columns, &options)?;
    Ok(Table::from_batch(batch))
}

fn header_name(idx: usize, cell: &Data) -> String {
    match cell {
        Data::Empty => format!("Unnamed: {}", idx),
        Data::String(s) if s.trim().is_empty() => format!("Unnamed: {}", idx),
        Data::String(s) => s.clone(),
        other => cell_text(other).unwrap_or_else(|| format!("Unnamed: {}", idx)),
    }
}

/// Inferred column type, widened as cells are observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Empty,
    Int,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    fn observe(self, cell: &Data) -> Self {
        let cell_kind = match cell {
            Data::Empty | Data::Error(_) => return self,
            Data::Int(_) => ColumnKind::Int,
            Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => ColumnKind::Int,
            Data::Float(_) => ColumnKind::Float,
            Data::Bool(_) => ColumnKind::Bool,
            _ => ColumnKind::Text,
        };
        match (self, cell_kind) {
            (ColumnKind::Empty, kind) => kind,
            (a, b) if a == b => a,
            (ColumnKind::Int, ColumnKind::Float) | (ColumnKind::Float, ColumnKind::Int) => {
                ColumnKind::Float
            }
            _ => ColumnKind::Text,
        }
    }
}

fn build_column(cells: &[&Data]) -> ArrayRef {
    let kind = cells
        .iter()
        .fold(ColumnKind::Empty, |kind, cell| kind.observe(cell));

    match kind {
        ColumnKind::Int => Arc::new(Int64Array::from_iter(cells.iter().map(|c| match c {
            Data::Int(i) => Some(*i),
            Data::Float(f) => Some(*f as i64),
            _ => None,
        }))),
        ColumnKind::Float => Arc::new(Float64Array::from_iter(cells.iter().map(|c| match c {
            Data::Int(i) => Some(*i as f64),
            Data::Float(f) => Some(*f),
            _ => None,
        }))),
        ColumnKind::Bool => Arc::new(BooleanArray::from_iter(cells.iter().map(|c| match c {
            Data::Bool(b) => Some(*b),
            _ => None,
        }))),
        ColumnKind::Text | ColumnKind::Empty => {
            Arc::new(StringArray::from_iter(cells.iter().map(|c| cell_text(c))))
        }
    }
}

/// Text rendering of a cell; `None` for missing values.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(
            dt.as_datetime()
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| dt.as_f64().to_string()),
        ),
    }
}
