use crate::error::ParseError;
use crate::table::Table;
use arrow::error::ArrowError;
use arrow::json::reader::infer_json_schema_from_iterator;
use arrow::json::ReaderBuilder;
use arrow::record_batch::RecordBatch;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Parse a JSON file into a table.
///
/// Accepted layouts:
/// - an array of record objects: `[{"a": 1}, {"a": 2}]`
/// - a column-oriented object: `{"a": [1, 2]}` or `{"a": {"0": 1, "1": 2}}`
/// - line-delimited (or simply concatenated) record objects
pub(crate) fn parse_json(path: &Path) -> Result<Table, ParseError> {
    let content = fs::read_to_string(path)?;
    let records = records_from_str(&content)?;
    records_to_table(&records)
}

fn records_from_str(content: &str) -> Result<Vec<JsonValue>, ParseError> {
    let values = serde_json::Deserializer::from_str(content)
        .into_iter::<JsonValue>()
        .collect::<Result<Vec<_>, _>>()?;

    match values.len() {
        0 => Ok(Vec::new()),
        1 => match values.into_iter().next() {
            Some(JsonValue::Array(items)) => check_records(items),
            Some(JsonValue::Object(obj)) => columns_to_records(obj),
            _ => Err(ParseError::Layout(
                "Expected JSON array or object at root".to_string(),
            )),
        },
        _ => check_records(values),
    }
}

fn check_records(items: Vec<JsonValue>) -> Result<Vec<JsonValue>, ParseError> {
    if let Some(idx) = items.iter().position(|item| !item.is_object()) {
        return Err(ParseError::Layout(format!(
            "Record {} is not a JSON object",
            idx + 1
        )));
    }
    Ok(items)
}

/// Turn `{"col": [..]}` / `{"col": {"idx": ..}}` into row objects.
///
/// Row order follows first appearance of each index.
fn columns_to_records(columns: Map<String, JsonValue>) -> Result<Vec<JsonValue>, ParseError> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<Map<String, JsonValue>> = Vec::new();

    for (column, values) in columns {
        let cells: Vec<(String, JsonValue)> = match values {
            JsonValue::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            JsonValue::Object(map) => map.into_iter().collect(),
            _ => {
                return Err(ParseError::Layout(format!(
                    "Column '{}' must be an array or an object",
                    column
                )))
            }
        };

        for (key, value) in cells {
            let row = *index.entry(key).or_insert_with(|| {
                rows.push(Map::new());
                rows.len() - 1
            });
            rows[row].insert(column.clone(), value);
        }
    }

    Ok(rows.into_iter().map(JsonValue::Object).collect())
}

fn records_to_table(records: &[JsonValue]) -> Result<Table, ParseError> {
    let schema = infer_json_schema_from_iterator(records.iter().map(Ok::<_, ArrowError>))?;
    let schema = Arc::new(schema);

    let mut decoder = ReaderBuilder::new(schema.clone())
        .with_batch_size(records.len().max(1))
        .with_coerce_primitive(true)
        .build_decoder()?;
    decoder.serialize(records)?;

    let batch = decoder
        .flush()?
        .unwrap_or_else(|| RecordBatch::new_empty(schema));
    Ok(Table::from_batch(batch))
}
