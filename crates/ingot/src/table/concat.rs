//! Row-wise concatenation with an outer union of columns.

use super::{schema_ref, Table};
use arrow::array::{new_null_array, Array, ArrayRef, StringArray};
use arrow::compute::{can_cast_types, cast, concat_batches};
use arrow::datatypes::{DataType, Field, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use std::sync::Arc;

/// Concatenate tables row-wise, preserving input order.
///
/// The output columns are the union of all input columns in first-seen
/// order. Cells for columns an input lacks are null. Columns that appear
/// with different types are widened (see [`widen`]). Every output column is
/// nullable.
pub fn concat_tables(tables: &[Table]) -> Result<Table, ArrowError> {
    let schema = unify_schemas(tables);
    let batches = tables
        .iter()
        .map(|table| align_batch(table.batch(), &schema))
        .collect::<Result<Vec<_>, _>>()?;
    let batch = concat_batches(&schema, &batches)?;
    Ok(Table::from_batch(batch))
}

fn unify_schemas(tables: &[Table]) -> SchemaRef {
    let mut columns: Vec<(String, DataType)> = Vec::new();

    for table in tables {
        for field in table.schema().fields() {
            match columns.iter_mut().find(|(name, _)| name == field.name()) {
                Some((_, data_type)) => *data_type = widen(data_type, field.data_type()),
                None => columns.push((field.name().clone(), field.data_type().clone())),
            }
        }
    }

    schema_ref(
        columns
            .into_iter()
            .map(|(name, data_type)| Field::new(name, data_type, true))
            .collect(),
    )
}

/// Common type for a column seen with two types.
///
/// Null yields to the other type; two integer types give Int64; any other
/// numeric pair gives Float64; everything else falls back to Utf8.
fn widen(a: &DataType, b: &DataType) -> DataType {
    if a == b {
        return a.clone();
    }
    match (a, b) {
        (DataType::Null, other) | (other, DataType::Null) => other.clone(),
        (x, y) if x.is_integer() && y.is_integer() => DataType::Int64,
        (x, y) if x.is_numeric() && y.is_numeric() => DataType::Float64,
        _ => DataType::Utf8,
    }
}

fn align_batch(batch: &RecordBatch, schema: &SchemaRef) -> Result<RecordBatch, ArrowError> {
    let rows = batch.num_rows();
    let columns = schema
        .fields()
        .iter()
        .map(|field| match batch.column_by_name(field.name()) {
            Some(column) if column.data_type() == field.data_type() => Ok(column.clone()),
            Some(column) => cast_column(column, field.data_type()),
            None => Ok(new_null_array(field.data_type(), rows)),
        })
        .collect::<Result<Vec<ArrayRef>, _>>()?;

    RecordBatch::try_new(schema.clone(), columns)
}

fn cast_column(column: &ArrayRef, to: &DataType) -> Result<ArrayRef, ArrowError> {
    if can_cast_types(column.data_type(), to) || to != &DataType::Utf8 {
        return cast(column, to);
    }
    // Nested types have no Utf8 kernel; render each cell instead.
    let strings = (0..column.len())
        .map(|row| {
            if column.is_null(row) {
                Ok(None)
            } else {
                array_value_to_string(column, row).map(Some)
            }
        })
        .collect::<Result<StringArray, ArrowError>>()?;
    Ok(Arc::new(strings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, Int64Array, StructArray};

    fn table(columns: Vec<(&str, ArrayRef)>) -> Table {
        let fields = columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), false))
            .collect();
        let arrays = columns.into_iter().map(|(_, array)| array).collect();
        Table::from_batch(RecordBatch::try_new(schema_ref(fields), arrays).unwrap())
    }

    fn ints(values: Vec<i64>) -> ArrayRef {
        Arc::new(Int64Array::from(values))
    }

    fn strings(values: Vec<&str>) -> ArrayRef {
        Arc::new(StringArray::from(values))
    }

    #[test]
    fn test_identical_columns_keep_order() {
        let first = table(vec![("a", ints(vec![1])), ("b", strings(vec!["x"]))]);
        let second = table(vec![("a", ints(vec![2])), ("b", strings(vec!["y"]))]);

        let result = concat_tables(&[first, second]).unwrap();
        assert_eq!(result.num_rows(), 2);
        assert_eq!(result.column_names(), vec!["a", "b"]);

        let a = result
            .batch()
            .column(0)
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(a.values().to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_outer_union_fills_nulls() {
        let first = table(vec![("a", ints(vec![1, 2]))]);
        let second = table(vec![("b", strings(vec!["z"])), ("a", ints(vec![3]))]);

        let result = concat_tables(&[first, second]).unwrap();
        assert_eq!(result.num_rows(), 3);
        assert_eq!(result.column_names(), vec!["a", "b"]);

        let b = result.batch().column(1);
        assert!(b.is_null(0));
        assert!(b.is_null(1));
        assert!(!b.is_null(2));
        assert_eq!(b.null_count(), 2);
    }

    #[test]
    fn test_mixed_numeric_widens_to_float() {
        let first = table(vec![("v", ints(vec![1]))]);
        let second = table(vec![("v", Arc::new(Float64Array::from(vec![2.5])) as ArrayRef)]);

        let result = concat_tables(&[first, second]).unwrap();
        let v = result
            .batch()
            .column(0)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(v.values().to_vec(), vec![1.0, 2.5]);
    }

    #[test]
    fn test_conflicting_types_become_strings() {
        let first = table(vec![("v", ints(vec![7]))]);
        let second = table(vec![("v", strings(vec!["seven"]))]);

        let result = concat_tables(&[first, second]).unwrap();
        let v = result
            .batch()
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(v.value(0), "7");
        assert_eq!(v.value(1), "seven");
    }

    #[test]
    fn test_nested_and_string_columns_become_strings() {
        let nested: ArrayRef = Arc::new(StructArray::from(vec![(
            Arc::new(Field::new("x", DataType::Int64, false)),
            ints(vec![1]),
        )]));
        let first = table(vec![("a", nested)]);
        let second = table(vec![("a", strings(vec!["s"]))]);

        let result = concat_tables(&[first, second]).unwrap();
        assert_eq!(result.schema().field(0).data_type(), &DataType::Utf8);

        let a = result
            .batch()
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert!(a.value(0).contains('x'));
        assert!(a.value(0).contains('1'));
        assert_eq!(a.value(1), "s");
    }

    #[test]
    fn test_widen_rules() {
        assert_eq!(widen(&DataType::Null, &DataType::Boolean), DataType::Boolean);
        assert_eq!(widen(&DataType::Int32, &DataType::Int64), DataType::Int64);
        assert_eq!(widen(&DataType::Int64, &DataType::Float64), DataType::Float64);
        assert_eq!(widen(&DataType::Boolean, &DataType::Int64), DataType::Utf8);
        assert_eq!(widen(&DataType::Utf8, &DataType::Utf8), DataType::Utf8);
    }
}
