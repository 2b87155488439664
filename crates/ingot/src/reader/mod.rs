//! Table readers - turn a [`Source`] into one in-memory [`Table`]
//!
//! Each format has one parse routine, selected by a match over the source's
//! [`FormatTag`]. A directory source parses every member in order and
//! concatenates the results row-wise.

mod csv;
mod excel;
mod json;

use crate::error::{LoadError, ParseError, Result};
use crate::source::{FormatTag, Location, Source};
use crate::table::{concat_tables, Table};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

type ParseFn = fn(&Path) -> std::result::Result<Table, ParseError>;

/// Parse routine for a format.
pub fn parse_fn(format: FormatTag) -> ParseFn {
    match format {
        FormatTag::Csv => csv::parse_csv,
        FormatTag::Json => json::parse_json,
        FormatTag::Excel => excel::parse_excel,
    }
}

/// Parse a single file with the routine for `format`.
pub fn parse_file(format: FormatTag, path: &Path) -> Result<Table> {
    let parse = parse_fn(format);
    let table = parse(path).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        format,
        source,
    })?;
    debug!(
        path = %path.display(),
        rows = table.num_rows(),
        columns = table.num_columns(),
        "Parsed file"
    );
    Ok(table)
}

/// Reads one source into one table.
#[derive(Debug, Clone)]
pub struct TableReader {
    source: Source,
}

impl TableReader {
    pub fn new(source: Source) -> Self {
        Self { source }
    }

    pub fn into_source(self) -> Source {
        self.source
    }

    /// Read the source. A directory yields the row-wise concatenation of its
    /// files in resolution order; the first failing file aborts the read.
    pub fn read(&self) -> Result<Table> {
        let start = Instant::now();
        let format = self.source.format();

        let table = match self.source.validate() {
            Location::File(path) => parse_file(format, path)?,
            Location::Directory { files, .. } => {
                let tables = files
                    .iter()
                    .map(|path| parse_file(format, path))
                    .collect::<Result<Vec<_>>>()?;
                concat_tables(&tables)?
            }
        };

        info!(
            path = %self.source.location().root().display(),
            %format,
            files = self.source.paths().len(),
            rows = table.num_rows(),
            columns = table.num_columns(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Read source"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Int64Array, StringArray};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_single_csv_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.csv");
        fs::write(&path, "a,b\n1,2\n3,4\n").unwrap();

        let table = TableReader::new(Source::csv(&path).unwrap()).read().unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_directory_concatenates_in_file_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("2024-02.csv"), "id,name\n2,second\n").unwrap();
        fs::write(temp_dir.path().join("2024-01.csv"), "id,name\n1,first\n").unwrap();
        fs::write(temp_dir.path().join("readme.txt"), "not data").unwrap();

        let table = TableReader::new(Source::csv(temp_dir.path()).unwrap())
            .read()
            .unwrap();
        assert_eq!(table.num_rows(), 2);

        let names = table.batch().column(1).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(names.value(0), "first");
        assert_eq!(names.value(1), "second");
    }

    #[test]
    fn test_directory_row_count_is_files_times_rows() {
        let temp_dir = TempDir::new().unwrap();
        for i in 0..4 {
            fs::write(
                temp_dir.path().join(format!("part-{}.csv", i)),
                format!("n\n{}\n{}\n{}\n", i, i + 10, i + 20),
            )
            .unwrap();
        }

        let table = TableReader::new(Source::csv(temp_dir.path()).unwrap())
            .read()
            .unwrap();
        assert_eq!(table.num_rows(), 12);

        let n = table.batch().column(0).as_any().downcast_ref::<Int64Array>().unwrap();
        assert_eq!(n.value(0), 0);
        assert_eq!(n.value(3), 1);
        assert_eq!(n.value(11), 23);
    }

    #[test]
    fn test_directory_with_mismatched_columns() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.csv"), "x,y\n1,2\n").unwrap();
        fs::write(temp_dir.path().join("b.csv"), "y,z\n3,4\n").unwrap();

        let table = TableReader::new(Source::csv(temp_dir.path()).unwrap())
            .read()
            .unwrap();
        assert_eq!(table.column_names(), vec!["x", "y", "z"]);
        assert_eq!(table.num_rows(), 2);
        assert!(table.batch().column(0).is_null(1));
        assert!(table.batch().column(2).is_null(0));
    }

    #[test]
    fn test_json_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.json"), r#"[{"k": 1}]"#).unwrap();
        fs::write(temp_dir.path().join("b.json"), r#"[{"k": 2}, {"k": 3}]"#).unwrap();

        let table = TableReader::new(Source::json(temp_dir.path()).unwrap())
            .read()
            .unwrap();
        assert_eq!(table.num_rows(), 3);
    }

    #[test]
    fn test_json_directory_with_nested_and_string_values() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.json"), r#"[{"a": {"x": 1}}]"#).unwrap();
        fs::write(temp_dir.path().join("b.json"), r#"[{"a": "s"}]"#).unwrap();

        let table = TableReader::new(Source::json(temp_dir.path()).unwrap())
            .read()
            .unwrap();
        assert_eq!(table.num_rows(), 2);

        let a = table.batch().column(0).as_any().downcast_ref::<StringArray>().unwrap();
        assert!(a.value(0).contains("1"));
        assert_eq!(a.value(1), "s");
    }

    #[test]
    fn test_parse_failure_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("good.json"), r#"[{"k": 1}]"#).unwrap();
        fs::write(temp_dir.path().join("x-bad.json"), "{not json").unwrap();

        let reader = TableReader::new(Source::json(temp_dir.path()).unwrap());
        match reader.read().unwrap_err() {
            LoadError::Parse { path, format, .. } => {
                assert_eq!(path, temp_dir.path().join("x-bad.json"));
                assert_eq!(format, FormatTag::Json);
            }
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_fn_dispatch() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.txt");
        fs::write(&path, "[{\"a\": 1}]").unwrap();

        // The routine follows the tag, not the file name.
        let table = parse_file(FormatTag::Json, &path).unwrap();
        assert_eq!(table.num_rows(), 1);
        assert!(matches!(
            parse_file(FormatTag::Excel, &path),
            Err(LoadError::Parse { format: FormatTag::Excel, .. })
        ));
    }
}
