//! Pipeline configuration
//!
//! Loaded from a TOML file, by default `config.toml` in the working
//! directory:
//!
//! ```toml
//! ["DATA SOURCE"]
//! DataSource1 = "data/sales"
//! DataSource2 = "data/budget.xlsx"
//! Format1 = "csv"      # optional
//! Format2 = "excel"    # optional
//!
//! [preview]
//! rows = 5
//! ```

use crate::error::{LoadError, Result};
use crate::source::FormatTag;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngotConfig {
    #[serde(rename = "DATA SOURCE")]
    pub data_source: DataSourceConfig,

    #[serde(default)]
    pub preview: PreviewConfig,
}

/// The two configured sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    #[serde(rename = "DataSource1")]
    pub data_source1: PathBuf,

    #[serde(rename = "DataSource2")]
    pub data_source2: PathBuf,

    #[serde(rename = "Format1", default = "default_format1")]
    pub format1: FormatTag,

    #[serde(rename = "Format2", default = "default_format2")]
    pub format2: FormatTag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_preview_rows")]
    pub rows: usize,
}

/// One named entry of the `[DATA SOURCE]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub name: String,
    pub path: PathBuf,
    pub format: FormatTag,
}

fn default_format1() -> FormatTag {
    FormatTag::Csv
}

fn default_format2() -> FormatTag {
    FormatTag::Excel
}

fn default_preview_rows() -> usize {
    DEFAULT_PREVIEW_ROWS
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            rows: default_preview_rows(),
        }
    }
}

impl IngotConfig {
    /// Load configuration from a TOML file.
    ///
    /// Relative source paths are kept as written, i.e. resolved against the
    /// working directory like the rest of the CLI arguments.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LoadError::Config(e.to_string()))
    }

    /// Sources in configuration order.
    pub fn sources(&self) -> Vec<SourceSpec> {
        vec![
            SourceSpec {
                name: "DataSource1".to_string(),
                path: self.data_source.data_source1.clone(),
                format: self.data_source.format1,
            },
            SourceSpec {
                name: "DataSource2".to_string(),
                path: self.data_source.data_source2.clone(),
                format: self.data_source.format2,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config = IngotConfig::from_toml(
            r#"
["DATA SOURCE"]
DataSource1 = "data/csv"
DataSource2 = "data/book.xlsx"
"#,
        )
        .unwrap();

        assert_eq!(config.data_source.data_source1, PathBuf::from("data/csv"));
        assert_eq!(config.data_source.format1, FormatTag::Csv);
        assert_eq!(config.data_source.format2, FormatTag::Excel);
        assert_eq!(config.preview.rows, DEFAULT_PREVIEW_ROWS);

        let sources = config.sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name, "DataSource1");
        assert_eq!(sources[1].path, PathBuf::from("data/book.xlsx"));
    }

    #[test]
    fn test_format_overrides_and_preview() {
        let config = IngotConfig::from_toml(
            r#"
["DATA SOURCE"]
DataSource1 = "a.json"
DataSource2 = "b"
Format1 = "json"
Format2 = "CSV"

[preview]
rows = 12
"#,
        )
        .unwrap();

        assert_eq!(config.data_source.format1, FormatTag::Json);
        assert_eq!(config.data_source.format2, FormatTag::Csv);
        assert_eq!(config.preview.rows, 12);
    }

    #[test]
    fn test_missing_key() {
        let err = IngotConfig::from_toml(
            r#"
["DATA SOURCE"]
DataSource1 = "only-one.csv"
"#,
        )
        .unwrap_err();
        match err {
            LoadError::Config(msg) => assert!(msg.contains("DataSource2"), "{}", msg),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_format_name() {
        let err = IngotConfig::from_toml(
            r#"
["DATA SOURCE"]
DataSource1 = "a"
DataSource2 = "b"
Format2 = "parquet"
"#,
        )
        .unwrap_err();
        match err {
            LoadError::Config(msg) => assert!(msg.contains("parquet"), "{}", msg),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = IngotConfig {
            data_source: DataSourceConfig {
                data_source1: PathBuf::from("x.csv"),
                data_source2: PathBuf::from("y.xlsx"),
                format1: FormatTag::Csv,
                format2: FormatTag::Excel,
            },
            preview: PreviewConfig::default(),
        };

        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("DataSource1"));
        assert_eq!(IngotConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = IngotConfig::load(Path::new("/no/such/config.toml")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
