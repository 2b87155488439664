use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared file format of a source.
///
/// Each tag has a fixed file-name suffix (used to filter directory members)
/// and a fixed parse routine (see [`crate::reader`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FormatTag {
    Csv,
    Excel,
    Json,
}

impl FormatTag {
    pub const ALL: [FormatTag; 3] = [FormatTag::Csv, FormatTag::Excel, FormatTag::Json];

    /// File-name suffix, including the leading dot.
    pub fn suffix(self) -> &'static str {
        match self {
            FormatTag::Csv => ".csv",
            FormatTag::Excel => ".xlsx",
            FormatTag::Json => ".json",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormatTag::Csv => "CSV",
            FormatTag::Excel => "EXCEL",
            FormatTag::Json => "JSON",
        }
    }

    /// True when `file_name` ends with this format's suffix (case-sensitive).
    pub fn matches_file_name(self, file_name: &str) -> bool {
        file_name.ends_with(self.suffix())
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatTag {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(FormatTag::Csv),
            "excel" | "xlsx" => Ok(FormatTag::Excel),
            "json" => Ok(FormatTag::Json),
            _ => Err(LoadError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for FormatTag {
    type Error = LoadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormatTag> for String {
    fn from(tag: FormatTag) -> Self {
        tag.as_str().to_ascii_lowercase()
    }
}
