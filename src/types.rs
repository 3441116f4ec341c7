use crate::error::CsvCodecError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use std::str::FromStr;

/// A single typed cell value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    #[default]
    Null,
    String(String),
    #[serde(with = "number_repr")]
    Number(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

/// JSON has no literal for non-finite numbers; those travel as
/// `"Infinity"`, `"-Infinity"` and `"NaN"`.
mod number_repr {
    use super::*;
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if n.is_nan() {
            serializer.serialize_str("NaN")
        } else if *n == f64::INFINITY {
            serializer.serialize_str("Infinity")
        } else if *n == f64::NEG_INFINITY {
            serializer.serialize_str("-Infinity")
        } else {
            serializer.serialize_f64(*n)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                other => Err(D::Error::custom(format!("invalid number: {}", other))),
            },
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(t: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(t)
    }
}

pub type Row = Vec<FieldValue>;

/// Header names plus body rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Table {
    pub field_names: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(field_names: Vec<String>, rows: Vec<Row>) -> Self {
        Table { field_names, rows }
    }

    /// Header length, or the first body row's length when there is no header
    pub fn column_count(&self) -> usize {
        if !self.field_names.is_empty() {
            self.field_names.len()
        } else {
            self.rows.first().map(Vec::len).unwrap_or(0)
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Field delimiter candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Comma,
    #[default]
    Tab,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }

    pub fn as_byte(self) -> u8 {
        self.as_char() as u8
    }

    /// Two-digit hex code, as reported in JSON output
    pub fn hex_code(self) -> String {
        format!("{:02X}", self.as_byte())
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "comma"),
            Delimiter::Tab => write!(f, "tab"),
        }
    }
}

impl FromStr for Delimiter {
    type Err = CsvCodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "," => Ok(Delimiter::Comma),
            "\t" | "\\t" => Ok(Delimiter::Tab),
            _ => match s.trim().to_lowercase().as_str() {
                "comma" => Ok(Delimiter::Comma),
                "tab" => Ok(Delimiter::Tab),
                other => Err(CsvCodecError::ConfigError(format!(
                    "Unknown delimiter \"{}\" (expected comma or tab)",
                    other
                ))),
            },
        }
    }
}

/// Error codes surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum CsvErrorType {
    Process = 0,            // Unhandled exception, IO, config
    NoData = 1,             // Empty or whitespace-only input
    TooManyFields = 2,      // First row exceeds max field count
    UnstructuredData = 3,   // No consistent delimiter, unclosed quote, header too long
    FieldCountMismatch = 4, // Body row field count differs from header
    InvalidTable = 5,       // Export precondition violated
}

impl fmt::Display for CsvErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl CsvErrorType {
    pub fn message(&self) -> &'static str {
        match self {
            CsvErrorType::Process => "Unhandled exception",
            CsvErrorType::NoData => "There is no data to import",
            CsvErrorType::TooManyFields => "Too many fields. Maximum %d fields allowed",
            CsvErrorType::UnstructuredData => {
                "Could not determine the structure of the data. Check quotes and delimiters"
            }
            CsvErrorType::FieldCountMismatch => {
                "Row %d does not have the same number of fields as the header"
            }
            CsvErrorType::InvalidTable => "Table shape is invalid for export",
        }
    }
}

/// Constants
pub mod constants {
    /// Maximum number of fields in a row
    pub const MAX_FIELDS: usize = 256;

    /// Maximum length of a header field, in characters
    pub const MAX_HEADER_FIELD_LEN: usize = 255;

    /// Rows sampled before the delimiter detector trusts differing field counts
    pub const DELIMITER_CONFIDENCE_ROWS: usize = 10;

    /// Synthetic column names run A..ZZ
    pub const MAX_COLUMN_NAMES: usize = 26 + 26 * 26;

    /// Row delimiter used on output
    pub const ROW_DELIMITER: &str = "\r\n";

    pub const QUOTE: char = '"';

    /// Candidate field delimiters, primary first
    pub const FIELD_DELIMS: [super::Delimiter; 2] =
        [super::Delimiter::Comma, super::Delimiter::Tab];
}

/// Timestamp forms carrying a numeric offset (RFC 3339 and RFC 2822 are tried first)
pub const OFFSET_DATETIME_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S %z",
];

/// Timestamp forms without an offset
pub const DATETIME_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only forms
pub const DATE_PATTERNS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
