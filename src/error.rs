use crate::types::CsvErrorType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvCodecError {
    #[error("No data: input is empty")]
    NoData,

    #[error("Too many fields: {count} fields found, maximum is {max}")]
    TooManyFields { count: usize, max: usize },

    #[error("Unstructured data: {0}")]
    UnstructuredData(String),

    #[error("Field count mismatch in row {row}: expected {expected} fields, found {found}")]
    FieldCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("At least one field name is required")]
    MissingFieldNames,

    #[error("Row {row} has {found} values but there are {expected} field names")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Cannot generate {requested} column names, maximum is {max}")]
    ColumnNameLimit { requested: usize, max: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CsvCodecError {
    pub fn error_type(&self) -> CsvErrorType {
        match self {
            CsvCodecError::NoData => CsvErrorType::NoData,
            CsvCodecError::TooManyFields { .. } => CsvErrorType::TooManyFields,
            CsvCodecError::ColumnNameLimit { .. } => CsvErrorType::TooManyFields,
            CsvCodecError::UnstructuredData(_) => CsvErrorType::UnstructuredData,
            CsvCodecError::FieldCountMismatch { .. } => CsvErrorType::FieldCountMismatch,
            CsvCodecError::MissingFieldNames => CsvErrorType::InvalidTable,
            CsvCodecError::RowLengthMismatch { .. } => CsvErrorType::InvalidTable,
            CsvCodecError::IoError(_) => CsvErrorType::Process,
            CsvCodecError::JsonError(_) => CsvErrorType::Process,
            CsvCodecError::ConfigError(_) => CsvErrorType::Process,
        }
    }

    /// 1-based row the error refers to, when there is one
    pub fn row(&self) -> Option<usize> {
        match self {
            CsvCodecError::FieldCountMismatch { row, .. }
            | CsvCodecError::RowLengthMismatch { row, .. } => Some(*row),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CsvCodecError>;
