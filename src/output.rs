use crate::error::CsvCodecError;
use crate::importer::ImportOutcome;
use crate::types::{CsvErrorType, Table};
use serde::Serialize;

/// Success response JSON structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SuccessResponse<'a> {
    pub charset: &'a str,
    pub field_separator: String,
    pub row_count: usize,
    #[serde(flatten)]
    pub table: &'a Table,
}

impl<'a> SuccessResponse<'a> {
    pub fn new(outcome: &'a ImportOutcome) -> Self {
        SuccessResponse {
            charset: outcome.charset,
            field_separator: outcome.delimiter.hex_code(),
            row_count: outcome.table.len(),
            table: &outcome.table,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Error response JSON structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorResponse {
    pub error: CsvErrorType,
    pub error_msg_user: String,
    pub error_msg_internal: String,
    pub error_row: usize,
}

impl ErrorResponse {
    pub fn new(error_type: CsvErrorType) -> Self {
        ErrorResponse {
            error: error_type,
            error_msg_user: error_type.message().to_string(),
            error_msg_internal: String::new(),
            error_row: 0,
        }
    }

    /// Set internal error message
    pub fn with_internal_message(mut self, msg: String) -> Self {
        self.error_msg_internal = msg;
        self
    }

    /// Set error row
    pub fn with_row(mut self, row: usize) -> Self {
        self.error_row = row;
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl From<&CsvCodecError> for ErrorResponse {
    fn from(err: &CsvCodecError) -> Self {
        ErrorResponse::new(err.error_type())
            .with_internal_message(err.to_string())
            .with_row(err.row().unwrap_or(0))
    }
}
