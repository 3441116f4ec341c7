use crate::error::{CsvCodecError, Result};
use crate::types::constants::{MAX_FIELDS, MAX_HEADER_FIELD_LEN};
use crate::types::Table;

/// Reject input that is empty or whitespace-only
pub fn validate_has_data(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(CsvCodecError::NoData);
    }
    Ok(())
}

/// Check the first row's field count against the field ceiling
pub fn validate_fields_count(count: usize) -> Result<()> {
    if count > MAX_FIELDS {
        return Err(CsvCodecError::TooManyFields {
            count,
            max: MAX_FIELDS,
        });
    }
    Ok(())
}

/// Check if a header name fits the length ceiling
pub fn is_valid_header_size(name: &str) -> bool {
    name.chars().count() <= MAX_HEADER_FIELD_LEN
}

/// Validate a parsed header name in 1-based column `col`
pub fn validate_header_field(name: &str, col: usize) -> Result<()> {
    if !is_valid_header_size(name) {
        return Err(CsvCodecError::UnstructuredData(format!(
            "header field in column {} is longer than {} characters",
            col, MAX_HEADER_FIELD_LEN
        )));
    }
    Ok(())
}

/// Check a body row's field count against the header
pub fn validate_row_fields(row: usize, expected: usize, found: usize) -> Result<()> {
    if found != expected {
        return Err(CsvCodecError::FieldCountMismatch {
            row,
            expected,
            found,
        });
    }
    Ok(())
}

/// Check that a table can be rendered: at least one field name, and every
/// row exactly as long as the field names.
pub fn validate_table_shape(table: &Table) -> Result<()> {
    let expected = table.field_names.len();
    if expected == 0 {
        return Err(CsvCodecError::MissingFieldNames);
    }

    if let Some((idx, row)) = table
        .rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != expected)
    {
        return Err(CsvCodecError::RowLengthMismatch {
            row: idx + 1,
            expected,
            found: row.len(),
        });
    }

    Ok(())
}
