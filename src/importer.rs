use crate::config::ImportOptions;
use crate::detection::{
    coerce_value, count_fields, decode_detected, decode_utf8, detect_delimiter,
    generate_column_names, parse_header_fields,
};
use crate::error::Result;
use crate::splitter::{split_fields, split_rows};
use crate::types::{Delimiter, Row, Table};
use crate::validation::{validate_fields_count, validate_has_data, validate_row_fields};
use tracing::debug;

/// A parsed table plus what was detected on the way
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub table: Table,
    pub delimiter: Delimiter,
    pub charset: &'static str,
}

/// Turns delimited text into a typed table
#[derive(Debug, Clone, Copy, Default)]
pub struct TableImporter {
    options: ImportOptions,
}

impl TableImporter {
    pub fn new(options: ImportOptions) -> Self {
        TableImporter { options }
    }

    /// Parse text into a table
    pub fn import_text(&self, text: &str) -> Result<Table> {
        self.import_text_detailed(text).map(|outcome| outcome.table)
    }

    /// Decode bytes, then parse them into a table
    pub fn import_bytes(&self, data: &[u8]) -> Result<Table> {
        self.import_bytes_detailed(data).map(|outcome| outcome.table)
    }

    pub fn import_bytes_detailed(&self, data: &[u8]) -> Result<ImportOutcome> {
        let (text, charset) = if self.options.detect_charset {
            decode_detected(data)
        } else {
            (decode_utf8(data), "UTF-8")
        };

        let mut outcome = self.import_text_detailed(&text)?;
        outcome.charset = charset;
        Ok(outcome)
    }

    pub fn import_text_detailed(&self, text: &str) -> Result<ImportOutcome> {
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        validate_has_data(text)?;

        let rows = split_rows(text);
        let delimiter = detect_delimiter(&rows, self.options.confidence_rows)?;

        validate_fields_count(count_fields(&rows[0], delimiter))?;

        let first_fields = split_fields(&rows[0], delimiter);
        let (field_names, body_start) = if self.options.has_header_row {
            (parse_header_fields(&first_fields, 1)?, 1)
        } else {
            (generate_column_names(first_fields.len())?, 0)
        };

        debug!(
            %delimiter,
            columns = field_names.len(),
            rows = rows.len() - body_start,
            has_header = self.options.has_header_row,
            "importing table"
        );

        let body = rows[body_start..]
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                parse_body_row(row, delimiter, field_names.len(), body_start + idx + 1)
            })
            .collect::<Result<Vec<Row>>>()?;

        Ok(ImportOutcome {
            table: Table::new(field_names, body),
            delimiter,
            charset: "UTF-8",
        })
    }
}

/// Split a body row and coerce each field; `row_num` is 1-based
fn parse_body_row(
    row: &str,
    delimiter: Delimiter,
    expected: usize,
    row_num: usize,
) -> Result<Row> {
    let fields = split_fields(row, delimiter);
    validate_row_fields(row_num, expected, fields.len())?;

    fields
        .iter()
        .map(|field| coerce_value(field, row_num))
        .collect()
}

/// Parse text into a table with default options
pub fn import_table(text: &str, has_header_row: bool) -> Result<Table> {
    TableImporter::new(ImportOptions::new(has_header_row)).import_text(text)
}

/// Decode UTF-8 bytes and parse them into a table with default options
pub fn import_table_bytes(data: &[u8], has_header_row: bool) -> Result<Table> {
    TableImporter::new(ImportOptions::new(has_header_row)).import_bytes(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CsvCodecError;
    use crate::types::constants::MAX_FIELDS;
    use crate::types::FieldValue;

    fn strings(values: &[&str]) -> Row {
        values.iter().map(|&v| FieldValue::from(v)).collect()
    }

    #[test]
    fn test_import_with_header() {
        let table = import_table("field1,field2\nvalue1,value2", true).unwrap();
        assert_eq!(table.field_names, vec!["field1", "field2"]);
        assert_eq!(table.rows, vec![strings(&["value1", "value2"])]);
    }

    #[test]
    fn test_import_without_header() {
        let table = import_table("value1,value2", false).unwrap();
        assert_eq!(table.field_names, vec!["A", "B"]);
        assert_eq!(table.rows, vec![strings(&["value1", "value2"])]);
    }

    #[test]
    fn test_import_header_only() {
        let table = import_table("a,b\n", true).unwrap();
        assert_eq!(table.field_names, vec!["a", "b"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_import_typed_values() {
        let text = "name\tage\tactive\tnote\n\"007\"\t42\tTRUE\t\n";
        let table = import_table(text, true).unwrap();
        assert_eq!(
            table.rows[0],
            vec![
                FieldValue::from("007"),
                FieldValue::Number(42.0),
                FieldValue::Boolean(true),
                FieldValue::Null,
            ]
        );
    }

    #[test]
    fn test_import_quoted_newline_is_one_row() {
        let table = import_table("id,note\n1,\"line1\nline2\"\n2,x", true).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][1], FieldValue::from("line1\nline2"));
    }

    #[test]
    fn test_import_quoted_header() {
        let table = import_table("\"first, name\",\" age \"\nbob,3", true).unwrap();
        assert_eq!(table.field_names, vec!["first, name", " age "]);
    }

    #[test]
    fn test_import_empty_is_no_data() {
        assert!(matches!(import_table("", true), Err(CsvCodecError::NoData)));
        assert!(matches!(import_table(" \n\t\r\n", false), Err(CsvCodecError::NoData)));
        assert!(matches!(import_table("\u{FEFF}", true), Err(CsvCodecError::NoData)));
    }

    #[test]
    fn test_import_too_many_fields() {
        let row = vec!["x"; MAX_FIELDS + 1].join(",");
        let text = format!("{}\n{}", row, row);
        let err = import_table(&text, true).unwrap_err();
        assert!(matches!(err, CsvCodecError::TooManyFields { count: 257, .. }));

        let row = vec!["x"; MAX_FIELDS].join(",");
        assert_eq!(import_table(&row, false).unwrap().column_count(), MAX_FIELDS);
    }

    #[test]
    fn test_import_field_count_mismatch() {
        // Past the delimiter sample, so comma stays chosen
        let mut lines = vec!["a,b,c".to_string()];
        lines.extend((0..11).map(|i| format!("{},{},{}", i, i, i)));
        lines.push("7,8".to_string());

        let err = import_table(&lines.join("\n"), true).unwrap_err();
        assert!(matches!(
            err,
            CsvCodecError::FieldCountMismatch {
                row: 13,
                expected: 3,
                found: 2
            }
        ));
        assert_eq!(err.row(), Some(13));
    }

    #[test]
    fn test_import_short_row_inside_sample_switches_delimiter() {
        // Comma fails on row 3 while tab holds, so the rows are single-column
        let table = import_table("a,b\n1,2\n3", true).unwrap();
        assert_eq!(table.field_names, vec!["a,b"]);
        assert_eq!(table.rows[0], strings(&["1,2"]));
        assert_eq!(table.rows[1], vec![FieldValue::Number(3.0)]);
    }

    #[test]
    fn test_import_unclosed_quote_in_body() {
        let text = "a,b\n1,\"2";
        let err = import_table(text, true).unwrap_err();
        assert!(matches!(err, CsvCodecError::UnstructuredData(_)));
    }

    #[test]
    fn test_import_unclosed_quote_in_header() {
        let err = import_table("\"a,b\n", true).unwrap_err();
        assert!(matches!(err, CsvCodecError::UnstructuredData(_)));
    }

    #[test]
    fn test_import_strips_bom() {
        let table = import_table("\u{FEFF}x,y\n1,2", true).unwrap();
        assert_eq!(table.field_names, vec!["x", "y"]);
    }

    #[test]
    fn test_import_bytes() {
        let data = b"\xEF\xBB\xBFname,city\nAnn,K\xC3\xB6ln\r\n";
        let table = import_table_bytes(data, true).unwrap();
        assert_eq!(table.field_names, vec!["name", "city"]);
        assert_eq!(table.rows[0], strings(&["Ann", "Köln"]));
    }

    #[test]
    fn test_import_bytes_detected_charset() {
        let importer = TableImporter::new(ImportOptions::default().with_detect_charset(true));
        let mut data = vec![0xFF, 0xFE];
        data.extend("a,b\n1,2".encode_utf16().flat_map(u16::to_le_bytes));

        let outcome = importer.import_bytes_detailed(&data).unwrap();
        assert_eq!(outcome.charset, "UTF-16LE");
        assert_eq!(outcome.delimiter, Delimiter::Comma);
        assert_eq!(
            outcome.table.rows[0],
            vec![FieldValue::Number(1.0), FieldValue::Number(2.0)]
        );
    }

    #[test]
    fn test_import_trailing_blank_line_is_a_row() {
        // Only one trailing line feed is dropped; the blank row breaks comma
        let table = import_table("a,b\n1,2\n\n", true).unwrap();
        assert_eq!(table.field_names, vec!["a,b"]);
        assert_eq!(table.rows, vec![strings(&["1,2"]), vec![FieldValue::Null]]);
    }

    #[test]
    fn test_import_single_column() {
        let outcome = TableImporter::default()
            .import_text_detailed("name\nann\nbob")
            .unwrap();
        assert_eq!(outcome.delimiter, Delimiter::Tab);
        assert_eq!(outcome.table.field_names, vec!["name"]);
        assert_eq!(outcome.table.len(), 2);
    }
}
