use crate::config::ExportOptions;
use crate::error::Result;
use crate::types::constants::{QUOTE, ROW_DELIMITER};
use crate::types::{Delimiter, FieldValue, Table};
use crate::validation::validate_table_shape;
use chrono::SecondsFormat;
use tracing::debug;

/// Renders a typed table to delimited text
#[derive(Debug, Clone, Copy, Default)]
pub struct TableExporter {
    options: ExportOptions,
}

impl TableExporter {
    pub fn new(options: ExportOptions) -> Self {
        TableExporter { options }
    }

    /// Render the table. The shape is checked before anything is written.
    pub fn export_text(&self, table: &Table) -> Result<String> {
        validate_table_shape(table)?;

        let delimiter = self.options.delimiter;
        let mut out = String::new();

        if self.options.include_headers {
            for (i, name) in table.field_names.iter().enumerate() {
                if i > 0 {
                    out.push(delimiter.as_char());
                }
                write_text(&mut out, name.trim(), delimiter);
            }
            out.push_str(ROW_DELIMITER);
        }

        for row in &table.rows {
            for (i, value) in row.iter().enumerate() {
                if i > 0 {
                    out.push(delimiter.as_char());
                }
                write_cell(&mut out, value, delimiter);
            }
            out.push_str(ROW_DELIMITER);
        }

        debug!(
            %delimiter,
            rows = table.rows.len(),
            bytes = out.len(),
            "exported table"
        );
        Ok(out)
    }

    /// Render the table as UTF-8 bytes without a byte order mark
    pub fn export_bytes(&self, table: &Table) -> Result<Vec<u8>> {
        self.export_text(table).map(String::into_bytes)
    }
}

/// Append one cell to `out`
pub fn write_cell(out: &mut String, value: &FieldValue, delimiter: Delimiter) {
    match value {
        FieldValue::Null => {}
        FieldValue::String(s) => write_text(out, s, delimiter),
        FieldValue::Number(n) => out.push_str(&format_number(*n)),
        FieldValue::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        FieldValue::Timestamp(ts) => {
            out.push_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
    }
}

/// Append text, quoted if it holds a quote, the delimiter, CR or LF
fn write_text(out: &mut String, text: &str, delimiter: Delimiter) {
    if !needs_quoting(text, delimiter) {
        out.push_str(text);
        return;
    }

    out.push(QUOTE);
    for c in text.chars() {
        if c == QUOTE {
            out.push(QUOTE);
        }
        out.push(c);
    }
    out.push(QUOTE);
}

pub fn needs_quoting(text: &str, delimiter: Delimiter) -> bool {
    let delim = delimiter.as_char();
    text.chars()
        .any(|c| c == QUOTE || c == delim || c == '\n' || c == '\r')
}

/// Shortest decimal form; integral values have no fraction.
/// Plain decimal notation is kept at every magnitude, so `1e21` prints all its digits.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Render a table with default options and the given delimiter
pub fn export_table(
    table: &Table,
    include_headers: bool,
    delimiter: Delimiter,
) -> Result<String> {
    TableExporter::new(ExportOptions::new(include_headers, delimiter)).export_text(table)
}

/// Render a table to UTF-8 bytes
pub fn export_table_bytes(
    table: &Table,
    include_headers: bool,
    delimiter: Delimiter,
) -> Result<Vec<u8>> {
    TableExporter::new(ExportOptions::new(include_headers, delimiter)).export_bytes(table)
}
