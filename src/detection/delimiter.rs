use crate::detection::quote::find_close_quote;
use crate::error::{CsvCodecError, Result};
use crate::types::constants::FIELD_DELIMS;
use crate::types::Delimiter;
use memchr::memchr2;
use tracing::debug;

/// Detect the field delimiter of a set of logical rows.
///
/// Each candidate's field count on row 0 is its baseline. Rows are then
/// compared against the baseline; a candidate fails on its first differing
/// row. The first row on which exactly one candidate fails decides for the
/// other one. Both failing on the same row means no delimiter is consistent.
///
/// After `confidence_rows` rows with no failure, differing baselines are
/// trusted and the higher count wins. Equal baselines keep scanning to the
/// end. Ties go to tab, so single-column data still gets a delimiter.
pub fn detect_delimiter<S: AsRef<str>>(rows: &[S], confidence_rows: usize) -> Result<Delimiter> {
    let first = rows
        .first()
        .ok_or_else(|| CsvCodecError::UnstructuredData("no rows to inspect".to_string()))?;

    let baseline = FIELD_DELIMS.map(|d| count_fields(first.as_ref(), d));
    let mut failed = [false; FIELD_DELIMS.len()];

    for (idx, row) in rows.iter().enumerate().skip(1) {
        if idx >= confidence_rows && baseline[0] != baseline[1] {
            break;
        }

        for (i, &delim) in FIELD_DELIMS.iter().enumerate() {
            if !failed[i] && count_fields(row.as_ref(), delim) != baseline[i] {
                failed[i] = true;
            }
        }

        match failed {
            [true, true] => {
                return Err(CsvCodecError::UnstructuredData(format!(
                    "field counts are inconsistent for every delimiter at row {}",
                    idx + 1
                )));
            }
            [true, false] => {
                debug!(row = idx + 1, "comma field count changed, choosing tab");
                return Ok(FIELD_DELIMS[1]);
            }
            [false, true] => {
                debug!(row = idx + 1, "tab field count changed, choosing comma");
                return Ok(FIELD_DELIMS[0]);
            }
            [false, false] => {}
        }
    }

    let chosen = if baseline[0] > baseline[1] {
        FIELD_DELIMS[0]
    } else {
        FIELD_DELIMS[1]
    };
    debug!(
        comma_fields = baseline[0],
        tab_fields = baseline[1],
        %chosen,
        "no delimiter failed, choosing by field count"
    );
    Ok(chosen)
}

/// Count fields in a row, ignoring delimiters inside quotes.
/// An unterminated quote swallows the rest of the row.
pub fn count_fields(row: &str, delimiter: Delimiter) -> usize {
    let bytes = row.as_bytes();
    let delim = delimiter.as_byte();
    let mut count = 1;
    let mut pos = 0;

    while let Some(offset) = memchr2(delim, b'"', &bytes[pos..]) {
        let at = pos + offset;
        if bytes[at] == b'"' {
            match find_close_quote(row, at + 1) {
                Some(close) => pos = close + 1,
                None => break,
            }
        } else {
            count += 1;
            pos = at + 1;
        }
    }

    count
}
