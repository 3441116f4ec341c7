use crate::error::{CsvCodecError, Result};
use memchr::memchr;

const QUOTE: u8 = b'"';

/// Find the next quote at or after `from`, which must be outside quotes.
pub fn find_open_quote(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes().get(from..)?;
    memchr(QUOTE, bytes).map(|pos| from + pos)
}

/// Find the quote closing a quoted section whose content starts at `from`.
///
/// Quotes come in runs. A run of even length is escaped content (`""` is a
/// literal quote); in a run of odd length the last quote closes the section.
/// Returns `None` for an unterminated section.
pub fn find_close_quote(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut pos = from;

    loop {
        let start = pos + memchr(QUOTE, bytes.get(pos..)?)?;
        let run = bytes[start..].iter().take_while(|&&b| b == QUOTE).count();
        let end = start + run;

        if run % 2 == 1 {
            return Some(end - 1);
        }
        pos = end;
    }
}

/// True if scanning `text` from outside quotes ends inside an open quote.
pub fn contains_unclosed_quote(text: &str) -> bool {
    let mut pos = 0;
    while let Some(open) = find_open_quote(text, pos) {
        match find_close_quote(text, open + 1) {
            Some(close) => pos = close + 1,
            None => return true,
        }
    }
    false
}

/// Replace escaped `""` with `"`
pub fn unescape_quotes(text: &str) -> String {
    text.replace("\"\"", "\"")
}

/// Strip one layer of surrounding quotes from already-trimmed `text`.
///
/// Returns `Ok(None)` if `text` does not start with a quote. An opening quote
/// that is never closed is unstructured data in the 1-based `row`. Anything
/// after the closing quote is dropped.
pub fn unwrap_quoted(text: &str, row: usize) -> Result<Option<String>> {
    if !text.starts_with('"') {
        return Ok(None);
    }
    let close = find_close_quote(text, 1).ok_or_else(|| {
        CsvCodecError::UnstructuredData(format!("missing closing quote in row {}", row))
    })?;
    Ok(Some(unescape_quotes(&text[1..close])))
}
