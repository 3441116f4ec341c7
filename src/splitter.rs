//! Split text into logical rows and rows into fields.
//!
//! Both splitters cut eagerly on the separator, then walk the pieces and glue
//! back together any run that was cut inside a quoted section.

use crate::detection::quote::contains_unclosed_quote;
use crate::types::Delimiter;
use std::borrow::Cow;
use tracing::debug;

/// Split raw text into logical rows.
///
/// One trailing line feed is dropped. Pieces are cut on `\n` and lose a
/// trailing `\r`. A piece left inside an open quote is joined with the
/// following pieces (with `\n`) until the quote closes or input runs out.
pub fn split_rows(text: &str) -> Vec<Cow<'_, str>> {
    let text = text.strip_suffix('\n').unwrap_or(text);

    let mut pieces = text.split('\n');
    let mut rows = Vec::new();

    while let Some(piece) = pieces.next() {
        if !contains_unclosed_quote(piece) {
            rows.push(Cow::Borrowed(trim_cr(piece)));
            continue;
        }

        let mut merged = piece.to_string();
        let mut closed = false;
        for next in pieces.by_ref() {
            merged.push('\n');
            merged.push_str(next);
            if !contains_unclosed_quote(&merged) {
                closed = true;
                break;
            }
        }
        if !closed {
            debug!(row = rows.len() + 1, "quote left open at end of input");
        }

        let trimmed_len = trim_cr(&merged).len();
        merged.truncate(trimmed_len);
        rows.push(Cow::Owned(merged));
    }

    rows
}

/// Split one logical row into raw fields on `delimiter`.
///
/// A piece left inside an open quote is joined with the following pieces
/// (with the delimiter) until the joined text, trimmed, ends on a closing
/// quote, or the row runs out.
pub fn split_fields(row: &str, delimiter: Delimiter) -> Vec<Cow<'_, str>> {
    let delim = delimiter.as_char();
    let mut pieces = row.split(delim);
    let mut fields = Vec::new();

    while let Some(piece) = pieces.next() {
        if !contains_unclosed_quote(piece) {
            fields.push(Cow::Borrowed(piece));
            continue;
        }

        let mut merged = piece.to_string();
        for next in pieces.by_ref() {
            merged.push(delim);
            merged.push_str(next);
            if merged.trim_end().ends_with('"') && !contains_unclosed_quote(&merged) {
                break;
            }
        }
        fields.push(Cow::Owned(merged));
    }

    fields
}

fn trim_cr(s: &str) -> &str {
    s.strip_suffix('\r').unwrap_or(s)
}
