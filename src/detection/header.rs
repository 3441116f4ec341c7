use crate::detection::quote::unwrap_quoted;
use crate::error::{CsvCodecError, Result};
use crate::types::constants::MAX_COLUMN_NAMES;
use crate::validation::validate_header_field;

/// Parse the fields of a header row into column names.
///
/// Each field is trimmed, unwrapped from one layer of quotes and unescaped.
/// Names longer than the header-field limit are rejected.
pub fn parse_header_fields<S: AsRef<str>>(fields: &[S], row: usize) -> Result<Vec<String>> {
    fields
        .iter()
        .enumerate()
        .map(|(col_idx, field)| {
            let trimmed = field.as_ref().trim();
            let name = match unwrap_quoted(trimmed, row)? {
                Some(unquoted) => unquoted,
                None => trimmed.to_string(),
            };
            validate_header_field(&name, col_idx + 1)?;
            Ok(name)
        })
        .collect()
}

/// Generate spreadsheet-style column names: A..Z, AA..AZ, BA.. up to ZZ.
pub fn generate_column_names(count: usize) -> Result<Vec<String>> {
    if count > MAX_COLUMN_NAMES {
        return Err(CsvCodecError::ColumnNameLimit {
            requested: count,
            max: MAX_COLUMN_NAMES,
        });
    }

    let mut names: Vec<String> = Vec::with_capacity(count);
    let mut current = String::new();
    for _ in 0..count {
        current = next_column_name(&current);
        names.push(current.clone());
    }
    Ok(names)
}

/// Name following `name`; the caller keeps `name` below "ZZ".
fn next_column_name(name: &str) -> String {
    let letters: Vec<u8> = name.bytes().collect();
    match letters.as_slice() {
        [] => "A".to_string(),
        [b'Z'] => "AA".to_string(),
        [c] => char::from(c + 1).to_string(),
        [first, b'Z'] => format!("{}A", char::from(first + 1)),
        [first, second] => format!("{}{}", char::from(*first), char::from(second + 1)),
        _ => unreachable!("column names never exceed two letters"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::constants::MAX_HEADER_FIELD_LEN;

    #[test]
    fn test_generate_one() {
        assert_eq!(generate_column_names(1).unwrap(), vec!["A"]);
        assert!(generate_column_names(0).unwrap().is_empty());
    }

    #[test]
    fn test_generate_boundaries() {
        let names = generate_column_names(26).unwrap();
        assert_eq!(names.last().unwrap(), "Z");

        let names = generate_column_names(27).unwrap();
        assert_eq!(names.last().unwrap(), "AA");

        let names = generate_column_names(53).unwrap();
        assert_eq!(names[51], "AZ");
        assert_eq!(names.last().unwrap(), "BA");
    }

    #[test]
    fn test_generate_all() {
        let names = generate_column_names(702).unwrap();
        assert_eq!(names.last().unwrap(), "ZZ");

        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 702);
    }

    #[test]
    fn test_generate_beyond_limit() {
        let err = generate_column_names(703).unwrap_err();
        assert!(matches!(
            err,
            CsvCodecError::ColumnNameLimit {
                requested: 703,
                max: 702
            }
        ));
    }

    #[test]
    fn test_parse_header_fields() {
        let fields = vec![" name ", r#""e-mail""#, r#""say ""hi""""#, ""];
        let names = parse_header_fields(&fields, 1).unwrap();
        assert_eq!(names, vec!["name", "e-mail", r#"say "hi""#, ""]);
    }

    #[test]
    fn test_parse_header_unclosed_quote() {
        let fields = vec!["a", r#""b"#];
        let err = parse_header_fields(&fields, 1).unwrap_err();
        assert!(matches!(err, CsvCodecError::UnstructuredData(_)));
    }

    #[test]
    fn test_parse_header_too_long() {
        let ok = "x".repeat(MAX_HEADER_FIELD_LEN);
        assert!(parse_header_fields(&[ok.as_str()], 1).is_ok());

        let long = "x".repeat(MAX_HEADER_FIELD_LEN + 1);
        let err = parse_header_fields(&[long.as_str()], 1).unwrap_err();
        assert!(matches!(err, CsvCodecError::UnstructuredData(_)));
    }
}
