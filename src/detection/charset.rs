use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;
use tracing::warn;

/// Allow guessing UTF-8 encoding
const ALLOW_UTF8: bool = true;

/// Decode bytes as UTF-8, dropping a UTF-8 byte order mark and replacing
/// malformed sequences with U+FFFD.
pub fn decode_utf8(data: &[u8]) -> Cow<'_, str> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(data);
    if had_errors {
        warn!("input is not valid UTF-8, malformed sequences were replaced");
    }
    text
}

/// Detect the character encoding of the given data.
/// A byte order mark wins; otherwise valid UTF-8 is UTF-8 and anything
/// else is left to chardetng.
pub fn detect_charset(data: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(data) {
        return encoding;
    }

    if std::str::from_utf8(data).is_ok() {
        return UTF_8;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    detector.guess(None, ALLOW_UTF8)
}

/// Decode bytes in the detected encoding, stripping its byte order mark.
/// Returns the text and the encoding name.
pub fn decode_detected(data: &[u8]) -> (Cow<'_, str>, &'static str) {
    let encoding = detect_charset(data);
    let (text, had_errors) = encoding.decode_with_bom_removal(data);
    if had_errors {
        warn!(charset = encoding.name(), "malformed sequences were replaced");
    }
    (text, encoding.name())
}
