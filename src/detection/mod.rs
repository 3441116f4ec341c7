pub mod charset;
pub mod datatype;
pub mod datetime;
pub mod delimiter;
pub mod header;
pub mod quote;

pub use charset::{decode_detected, decode_utf8, detect_charset};
pub use datatype::coerce_value;
pub use datetime::{could_be_datetime, parse_timestamp};
pub use delimiter::{count_fields, detect_delimiter};
pub use header::{generate_column_names, parse_header_fields};
pub use quote::{contains_unclosed_quote, find_close_quote, find_open_quote};
