pub mod config;
pub mod detection;
pub mod error;
pub mod exporter;
pub mod importer;
pub mod output;
pub mod splitter;
pub mod types;
pub mod validation;

pub use config::{CodecConfig, ExportOptions, ImportOptions};
pub use error::{CsvCodecError, Result};
pub use exporter::{export_table, export_table_bytes, TableExporter};
pub use importer::{import_table, import_table_bytes, ImportOutcome, TableImporter};
pub use types::{CsvErrorType, Delimiter, FieldValue, Row, Table};
