use crate::error::{CsvCodecError, Result};
use crate::types::constants::DELIMITER_CONFIDENCE_ROWS;
use crate::types::Delimiter;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Options for turning delimited text into a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Treat the first logical row as column names
    pub has_header_row: bool,
    /// Rows sampled before differing delimiter counts are trusted
    pub confidence_rows: usize,
    /// Sniff the encoding of byte input instead of assuming UTF-8
    pub detect_charset: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            has_header_row: true,
            confidence_rows: DELIMITER_CONFIDENCE_ROWS,
            detect_charset: false,
        }
    }
}

impl ImportOptions {
    pub fn new(has_header_row: bool) -> Self {
        ImportOptions {
            has_header_row,
            ..Default::default()
        }
    }

    pub fn with_confidence_rows(mut self, rows: usize) -> Self {
        self.confidence_rows = rows;
        self
    }

    pub fn with_detect_charset(mut self, detect: bool) -> Self {
        self.detect_charset = detect;
        self
    }
}

/// Options for rendering a table to delimited text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub include_headers: bool,
    pub delimiter: Delimiter,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            include_headers: true,
            delimiter: Delimiter::Tab,
        }
    }
}

impl ExportOptions {
    pub fn new(include_headers: bool, delimiter: Delimiter) -> Self {
        ExportOptions {
            include_headers,
            delimiter,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecConfig {
    pub import: ImportOptions,
    pub export: ExportOptions,
}

impl CodecConfig {
    /// Load configuration from environment variables.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CodecConfig::default();

        if let Some(v) = lookup("CSVCODEC_HAS_HEADER") {
            config.import.has_header_row = parse_bool("CSVCODEC_HAS_HEADER", &v)?;
        }
        if let Some(v) = lookup("CSVCODEC_CONFIDENCE_ROWS") {
            config.import.confidence_rows = parse_count("CSVCODEC_CONFIDENCE_ROWS", &v)?;
        }
        if let Some(v) = lookup("CSVCODEC_DETECT_CHARSET") {
            config.import.detect_charset = parse_bool("CSVCODEC_DETECT_CHARSET", &v)?;
        }
        if let Some(v) = lookup("CSVCODEC_INCLUDE_HEADERS") {
            config.export.include_headers = parse_bool("CSVCODEC_INCLUDE_HEADERS", &v)?;
        }
        if let Some(v) = lookup("CSVCODEC_DELIMITER") {
            config.export.delimiter = v.parse()?;
        }

        Ok(config)
    }

    /// Load configuration from an INI-style config file.
    /// Reads the [IMPORT] and [EXPORT] sections; missing keys keep defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            CsvCodecError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let sections = parse_sections(&content);
        let mut config = CodecConfig::default();

        if let Some(import) = sections.get("IMPORT") {
            if let Some(v) = import.get("HAS_HEADER") {
                config.import.has_header_row = parse_bool("HAS_HEADER", v)?;
            }
            if let Some(v) = import.get("CONFIDENCE_ROWS") {
                config.import.confidence_rows = parse_count("CONFIDENCE_ROWS", v)?;
            }
            if let Some(v) = import.get("DETECT_CHARSET") {
                config.import.detect_charset = parse_bool("DETECT_CHARSET", v)?;
            }
        }

        if let Some(export) = sections.get("EXPORT") {
            if let Some(v) = export.get("INCLUDE_HEADERS") {
                config.export.include_headers = parse_bool("INCLUDE_HEADERS", v)?;
            }
            if let Some(v) = export.get("DELIMITER") {
                config.export.delimiter = v.parse()?;
            }
        }

        Ok(config)
    }
}

/// Split INI text into upper-cased sections of upper-cased keys
fn parse_sections(content: &str) -> HashMap<String, HashMap<String, String>> {
    let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut current_section = String::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            current_section = line[1..line.len() - 1].trim().to_uppercase();
            sections.entry(current_section.clone()).or_default();
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            if let Some(section) = sections.get_mut(&current_section) {
                let value = value.trim().trim_matches('"').trim_matches('\'');
                section.insert(key.trim().to_uppercase(), value.to_string());
            }
        }
    }

    sections
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(CsvCodecError::ConfigError(format!(
            "{} must be true or false, got \"{}\"",
            key, other
        ))),
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CsvCodecError::ConfigError(format!(
            "{} must be a positive number, got \"{}\"",
            key, value
        ))),
    }
}
