//! Which path a document takes, decided by its file extension alone.

use std::fmt;
use std::path::Path;

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Single table, first row is the header.
    Csv,
    /// Multi-page, multi-table document read through a table extractor.
    Pdf,
}

impl DocumentFormat {
    pub fn from_filename(filename: &str) -> Result<Self, ParseError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(DocumentFormat::Csv),
            "pdf" => Ok(DocumentFormat::Pdf),
            _ => Err(ParseError::UnsupportedFileType { extension }),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Csv => f.write_str("csv"),
            DocumentFormat::Pdf => f.write_str("pdf"),
        }
    }
}
