//! Errors surfaced to callers of the ingestion pipeline.
//!
//! Row- and table-level defects never show up here: they are logged and
//! skipped. What remains is either a rejection the user can act on
//! (unsupported file, no transactions, malformed CSV) or a technical failure
//! of a collaborator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported file type: .{extension}. Only PDF or CSV allowed.")]
    UnsupportedFileType { extension: String },

    #[error("No transactions found in {filename}. The statement layout may not be supported.")]
    NoTransactions { filename: String },

    #[error("Failed to parse CSV: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    #[error("CSV file is empty")]
    EmptyCsv,

    #[error("Document is {size} bytes, larger than the {limit} byte limit")]
    DocumentTooLarge { size: usize, limit: usize },

    #[error("Table extraction failed: {message}")]
    Extraction { message: String },

    #[error("Text extraction failed: {message}")]
    TextExtraction { message: String },

    #[error("OCR failed: {message}")]
    Ocr { message: String },

    #[error("Failed to write records: {message}")]
    Export { message: String },

    #[error("Invalid table dump: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    pub fn ocr(message: impl Into<String>) -> Self {
        Self::Ocr {
            message: message.into(),
        }
    }

    /// True for rejections caused by the document itself, as opposed to a
    /// failing extractor, OCR engine or file system.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ParseError::UnsupportedFileType { .. }
                | ParseError::NoTransactions { .. }
                | ParseError::Csv { .. }
                | ParseError::EmptyCsv
                | ParseError::DocumentTooLarge { .. }
        )
    }

    /// Text to show an end user. Rejections explain themselves; anything else
    /// is reported as a processing failure.
    pub fn user_message(&self) -> String {
        if self.is_rejection() {
            self.to_string()
        } else {
            format!("Failed to process document: {self}")
        }
    }
}

impl From<csv::Error> for ParseError {
    fn from(source: csv::Error) -> Self {
        Self::Csv { source }
    }
}
