//! passbook-ingest: turn statement files into transaction records.
//!
//! [`ParsePipeline`] drives the heuristics from `passbook-core` over whole
//! documents. Everything that touches PDFs (table extraction, the text
//! layer, OCR) sits behind the traits in [`extract`].

pub mod bank;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod format;
pub mod pipeline;
pub mod text;

pub use bank::{Bank, detect_bank};
pub use config::{DEFAULT_MAX_DOCUMENT_BYTES, PipelineConfig};
pub use error::ParseError;
pub use export::{ExportFormat, write_csv, write_json, write_records};
pub use extract::{
    CommandTableExtractor, JsonTableExtractor, OcrEngine, PdfTextExtractor, PreExtracted, TableExtractor,
    TesseractOcr, TextExtractor,
};
pub use format::DocumentFormat;
pub use pipeline::ParsePipeline;
pub use text::{preview_lines, retrieve_text};
