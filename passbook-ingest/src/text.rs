//! Whole-document text retrieval, with OCR as a fallback for scanned PDFs.
//!
//! Not part of transaction parsing; used for bank detection and for showing
//! the user what a document contained when nothing could be parsed.

use tracing::{debug, info};

use crate::error::ParseError;
use crate::extract::{OcrEngine, TextExtractor};

/// Page text joined with newlines. Falls back to `ocr` when the text layer
/// is blank and an engine is available.
pub fn retrieve_text(
    bytes: &[u8],
    extractor: &dyn TextExtractor,
    ocr: Option<&dyn OcrEngine>,
) -> Result<String, ParseError> {
    let text = extractor.extract_pages(bytes)?.join("\n");
    if !text.trim().is_empty() {
        debug!(chars = text.len(), "text layer found");
        return Ok(text);
    }

    match ocr {
        Some(engine) => {
            info!("no text layer, running OCR");
            Ok(engine.recognize(bytes)?.join("\n"))
        }
        None => Ok(text),
    }
}

/// First `n` lines of `text`.
pub fn preview_lines(text: &str, n: usize) -> Vec<&str> {
    text.lines().take(n).collect()
}
