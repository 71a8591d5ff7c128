//! Boundary collaborators: table extraction, text extraction and OCR.
//!
//! The pipeline only ever sees raw grids. Getting those grids out of a PDF
//! is somebody else's job, so each collaborator is a trait with a few
//! concrete implementations that shell out or read pre-extracted dumps.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use passbook_core::Document;
use tracing::debug;

use crate::error::ParseError;

/// Turns document bytes into pages of raw tables.
pub trait TableExtractor {
    fn extract_tables(&self, bytes: &[u8]) -> Result<Document, ParseError>;
}

/// Reads bytes that already are a JSON table dump:
/// `{"pages": [{"tables": [{"rows": [["Date", "Narration", ...], ...]}]}]}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTableExtractor;

impl TableExtractor for JsonTableExtractor {
    fn extract_tables(&self, bytes: &[u8]) -> Result<Document, ParseError> {
        let mut doc: Document = serde_json::from_slice(bytes)?;
        doc.stamp_positions();
        Ok(doc)
    }
}

/// Hands back a document the caller extracted earlier, whatever the bytes.
#[derive(Debug, Clone, Default)]
pub struct PreExtracted(pub Document);

impl TableExtractor for PreExtracted {
    fn extract_tables(&self, _bytes: &[u8]) -> Result<Document, ParseError> {
        let mut doc = self.0.clone();
        doc.stamp_positions();
        Ok(doc)
    }
}

/// Runs an external program (a pdfplumber or camelot wrapper, say) on a
/// temporary copy of the PDF. The program gets the file path as its last
/// argument and must print a JSON table dump on stdout.
#[derive(Debug, Clone)]
pub struct CommandTableExtractor {
    program: String,
    args: Vec<String>,
}

impl CommandTableExtractor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl TableExtractor for CommandTableExtractor {
    fn extract_tables(&self, bytes: &[u8]) -> Result<Document, ParseError> {
        let program = locate(&self.program).map_err(ParseError::extraction)?;

        let mut file = tempfile::Builder::new()
            .prefix("passbook-")
            .suffix(".pdf")
            .tempfile()?;
        std::io::Write::write_all(&mut file, bytes)?;

        debug!(program = %program.display(), "running table extractor");
        let output = Command::new(&program)
            .args(&self.args)
            .arg(file.path())
            .output()?;

        if !output.status.success() {
            return Err(ParseError::extraction(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        JsonTableExtractor.extract_tables(&output.stdout)
    }
}

/// Pulls the embedded text layer out of a document, one string per page.
pub trait TextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ParseError>;
}

/// Text layer via the `pdf-extract` crate. Pages are split on form feeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ParseError> {
        let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| ParseError::TextExtraction {
            message: e.to_string(),
        })?;
        Ok(text.split('\u{c}').map(str::to_string).collect())
    }
}

/// Converts rendered pages to text for documents without a text layer.
pub trait OcrEngine {
    fn recognize(&self, bytes: &[u8]) -> Result<Vec<String>, ParseError>;
}

/// OCR through the `pdftoppm` and `tesseract` command-line tools.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    pub tesseract: String,
    pub pdftoppm: String,
    pub language: String,
    pub dpi: u32,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self {
            tesseract: "tesseract".to_string(),
            pdftoppm: "pdftoppm".to_string(),
            language: "eng".to_string(),
            dpi: 300,
        }
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, bytes: &[u8]) -> Result<Vec<String>, ParseError> {
        let pdftoppm = locate(&self.pdftoppm).map_err(ParseError::ocr)?;
        let tesseract = locate(&self.tesseract).map_err(ParseError::ocr)?;

        let dir = tempfile::tempdir()?;
        let input = dir.path().join("document.pdf");
        fs::write(&input, bytes)?;

        let status = Command::new(&pdftoppm)
            .args(["-r", &self.dpi.to_string(), "-png"])
            .arg(&input)
            .arg(dir.path().join("page"))
            .status()?;
        if !status.success() {
            return Err(ParseError::ocr(format!("{} exited with {status}", self.pdftoppm)));
        }

        let images = rendered_pages(dir.path())?;
        debug!(pages = images.len(), "running OCR");

        let mut pages = Vec::with_capacity(images.len());
        for image in images {
            let output = Command::new(&tesseract)
                .arg(&image)
                .arg("stdout")
                .args(["-l", &self.language])
                .output()?;
            if !output.status.success() {
                return Err(ParseError::ocr(format!(
                    "{} failed on {}: {}",
                    self.tesseract,
                    image.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                )));
            }
            pages.push(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        Ok(pages)
    }
}

/// `pdftoppm` zero-pads page numbers to a common width, so name order is
/// page order.
fn rendered_pages(dir: &Path) -> Result<Vec<PathBuf>, ParseError> {
    let mut images: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
        .collect();
    images.sort();
    Ok(images)
}

fn locate(program: &str) -> Result<PathBuf, String> {
    which::which(program).map_err(|e| format!("{program} not found on PATH: {e}"))
}
