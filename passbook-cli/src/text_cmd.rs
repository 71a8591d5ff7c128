use anyhow::{Context, Result};
use passbook_ingest::{Bank, DocumentFormat, OcrEngine, PdfTextExtractor, detect_bank, retrieve_text};
use std::fs;
use std::path::Path;

use crate::config::Config;

/// Print a document's text and the bank it appears to come from.
pub fn run(path: &Path, ocr: bool, cfg: &Config) -> Result<()> {
    let (text, bank) = document_text(path, ocr, cfg)?;
    println!("{}", text.trim_end());
    eprintln!("Detected bank: {bank}");
    Ok(())
}

pub fn document_text(path: &Path, ocr: bool, cfg: &Config) -> Result<(String, Bank)> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;

    let text = match DocumentFormat::from_filename(&filename)? {
        DocumentFormat::Csv => String::from_utf8_lossy(&bytes).into_owned(),
        DocumentFormat::Pdf => {
            let engine = cfg.ocr.engine();
            let ocr: Option<&dyn OcrEngine> = if ocr { Some(&engine) } else { None };
            retrieve_text(&bytes, &PdfTextExtractor, ocr)
                .with_context(|| format!("extract text from {}", path.display()))?
        }
    };

    let bank = detect_bank(&text);
    Ok((text, bank))
}
