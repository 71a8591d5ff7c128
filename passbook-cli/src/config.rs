use anyhow::{Context, Result};
use passbook_ingest::{CommandTableExtractor, PipelineConfig, TesseractOcr};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_passbook_home;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub extractor: ExtractorSection,
    pub ocr: OcrSection,
}

/// External program that turns a PDF into a JSON table dump.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSection {
    /// e.g. "pdf-tables"; unset means PDFs need `--tables`.
    pub command: Option<String>,
    /// Passed before the PDF path.
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSection {
    pub tesseract: String,
    pub pdftoppm: String,
    pub language: String,
    pub dpi: u32,
}

impl Default for OcrSection {
    fn default() -> Self {
        let engine = TesseractOcr::default();
        Self {
            tesseract: engine.tesseract,
            pdftoppm: engine.pdftoppm,
            language: engine.language,
            dpi: engine.dpi,
        }
    }
}

impl ExtractorSection {
    pub fn table_extractor(&self) -> Option<CommandTableExtractor> {
        self.command
            .as_ref()
            .map(|program| CommandTableExtractor::new(program.clone(), self.args.clone()))
    }
}

impl OcrSection {
    pub fn engine(&self) -> TesseractOcr {
        TesseractOcr {
            tesseract: self.tesseract.clone(),
            pdftoppm: self.pdftoppm.clone(),
            language: self.language.clone(),
            dpi: self.dpi,
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(ensure_passbook_home()?.join("config.toml"))
}

/// `--config` if given, otherwise `~/.passbook/config.toml`.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => default_config_path(),
    }
}

/// A missing file means defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

pub fn show_config(path: &Path) -> Result<()> {
    let cfg = load_config(path)?;
    let source = if path.exists() { "" } else { " (not found, showing defaults)" };
    println!("# {}{}", path.display(), source);
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}
