use anyhow::{Context, Result, bail};
use passbook_core::{Document, TransactionRecord};
use passbook_ingest::{
    DocumentFormat, ExportFormat, JsonTableExtractor, ParseError, ParsePipeline, PdfTextExtractor, PreExtracted,
    TableExtractor, preview_lines, retrieve_text, write_records,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;

const PREVIEW_LINES: usize = 20;

/// Where PDF tables come from for this run.
type SharedExtractor = Arc<dyn TableExtractor + Send + Sync>;

pub struct ParseOptions {
    pub files: Vec<PathBuf>,
    pub format: ExportFormat,
    pub output: Option<PathBuf>,
    pub tables: Option<PathBuf>,
}

pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<Vec<TransactionRecord>>,
}

pub async fn run(opts: ParseOptions, cfg: &Config) -> Result<()> {
    if opts.files.is_empty() {
        bail!("no input files");
    }

    let extractor = table_source(&opts, cfg)?;
    let pipeline = ParsePipeline::new(&cfg.pipeline);
    let outcomes = parse_files(opts.files, pipeline, extractor).await?;

    let mut records = Vec::new();
    let mut failed = 0usize;
    for outcome in outcomes {
        match outcome.result {
            Ok(found) => {
                eprintln!("{}: {} transactions", outcome.path.display(), found.len());
                records.extend(found);
            }
            Err(e) => {
                failed += 1;
                eprintln!("{}: {}", outcome.path.display(), user_message(&e));
                if is_no_transactions(&e) {
                    print_preview(&outcome.path);
                }
            }
        }
    }

    if !records.is_empty() {
        write_output(opts.format, opts.output.as_deref(), &records)?;
    }

    if failed > 0 {
        bail!("{failed} file(s) could not be parsed");
    }
    Ok(())
}

/// `--tables` wins over the configured extractor command. Only one PDF may
/// be given with `--tables`, since the dump describes a single document.
fn table_source(opts: &ParseOptions, cfg: &Config) -> Result<Option<SharedExtractor>> {
    if let Some(dump) = &opts.tables {
        let pdfs = opts
            .files
            .iter()
            .filter(|p| matches!(format_of(p), Ok(DocumentFormat::Pdf)))
            .count();
        if pdfs > 1 {
            bail!("--tables describes one document, but {pdfs} PDFs were given");
        }

        let bytes = fs::read(dump).with_context(|| format!("read {}", dump.display()))?;
        let document: Document = JsonTableExtractor
            .extract_tables(&bytes)
            .with_context(|| format!("load table dump {}", dump.display()))?;
        debug!(tables = document.table_count(), "loaded table dump");
        return Ok(Some(Arc::new(PreExtracted(document))));
    }

    Ok(cfg
        .extractor
        .table_extractor()
        .map(|e| Arc::new(e) as SharedExtractor))
}

/// Each file runs on the blocking pool with its own pipeline clone.
/// Outcomes come back in input order.
pub async fn parse_files(
    files: Vec<PathBuf>,
    pipeline: ParsePipeline,
    extractor: Option<SharedExtractor>,
) -> Result<Vec<FileOutcome>> {
    let handles: Vec<_> = files
        .into_iter()
        .map(|path| {
            let pipeline = pipeline.clone();
            let extractor = extractor.clone();
            let task = tokio::task::spawn_blocking({
                let path = path.clone();
                move || parse_one(&pipeline, &path, extractor.as_deref())
            });
            (path, task)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (path, task) in handles {
        let result = task
            .await
            .with_context(|| format!("parser task for {} failed", path.display()))?;
        outcomes.push(FileOutcome { path, result });
    }
    Ok(outcomes)
}

fn parse_one(
    pipeline: &ParsePipeline,
    path: &Path,
    extractor: Option<&(dyn TableExtractor + Send + Sync)>,
) -> Result<Vec<TransactionRecord>> {
    let filename = file_name(path);
    let format = DocumentFormat::from_filename(&filename)?;

    let records = match (format, extractor) {
        (DocumentFormat::Pdf, None) => bail!(
            "no table extractor for {filename}: set [extractor] command in the config or pass --tables DUMP.json"
        ),
        (DocumentFormat::Pdf, Some(tables)) => {
            let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
            pipeline.parse_file(&bytes, &filename, tables)?
        }
        (DocumentFormat::Csv, _) => {
            let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
            pipeline.parse_file(&bytes, &filename, &JsonTableExtractor)?
        }
    };

    info!(file = %path.display(), records = records.len(), "file parsed");
    Ok(records)
}

fn write_output(format: ExportFormat, output: Option<&Path>, records: &[TransactionRecord]) -> Result<()> {
    match output {
        Some(path) => {
            let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
            let mut out = std::io::BufWriter::new(file);
            write_records(format, records, &mut out)?;
            out.flush().with_context(|| format!("write {}", path.display()))?;
            eprintln!("Wrote {} transactions to {}", records.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_records(format, records, stdout.lock())?;
        }
    }
    Ok(())
}

/// First lines of whatever text the file holds, to show the user why
/// nothing was found.
fn print_preview(path: &Path) {
    let text = match raw_text(path) {
        Ok(text) => text,
        Err(e) => {
            debug!(file = %path.display(), error = %e, "no text preview");
            return;
        }
    };
    let lines = preview_lines(&text, PREVIEW_LINES);
    if lines.is_empty() {
        return;
    }
    eprintln!("First {} lines of {}:", lines.len(), path.display());
    for line in lines {
        eprintln!("  | {line}");
    }
}

fn raw_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    match format_of(path)? {
        DocumentFormat::Csv => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        DocumentFormat::Pdf => Ok(retrieve_text(&bytes, &PdfTextExtractor, None)?),
    }
}

fn format_of(path: &Path) -> Result<DocumentFormat, ParseError> {
    DocumentFormat::from_filename(&file_name(path))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_no_transactions(e: &anyhow::Error) -> bool {
    matches!(e.downcast_ref::<ParseError>(), Some(ParseError::NoTransactions { .. }))
}

pub fn user_message(e: &anyhow::Error) -> String {
    match e.downcast_ref::<ParseError>() {
        Some(parse) => parse.user_message(),
        None => format!("{e:#}"),
    }
}
