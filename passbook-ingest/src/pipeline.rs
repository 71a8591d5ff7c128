//! Document-level orchestration: CSV and PDF-structured flows.

use std::sync::Arc;

use passbook_core::{
    AliasPriorityTable, AmountResolver, Document, HeaderMapping, RawCell, RawTable, ReferenceExtractor,
    TableAssembler, TransactionRecord, clean_row, detect_header_row, map_headers,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::ParseError;
use crate::extract::TableExtractor;
use crate::format::DocumentFormat;

/// Why a PDF table produced nothing. Logged, never returned.
#[derive(Debug, Error)]
enum TableSkip {
    #[error("table is empty")]
    Empty,
    #[error("no header row detected and no header seen earlier in the document")]
    NoHeader,
}

/// One configured pipeline. Cloning is cheap: the alias table and the
/// resolvers are shared, so parallel documents each take their own clone.
#[derive(Debug, Clone)]
pub struct ParsePipeline {
    aliases: Arc<AliasPriorityTable>,
    amounts: Arc<AmountResolver>,
    references: Arc<ReferenceExtractor>,
    header_threshold: f64,
    max_document_bytes: usize,
}

impl Default for ParsePipeline {
    fn default() -> Self {
        Self::new(&PipelineConfig::default())
    }
}

impl ParsePipeline {
    pub fn new(config: &PipelineConfig) -> Self {
        let amounts = if config.signed_amount_fallback {
            AmountResolver::standard().with_signed_amount_fallback()
        } else {
            AmountResolver::standard()
        };

        Self {
            aliases: Arc::new(config.alias_table()),
            amounts: Arc::new(amounts),
            references: Arc::new(ReferenceExtractor::standard()),
            header_threshold: config.header_threshold,
            max_document_bytes: config.max_document_bytes,
        }
    }

    pub fn aliases(&self) -> &AliasPriorityTable {
        &self.aliases
    }

    /// Entry point: pick the path from the file name, parse, and turn an
    /// empty result into [`ParseError::NoTransactions`].
    ///
    /// `tables` is only consulted for PDFs.
    pub fn parse_file(
        &self,
        bytes: &[u8],
        filename: &str,
        tables: &dyn TableExtractor,
    ) -> Result<Vec<TransactionRecord>, ParseError> {
        let format = DocumentFormat::from_filename(filename)?;

        if bytes.len() > self.max_document_bytes {
            return Err(ParseError::DocumentTooLarge {
                size: bytes.len(),
                limit: self.max_document_bytes,
            });
        }

        let records = match format {
            DocumentFormat::Csv => self.parse_csv(bytes)?,
            DocumentFormat::Pdf => self.parse_pdf(bytes, tables),
        };

        if records.is_empty() {
            return Err(ParseError::NoTransactions {
                filename: filename.to_string(),
            });
        }

        info!(file = filename, %format, records = records.len(), "parsed statement");
        Ok(records)
    }

    /// Single table, first row is the header. If that row maps nothing the
    /// header is searched for further down, as for PDF tables.
    pub fn parse_csv(&self, bytes: &[u8]) -> Result<Vec<TransactionRecord>, ParseError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut grid: Vec<Vec<RawCell>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            grid.push(record.iter().map(RawCell::from).collect());
        }

        let Some(first) = grid.first() else {
            return Err(ParseError::EmptyCsv);
        };

        let mut mapping = self.map_row(first);
        let mut data_start = 1;

        if mapping.is_empty() {
            match detect_header_row(&self.aliases, &grid, self.header_threshold) {
                Some(detection) => {
                    debug!(row = detection.row, confidence = detection.confidence, "csv header found below row 0");
                    mapping = self.map_row(&grid[detection.row]);
                    data_start = detection.row + 1;
                }
                None => {
                    warn!("csv header maps no known field");
                    return Ok(Vec::new());
                }
            }
        }

        Ok(self.assemble_rows(&mapping, &grid[data_start..]))
    }

    /// Extract tables and run them through [`Self::parse_document`]. A
    /// document the extractor cannot open yields no records.
    pub fn parse_pdf(&self, bytes: &[u8], tables: &dyn TableExtractor) -> Vec<TransactionRecord> {
        match tables.extract_tables(bytes) {
            Ok(document) => self.parse_document(&document),
            Err(e) => {
                warn!(error = %e, "table extraction failed");
                Vec::new()
            }
        }
    }

    /// Visit every table in document order, carrying the last detected
    /// header over to tables that have none of their own.
    pub fn parse_document(&self, document: &Document) -> Vec<TransactionRecord> {
        let mut cached: Option<HeaderMapping> = None;
        let mut records = Vec::new();

        for page in &document.pages {
            for table in &page.tables {
                match self.parse_table(table, &mut cached) {
                    Ok(found) => {
                        debug!(page = table.page, table = table.index, records = found.len(), "table parsed");
                        records.extend(found);
                    }
                    Err(skip) => {
                        warn!(page = table.page, table = table.index, reason = %skip, "skipping table");
                    }
                }
            }
        }

        info!(
            pages = document.pages.len(),
            tables = document.table_count(),
            records = records.len(),
            "parsed document"
        );
        records
    }

    fn parse_table(
        &self,
        table: &RawTable,
        cached: &mut Option<HeaderMapping>,
    ) -> Result<Vec<TransactionRecord>, TableSkip> {
        if table.rows.is_empty() {
            return Err(TableSkip::Empty);
        }

        let detected = detect_header_row(&self.aliases, &table.rows, self.header_threshold)
            .map(|d| (d, self.map_row(&table.rows[d.row])))
            .filter(|(_, mapping)| !mapping.is_empty());

        let data_start = match detected {
            Some((detection, mapping)) => {
                debug!(
                    page = table.page,
                    table = table.index,
                    row = detection.row,
                    confidence = detection.confidence,
                    fields = mapping.len(),
                    "header detected"
                );
                *cached = Some(mapping);
                detection.row + 1
            }
            None => {
                debug!(page = table.page, table = table.index, "reusing previous header");
                0
            }
        };

        let mapping = cached.as_ref().ok_or(TableSkip::NoHeader)?;
        Ok(self.assemble_rows(mapping, &table.rows[data_start..]))
    }

    fn map_row(&self, row: &[RawCell]) -> HeaderMapping {
        let headers: Vec<String> = row.iter().map(RawCell::to_single_line).collect();
        map_headers(&self.aliases, &headers)
    }

    fn assemble_rows(&self, mapping: &HeaderMapping, rows: &[Vec<RawCell>]) -> Vec<TransactionRecord> {
        let width = mapping.width();
        let cleaned: Vec<Vec<String>> = rows.iter().filter_map(|row| clean_row(row, width)).collect();
        TableAssembler::new(&self.amounts, &self.references).assemble(mapping, &cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{JsonTableExtractor, PreExtracted};
    use passbook_core::Page;
    use rust_decimal::Decimal;

    fn table(rows: &[&[&str]]) -> RawTable {
        RawTable::from_strings(rows)
    }

    #[test]
    fn test_csv_debit_and_credit_rows() {
        let csv = "Date,Particulars,Debit,Credit,Balance\n\
                   01/03/2024,Paid to Shop,500,,1500\n\
                   01/03/2024,Salary Credit,,50000,51500\n";
        let records = ParsePipeline::default().parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, Decimal::from(-500));
        assert_eq!(records[1].amount, Decimal::from(50000));
    }

    #[test]
    fn test_empty_csv() {
        let err = ParsePipeline::default().parse_csv(b"").unwrap_err();
        assert!(matches!(err, ParseError::EmptyCsv));
    }

    #[test]
    fn test_csv_with_title_rows() {
        let csv = "HDFC BANK Statement,,,,\n\
                   ,,,,\n\
                   Date,Narration,Withdrawal Amt.,Deposit Amt.,Closing Balance\n\
                   05/03/24,ATM WDL,2000,,8000\n";
        let records = ParsePipeline::default().parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].debit, Some(Decimal::from(2000)));
        assert_eq!(records[0].balance, Some(Decimal::from(8000)));
    }

    #[test]
    fn test_header_cache_carries_across_tables() {
        let doc = Document::new(vec![
            Page::new(vec![table(&[
                &["Statement of account", "", ""],
                &["Date", "Narration", "Debit", "Credit", "Balance"],
                &["01/03/2024", "Paid to Shop", "500", "", "1500"],
            ])]),
            Page::new(vec![table(&[
                &["02/03/2024", "Salary", "", "50000", "51500"],
                &["03/03/2024", "Rent", "20000", "", "31500"],
            ])]),
        ]);

        let records = ParsePipeline::default().parse_document(&doc);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].description, "Rent");
    }

    #[test]
    fn test_table_before_any_header_is_skipped() {
        let doc = Document::new(vec![Page::new(vec![
            table(&[&["01/03/2024", "Orphan", "500", "", "1500"]]),
            table(&[
                &["Date", "Narration", "Debit", "Credit", "Balance"],
                &["02/03/2024", "Kept", "10", "", "1490"],
            ]),
        ])]);

        let records = ParsePipeline::default().parse_document(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "Kept");
    }

    #[test]
    fn test_unreadable_pdf_is_no_transactions() {
        let err = ParsePipeline::default()
            .parse_file(b"%PDF-1.4 garbage", "march.pdf", &JsonTableExtractor)
            .unwrap_err();
        assert!(matches!(err, ParseError::NoTransactions { filename } if filename == "march.pdf"));
    }

    #[test]
    fn test_size_limit() {
        let pipeline = ParsePipeline::new(&PipelineConfig {
            max_document_bytes: 8,
            ..PipelineConfig::default()
        });
        let err = pipeline
            .parse_file(b"Date,Narration,Debit\n", "a.csv", &PreExtracted::default())
            .unwrap_err();
        assert!(matches!(err, ParseError::DocumentTooLarge { size: 21, limit: 8 }));
    }
}
