//! Write parsed records out as JSON or CSV.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use passbook_core::TransactionRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

const CSV_COLUMNS: [&str; 7] = ["date", "description", "debit", "credit", "balance", "ref_no", "amount"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => f.write_str("json"),
            ExportFormat::Csv => f.write_str("csv"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format '{other}' (expected json or csv)")),
        }
    }
}

pub fn write_records<W: Write>(
    format: ExportFormat,
    records: &[TransactionRecord],
    out: W,
) -> Result<(), ParseError> {
    match format {
        ExportFormat::Json => write_json(records, out),
        ExportFormat::Csv => write_csv(records, out),
    }
}

/// Pretty-printed JSON array, decimals as strings.
pub fn write_json<W: Write>(records: &[TransactionRecord], mut out: W) -> Result<(), ParseError> {
    serde_json::to_writer_pretty(&mut out, records).map_err(|e| ParseError::Export { message: e.to_string() })?;
    writeln!(out)?;
    Ok(())
}

/// One header line, then one line per record. Absent values are empty cells.
pub fn write_csv<W: Write>(records: &[TransactionRecord], out: W) -> Result<(), ParseError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_COLUMNS).map_err(export_error)?;

    for record in records {
        writer.write_record([
            record.date.format("%Y-%m-%d").to_string(),
            record.description.clone(),
            optional(record.debit),
            optional(record.credit),
            optional(record.balance),
            record.ref_no.clone().unwrap_or_default(),
            record.amount.to_string(),
        ])
        .map_err(export_error)?;
    }

    writer.flush()?;
    Ok(())
}

fn export_error(e: csv::Error) -> ParseError {
    ParseError::Export { message: e.to_string() }
}

fn optional(value: Option<Decimal>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}
