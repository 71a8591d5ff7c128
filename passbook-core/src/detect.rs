//! Find the header row inside a raw table.
//!
//! PDF extractors rarely put the header on row 0: titles, account blocks and
//! page banners come first. Each candidate row is scored by the share of its
//! non-empty cells that are known aliases.

use crate::aliases::AliasPriorityTable;
use crate::header::normalize_header;
use crate::table::RawCell;

/// Minimum confidence for a row to count as a header.
pub const DEFAULT_HEADER_THRESHOLD: f64 = 0.6;

/// Rows narrower than this are never headers.
const MIN_HEADER_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderDetection {
    pub row: usize,
    pub confidence: f64,
}

/// Header confidence of a single row, or `None` if the row is not eligible
/// (fewer than three columns, or nothing but blanks).
pub fn score_row(aliases: &AliasPriorityTable, row: &[RawCell]) -> Option<f64> {
    if row.len() < MIN_HEADER_COLUMNS {
        return None;
    }

    let mut non_empty = 0usize;
    let mut known = 0usize;
    for cell in row {
        let text = cell.to_single_line();
        if text.is_empty() {
            continue;
        }
        non_empty += 1;
        if aliases.is_known(&normalize_header(&text)) {
            known += 1;
        }
    }

    if non_empty == 0 {
        return None;
    }
    Some(known as f64 / non_empty as f64)
}

/// Pick the most header-like row whose confidence reaches `threshold`.
///
/// Earlier rows win ties. Returns `None` when no row clears the threshold,
/// even if some row scored better than the rest.
pub fn detect_header_row(
    aliases: &AliasPriorityTable,
    rows: &[Vec<RawCell>],
    threshold: f64,
) -> Option<HeaderDetection> {
    let mut best: Option<HeaderDetection> = None;

    for (i, row) in rows.iter().enumerate() {
        let Some(confidence) = score_row(aliases, row) else {
            continue;
        };
        if confidence < threshold {
            continue;
        }
        match best {
            Some(b) if confidence <= b.confidence => {}
            _ => {
                best = Some(HeaderDetection {
                    row: i,
                    confidence,
                })
            }
        }
    }

    best
}
