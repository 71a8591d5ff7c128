//! Row cleanup ahead of field resolution.

use regex::Regex;
use std::sync::LazyLock;

use crate::table::RawCell;

static NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \b(?:opening|closing)\s+balance\b
        | \bstatement\b.*\bperiod\b
        | \baccount\b.*\bnumber\b
        | \bbranch\b.*\bname\b",
    )
    .expect("noise regex")
});

static PAYMENT_METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:neft|rtgs|upi|transfer)").expect("payment method regex"));

/// True for summary and banner rows that carry no transaction, such as
/// `Opening Balance` or `Statement for the period ...`. Text mentioning a
/// payment method is always treated as real data.
pub fn is_noise(text: &str) -> bool {
    let lowered = text.to_lowercase();
    NOISE.is_match(&lowered) && !PAYMENT_METHOD.is_match(&lowered)
}

/// Flatten one raw row to `width` single-line strings.
///
/// Returns `None` for rows with fewer than two non-empty cells and for noise
/// rows. Surviving rows are padded with empty strings or truncated so every
/// row lines up with the header.
pub fn clean_row(row: &[RawCell], width: usize) -> Option<Vec<String>> {
    let mut cells: Vec<String> = row.iter().map(RawCell::to_single_line).collect();

    let non_empty = cells.iter().filter(|c| !c.is_empty()).count();
    if non_empty < 2 {
        return None;
    }

    let text = cells
        .iter()
        .filter(|c| !c.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    if is_noise(&text) {
        return None;
    }

    cells.resize(width, String::new());
    Some(cells)
}
