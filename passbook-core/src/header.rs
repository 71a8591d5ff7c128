//! Header text canonicalization.
//!
//! Banks decorate the same column name in many ways: `Withdrawal Amt.`,
//! `WITHDRAWAL AMT (INR)`, `Withdrawal\nAmt`. Everything that is matched
//! against the alias table goes through [`normalize_header`] first.

use regex::Regex;
use std::sync::LazyLock;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)?").expect("parenthetical regex"));

/// Canonicalize a raw header cell.
///
/// Lower-cases, drops parenthetical suffixes, removes punctuation other than
/// dots, collapses whitespace and trims trailing dots and spaces. Blank input
/// gives the empty string, which never matches an alias. Applying it twice is
/// the same as applying it once.
pub fn normalize_header(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let lowered = raw.to_lowercase();
    let without_parens = PARENTHETICAL.replace_all(&lowered, " ");

    let kept: String = without_parens
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '.' || *c == '_')
        .collect();

    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.trim_end_matches(['.', ' ']).to_string()
}
