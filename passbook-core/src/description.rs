//! Human-readable description for a row.

use crate::row::RowFields;
use crate::table::flatten_lines;

/// Columns that contribute to the description, in output order.
const DESCRIPTION_KEYS: [&str; 4] = ["instrument", "narration", "description", "particulars"];

const SEPARATOR: &str = " | ";

/// Used when a row has no descriptive text at all.
pub const NO_DESCRIPTION: &str = "No description";

pub fn build_description(row: &RowFields) -> String {
    let parts: Vec<String> = DESCRIPTION_KEYS
        .iter()
        .filter_map(|key| row.by_key(key))
        .map(flatten_lines)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        parts.join(SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_in_fixed_order() {
        let row = RowFields::from_pairs(&[
            ("particulars", "Grocery"),
            ("narration", "POS 1234\nBIG BAZAAR"),
            ("instrument", "CARD"),
        ]);
        assert_eq!(build_description(&row), "CARD | POS 1234 BIG BAZAAR | Grocery");
    }

    #[test]
    fn test_placeholder_when_nothing_descriptive() {
        let row = RowFields::from_pairs(&[("narration", "  "), ("debit", "10")]);
        assert_eq!(build_description(&row), NO_DESCRIPTION);
    }
}
