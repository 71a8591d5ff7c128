//! Debit, credit and balance resolution.
//!
//! The direct path reads the mapped `debit`, `credit` and `balance` columns.
//! When neither debit nor credit is there, the other numeric columns are
//! scanned and each value is put through an ordered chain of [`SideRule`]s
//! until one of them can tell which side of the ledger it belongs to.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::field::CanonicalField;
use crate::record::ResolvedAmounts;
use crate::row::RowFields;

const CURRENCY_SYMBOLS: &[char] = &['₹', '$', '€', '£', '¥'];
const ABSENT_MARKERS: &[&str] = &["", "0", "0.0", "nan", "none"];

/// Columns with these words in their name are never read as amounts.
const TEXT_COLUMN_WORDS: &[&str] = &["date", "narration", "description", "particulars"];

/// Parse a money cell.
///
/// Thousands separators, currency symbols and anything that is not a digit,
/// a dot or a minus sign are removed first. Blank and unparseable values are
/// absent, and so are the literal zeros `0` and `0.0`. Other spellings of
/// zero (`0.00`) parse as zero. A trailing minus (`500.00-`) is read as a
/// negative number.
pub fn clean_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim().to_lowercase();
    if ABSENT_MARKERS.contains(&trimmed.as_str()) {
        return None;
    }

    let mut cleaned: String = trimmed
        .chars()
        .filter(|c| *c != ',' && !CURRENCY_SYMBOLS.contains(c))
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.len() > 1 && cleaned.ends_with('-') && !cleaned.starts_with('-') {
        cleaned.pop();
        cleaned.insert(0, '-');
    }

    if ABSENT_MARKERS.contains(&cleaned.as_str()) {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Debit,
    Credit,
}

/// One link of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideRule {
    /// The column name says `debit` or `credit` outright.
    ColumnKeyword,
    /// The column name carries `dr` without `cr`, or the other way round.
    ColumnAbbreviation,
    /// The row description reads like a payment (`to `, `paid to`, ` dr `)
    /// or a receipt (` cr `). The description is padded with a space on each
    /// side, so a marker at either end counts (`ATM WDL DR`, `Sent to`).
    DescriptionMarker,
    /// An `amount` column whose sign decides the side.
    SignedAmount,
}

impl SideRule {
    /// Classify `value` found in column `column` of a row described by
    /// `description`. `None` passes the value on to the next rule.
    pub fn classify(&self, column: &str, value: Decimal, description: &str) -> Option<Side> {
        let column = column.to_lowercase();
        match self {
            SideRule::ColumnKeyword => {
                if column.contains("debit") {
                    Some(Side::Debit)
                } else if column.contains("credit") {
                    Some(Side::Credit)
                } else {
                    None
                }
            }
            SideRule::ColumnAbbreviation => {
                let dr = column.contains("dr");
                let cr = column.contains("cr");
                match (dr, cr) {
                    (true, false) => Some(Side::Debit),
                    (false, true) => Some(Side::Credit),
                    _ => None,
                }
            }
            SideRule::DescriptionMarker => {
                let text = format!(" {} ", description.to_lowercase());
                if ["to ", "paid to", " dr "].iter().any(|m| text.contains(m)) {
                    Some(Side::Debit)
                } else if text.contains(" cr ") {
                    Some(Side::Credit)
                } else {
                    None
                }
            }
            SideRule::SignedAmount => {
                if !column.contains("amount") {
                    None
                } else if value.is_sign_negative() {
                    Some(Side::Debit)
                } else {
                    Some(Side::Credit)
                }
            }
        }
    }
}

/// Resolves the money columns of a row. Build once and share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountResolver {
    rules: Vec<SideRule>,
}

impl Default for AmountResolver {
    fn default() -> Self {
        Self::standard()
    }
}

impl AmountResolver {
    /// Column keyword, then column abbreviation, then description markers.
    pub fn standard() -> Self {
        Self::with_rules(vec![
            SideRule::ColumnKeyword,
            SideRule::ColumnAbbreviation,
            SideRule::DescriptionMarker,
        ])
    }

    pub fn with_rules(rules: Vec<SideRule>) -> Self {
        Self { rules }
    }

    /// Append [`SideRule::SignedAmount`] as the last resort.
    pub fn with_signed_amount_fallback(mut self) -> Self {
        if !self.rules.contains(&SideRule::SignedAmount) {
            self.rules.push(SideRule::SignedAmount);
        }
        self
    }

    pub fn rules(&self) -> &[SideRule] {
        &self.rules
    }

    /// Resolve debit, credit and balance. `None` when neither a debit nor a
    /// credit can be found, which rejects the row.
    pub fn resolve(&self, row: &RowFields, description: &str) -> Option<ResolvedAmounts> {
        let mut amounts = ResolvedAmounts {
            debit: row.get(CanonicalField::Debit).and_then(clean_amount),
            credit: row.get(CanonicalField::Credit).and_then(clean_amount),
            balance: row.get(CanonicalField::Balance).and_then(clean_amount),
        };

        if amounts.debit.is_none() && amounts.credit.is_none() {
            let (side, value) = self.scan_other_columns(row, description)?;
            match side {
                Side::Debit => amounts.debit = Some(value),
                Side::Credit => amounts.credit = Some(value),
            }
        }

        Some(amounts)
    }

    fn scan_other_columns(&self, row: &RowFields, description: &str) -> Option<(Side, Decimal)> {
        for entry in row.iter() {
            // Money fields were already read on the direct path.
            if entry.field.is_some_and(|f| f.is_monetary()) {
                continue;
            }
            if TEXT_COLUMN_WORDS.iter().any(|w| entry.key.contains(w)) {
                continue;
            }
            let Some(value) = clean_amount(&entry.value).filter(|v| !v.is_zero()) else {
                continue;
            };

            for rule in &self.rules {
                if let Some(side) = rule.classify(&entry.key, value, description) {
                    let value = if *rule == SideRule::SignedAmount {
                        value.abs()
                    } else {
                        value
                    };
                    return Some((side, value));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_clean_amount_strips_formatting() {
        assert_eq!(clean_amount("1,500.00"), Some(dec("1500.00")));
        assert_eq!(clean_amount("₹ 12,34,567.50"), Some(dec("1234567.50")));
        assert_eq!(clean_amount("$-42.10"), Some(dec("-42.10")));
        assert_eq!(clean_amount("500.00 Dr"), Some(dec("500.00")));
        assert_eq!(clean_amount("250.00-"), Some(dec("-250.00")));
    }

    #[test]
    fn test_clean_amount_absent_values() {
        for v in ["", "  ", "0", "0.0", "nan", "None", "-", "abc", "1.2.3"] {
            assert_eq!(clean_amount(v), None, "{v:?}");
        }
    }

    #[test]
    fn test_other_zero_spellings_parse_as_zero() {
        assert_eq!(clean_amount("0.00"), Some(Decimal::ZERO));
        assert_eq!(clean_amount("₹0.00"), Some(Decimal::ZERO));

        let row = RowFields::from_pairs(&[("debit", "0.00"), ("credit", "500.00")]);
        let amounts = AmountResolver::standard().resolve(&row, "Refund").unwrap();
        assert_eq!(amounts.debit, Some(Decimal::ZERO));
        assert_eq!(amounts.credit, Some(dec("500.00")));
        assert_eq!(amounts.signed_amount(), Some(dec("500.00")));
    }

    #[test]
    fn test_fallback_skips_zero_values() {
        let row = RowFields::from_pairs(&[("withdrawal dr", "0.00"), ("deposit cr", "40")]);
        let amounts = AmountResolver::standard().resolve(&row, "x").unwrap();
        assert_eq!(amounts.debit, None);
        assert_eq!(amounts.credit, Some(dec("40")));
    }

    #[test]
    fn test_direct_columns() {
        let row = RowFields::from_pairs(&[
            ("date", "01/03/2024"),
            ("narration", "Paid to Shop"),
            ("debit", "500"),
            ("credit", ""),
            ("balance", "1500"),
        ]);
        let amounts = AmountResolver::standard().resolve(&row, "Paid to Shop").unwrap();
        assert_eq!(amounts.debit, Some(dec("500")));
        assert_eq!(amounts.credit, None);
        assert_eq!(amounts.balance, Some(dec("1500")));
        assert_eq!(amounts.signed_amount(), Some(dec("-500")));
    }

    #[test]
    fn test_fallback_by_column_name() {
        let resolver = AmountResolver::standard();

        let row = RowFields::from_pairs(&[("withdrawal dr", "75"), ("narration", "ATM")]);
        let amounts = resolver.resolve(&row, "ATM").unwrap();
        assert_eq!(amounts.debit, Some(dec("75")));

        let row = RowFields::from_pairs(&[("amount cr", "1,000")]);
        let amounts = resolver.resolve(&row, "Refund").unwrap();
        assert_eq!(amounts.credit, Some(dec("1000")));

        // "debit" takes precedence over the abbreviation check.
        let row = RowFields::from_pairs(&[("debit cr", "10")]);
        assert_eq!(resolver.resolve(&row, "x").unwrap().debit, Some(dec("10")));
    }

    #[test]
    fn test_fallback_by_description() {
        let resolver = AmountResolver::standard();
        let row = RowFields::from_pairs(&[("amount", "250")]);

        let amounts = resolver.resolve(&row, "Paid to Grocer").unwrap();
        assert_eq!(amounts.debit, Some(dec("250")));

        let amounts = resolver.resolve(&row, "IMPS 1234 CR").unwrap();
        assert_eq!(amounts.credit, Some(dec("250")));

        assert_eq!(resolver.resolve(&row, "Salary"), None);
    }

    #[test]
    fn test_fallback_skips_text_and_unclassified_columns() {
        let row = RowFields::from_pairs(&[
            ("value date", "20240301"),
            ("narration", "NEFT Salary"),
            ("amount", "900"),
            ("withdrawal dr", "120"),
        ]);
        let amounts = AmountResolver::standard().resolve(&row, "NEFT Salary").unwrap();
        // "amount" cannot be classified, so the scan moves on.
        assert_eq!(amounts.debit, Some(dec("120")));
        assert_eq!(amounts.credit, None);
    }

    #[test]
    fn test_fallback_scans_instrument_and_ref_columns() {
        let resolver = AmountResolver::standard();

        let row = RowFields::from_pairs(&[("instrument", "1234"), ("narration", "paid to shop")]);
        let amounts = resolver.resolve(&row, "paid to shop").unwrap();
        assert_eq!(amounts.debit, Some(dec("1234")));

        // Column order decides: the ref_no column comes first here.
        let row = RowFields::from_pairs(&[("ref_no", "998877665544"), ("amount", "10")]);
        let amounts = resolver.resolve(&row, "transfer to savings").unwrap();
        assert_eq!(amounts.debit, Some(dec("998877665544")));
    }

    #[test]
    fn test_description_markers_at_either_end() {
        let resolver = AmountResolver::standard();
        let row = RowFields::from_pairs(&[("amount", "300")]);

        assert_eq!(resolver.resolve(&row, "ATM WDL DR").unwrap().debit, Some(dec("300")));
        assert_eq!(resolver.resolve(&row, "NEFT INWARD CR").unwrap().credit, Some(dec("300")));
        assert_eq!(resolver.resolve(&row, "to savings").unwrap().debit, Some(dec("300")));
        // Markers only count as whole words.
        assert_eq!(resolver.resolve(&row, "ADR CRAFTS"), None);
    }

    #[test]
    fn test_signed_amount_fallback_is_opt_in() {
        let row = RowFields::from_pairs(&[("amount", "-50.25"), ("balance", "449.75")]);
        assert_eq!(AmountResolver::standard().resolve(&row, "Test Transaction B"), None);

        let resolver = AmountResolver::standard().with_signed_amount_fallback();
        let amounts = resolver.resolve(&row, "Test Transaction B").unwrap();
        assert_eq!(amounts.debit, Some(dec("50.25")));
        assert_eq!(amounts.signed_amount(), Some(dec("-50.25")));
        assert_eq!(amounts.balance, Some(dec("449.75")));

        let row = RowFields::from_pairs(&[("amount", "100.50")]);
        assert_eq!(resolver.resolve(&row, "Test Transaction A").unwrap().credit, Some(dec("100.50")));
    }

    #[test]
    fn test_no_amount_rejects_row() {
        let row = RowFields::from_pairs(&[("narration", "Closing"), ("balance", "100")]);
        assert_eq!(AmountResolver::standard().resolve(&row, "Closing"), None);
    }
}
