//! Alias priority table: which header synonyms bind to which canonical field,
//! and how strongly.
//!
//! Priorities only matter relative to each other. When two columns of the
//! same table both look like a date (`Txn Date` and `Value Date`), the one
//! whose alias carries the higher priority keeps the field.

use std::collections::{BTreeMap, HashMap};

use crate::field::CanonicalField;
use crate::header::normalize_header;

const DATE_ALIASES: &[(&str, i32)] = &[
    ("date", 100),
    ("txn date", 95),
    ("transaction date", 95),
    ("tran date", 90),
    ("trans date", 90),
    ("posting date", 80),
    ("post date", 80),
    ("booking date", 75),
    ("value date", 60),
    ("value dt", 55),
    ("date value", 50),
];

const NARRATION_ALIASES: &[(&str, i32)] = &[
    ("narration", 100),
    ("description", 95),
    ("particulars", 95),
    ("transaction particulars", 90),
    ("transaction details", 90),
    ("narration/description", 90),
    ("transaction remarks", 80),
    ("details", 70),
    ("remarks", 60),
];

const INSTRUMENT_ALIASES: &[(&str, i32)] = &[
    ("instrument", 100),
    ("instrument type", 90),
    ("transaction type", 80),
    ("txn type", 80),
    ("transaction mode", 75),
    ("mode", 60),
];

const REF_NO_ALIASES: &[(&str, i32)] = &[
    ("ref_no", 100),
    ("ref no", 100),
    ("reference no", 100),
    ("ref. no", 100),
    ("ref.no", 100),
    ("ref/cheque no", 95),
    ("ref/chequeno", 95),
    ("chq.ref.no", 95),
    ("chq ref no", 95),
    ("utr/reference no", 95),
    ("utr no", 90),
    ("transaction id", 85),
    ("txn id", 85),
    ("cheque no", 80),
    ("chq no", 80),
    ("instrument no", 80),
    ("ref", 60),
];

const DEBIT_ALIASES: &[(&str, i32)] = &[
    ("debit", 100),
    ("debit amount", 95),
    ("withdrawal", 95),
    ("withdrawal amount", 95),
    ("withdrawal amt", 95),
    ("amount withdrawn", 90),
    ("withdrawn", 85),
    ("withdrawals", 85),
    ("debits", 85),
    ("dr", 60),
];

const CREDIT_ALIASES: &[(&str, i32)] = &[
    ("credit", 100),
    ("credit amount", 95),
    ("deposit", 95),
    ("deposit amount", 95),
    ("deposit amt", 95),
    ("amount deposited", 90),
    ("deposits", 85),
    ("credits", 85),
    ("cr", 60),
];

const BALANCE_ALIASES: &[(&str, i32)] = &[
    ("balance", 100),
    ("closing balance", 95),
    ("running balance", 90),
    ("available balance", 85),
    ("balance amount", 85),
    ("balanceamount", 80),
    ("bal", 60),
];

/// Immutable once built; share it behind an `Arc` across pipelines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasPriorityTable {
    entries: BTreeMap<CanonicalField, HashMap<String, i32>>,
}

impl AliasPriorityTable {
    /// A table with no aliases at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table covering the header wording of common Indian and
    /// international bank exports.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        let groups: [(CanonicalField, &[(&str, i32)]); 7] = [
            (CanonicalField::Date, DATE_ALIASES),
            (CanonicalField::Narration, NARRATION_ALIASES),
            (CanonicalField::Instrument, INSTRUMENT_ALIASES),
            (CanonicalField::RefNo, REF_NO_ALIASES),
            (CanonicalField::Debit, DEBIT_ALIASES),
            (CanonicalField::Credit, CREDIT_ALIASES),
            (CanonicalField::Balance, BALANCE_ALIASES),
        ];
        for (field, aliases) in groups {
            for (alias, priority) in aliases {
                table.insert(field, alias, *priority);
            }
        }
        table
    }

    /// Add or overwrite an alias. The alias is normalized before it is stored,
    /// so `"Withdrawal Amt."` and `"withdrawal amt"` are the same entry.
    pub fn insert(&mut self, field: CanonicalField, alias: &str, priority: i32) {
        let key = normalize_header(alias);
        if key.is_empty() {
            return;
        }
        self.entries.entry(field).or_default().insert(key, priority);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_alias(mut self, field: CanonicalField, alias: &str, priority: i32) -> Self {
        self.insert(field, alias, priority);
        self
    }

    /// Priority of `normalized` as an alias of `field`, if it is one.
    pub fn priority(&self, field: CanonicalField, normalized: &str) -> Option<i32> {
        self.entries.get(&field)?.get(normalized).copied()
    }

    /// The field that binds `normalized` most strongly.
    ///
    /// Ties between fields go to the one listed first in [`CanonicalField::ALL`].
    pub fn resolve(&self, normalized: &str) -> Option<(CanonicalField, i32)> {
        if normalized.is_empty() {
            return None;
        }
        let mut best: Option<(CanonicalField, i32)> = None;
        for field in CanonicalField::ALL {
            let Some(priority) = self.priority(field, normalized) else {
                continue;
            };
            match best {
                Some((_, best_priority)) if priority <= best_priority => {}
                _ => best = Some((field, priority)),
            }
        }
        best
    }

    /// True if `normalized` is an alias of any field.
    pub fn is_known(&self, normalized: &str) -> bool {
        !normalized.is_empty() && self.entries.values().any(|m| m.contains_key(normalized))
    }

    /// Number of aliases registered for `field`.
    pub fn alias_count(&self, field: CanonicalField) -> usize {
        self.entries.get(&field).map_or(0, HashMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_covers_every_field() {
        let table = AliasPriorityTable::standard();
        for field in CanonicalField::ALL {
            assert!(table.alias_count(field) > 0, "{field} has no aliases");
            assert_eq!(table.resolve(field.as_str()).map(|(f, _)| f), Some(field));
        }
    }

    #[test]
    fn test_aliases_are_stored_normalized() {
        let table = AliasPriorityTable::standard();
        assert_eq!(
            table.resolve(&normalize_header("Withdrawal Amt.")),
            Some((CanonicalField::Debit, 95))
        );
        assert_eq!(
            table.resolve(&normalize_header("Chq./Ref.No.")),
            Some((CanonicalField::RefNo, 95))
        );
        assert!(table.is_known("particulars"));
        assert!(!table.is_known("amount"));
        assert!(!table.is_known(""));
    }

    #[test]
    fn test_highest_priority_field_wins() {
        let table = AliasPriorityTable::empty()
            .with_alias(CanonicalField::Narration, "details", 40)
            .with_alias(CanonicalField::Instrument, "details", 70);
        assert_eq!(table.resolve("details"), Some((CanonicalField::Instrument, 70)));
    }

    #[test]
    fn test_ties_are_deterministic() {
        let table = AliasPriorityTable::empty()
            .with_alias(CanonicalField::Balance, "amt", 50)
            .with_alias(CanonicalField::Debit, "amt", 50);
        for _ in 0..10 {
            assert_eq!(table.resolve("amt"), Some((CanonicalField::Debit, 50)));
        }
    }

    #[test]
    fn test_insert_overrides_priority() {
        let mut table = AliasPriorityTable::standard();
        table.insert(CanonicalField::Date, "Value Date", 120);
        assert_eq!(table.priority(CanonicalField::Date, "value date"), Some(120));
    }
}
