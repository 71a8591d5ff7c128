//! Resolve a header row to canonical fields.

use std::collections::BTreeMap;

use crate::aliases::AliasPriorityTable;
use crate::field::CanonicalField;
use crate::header::normalize_header;

/// Which column currently holds a field, and how strongly it was bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub column: usize,
    pub raw: String,
    pub priority: i32,
}

/// Partial mapping from header columns to canonical fields.
///
/// Each field is bound to at most one column. Columns are tracked by
/// position so repeated header text (two `Amount` columns) stays unambiguous.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderMapping {
    headers: Vec<String>,
    bindings: BTreeMap<CanonicalField, FieldBinding>,
}

impl HeaderMapping {
    /// Raw header text, one entry per column.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// True when no field could be mapped; such a table is unusable.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn get(&self, field: CanonicalField) -> Option<&FieldBinding> {
        self.bindings.get(&field)
    }

    pub fn column(&self, field: CanonicalField) -> Option<usize> {
        self.bindings.get(&field).map(|b| b.column)
    }

    pub fn field_for_column(&self, column: usize) -> Option<CanonicalField> {
        self.bindings
            .iter()
            .find(|(_, b)| b.column == column)
            .map(|(f, _)| *f)
    }

    pub fn field_for_header(&self, raw: &str) -> Option<CanonicalField> {
        self.bindings
            .iter()
            .find(|(_, b)| b.raw == raw)
            .map(|(f, _)| *f)
    }

    /// Mapped fields in canonical order.
    pub fn fields(&self) -> impl Iterator<Item = (CanonicalField, &FieldBinding)> {
        self.bindings.iter().map(|(f, b)| (*f, b))
    }
}

/// Map raw header cells to canonical fields.
///
/// A column binds to the field for which its normalized text has the highest
/// alias priority. A later column takes over a field that is already bound
/// only if its priority is strictly greater; the displaced column is left
/// unmapped. The outcome is the same whatever order the competing columns
/// appear in, as long as their priorities differ.
pub fn map_headers<S: AsRef<str>>(aliases: &AliasPriorityTable, headers: &[S]) -> HeaderMapping {
    let mut bindings: BTreeMap<CanonicalField, FieldBinding> = BTreeMap::new();

    for (column, raw) in headers.iter().enumerate() {
        let raw = raw.as_ref();
        let normalized = normalize_header(raw);
        if normalized.is_empty() {
            continue;
        }
        let Some((field, priority)) = aliases.resolve(&normalized) else {
            continue;
        };

        match bindings.get(&field) {
            Some(existing) if priority <= existing.priority => {}
            _ => {
                bindings.insert(
                    field,
                    FieldBinding {
                        column,
                        raw: raw.to_string(),
                        priority,
                    },
                );
            }
        }
    }

    HeaderMapping {
        headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
        bindings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> AliasPriorityTable {
        AliasPriorityTable::standard()
    }

    #[test]
    fn test_maps_simple_header() {
        let mapping = map_headers(&standard(), &["Date", "Particulars", "Debit", "Credit", "Balance"]);
        assert_eq!(mapping.len(), 5);
        assert_eq!(mapping.column(CanonicalField::Date), Some(0));
        assert_eq!(mapping.column(CanonicalField::Narration), Some(1));
        assert_eq!(mapping.column(CanonicalField::Debit), Some(2));
        assert_eq!(mapping.column(CanonicalField::Credit), Some(3));
        assert_eq!(mapping.column(CanonicalField::Balance), Some(4));
        assert_eq!(mapping.field_for_header("Particulars"), Some(CanonicalField::Narration));
    }

    #[test]
    fn test_unknown_and_blank_headers_are_skipped() {
        let mapping = map_headers(&standard(), &["", "Amount", "Txn Date", "  "]);
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.width(), 4);
        assert_eq!(mapping.field_for_column(2), Some(CanonicalField::Date));
        assert_eq!(mapping.field_for_column(1), None);
    }

    #[test]
    fn test_no_mapping_is_empty() {
        let mapping = map_headers(&standard(), &["Foo", "Bar", "Baz"]);
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_priority_is_order_independent() {
        let forward = map_headers(&standard(), &["Value Date", "Txn Date", "Narration"]);
        let backward = map_headers(&standard(), &["Narration", "Txn Date", "Value Date"]);
        assert_eq!(forward.get(CanonicalField::Date).unwrap().raw, "Txn Date");
        assert_eq!(backward.get(CanonicalField::Date).unwrap().raw, "Txn Date");
        // The displaced column no longer maps anywhere.
        assert_eq!(forward.field_for_header("Value Date"), None);
    }

    #[test]
    fn test_equal_priority_keeps_first() {
        let mapping = map_headers(&standard(), &["Description", "Particulars"]);
        assert_eq!(mapping.column(CanonicalField::Narration), Some(0));
    }

    #[test]
    fn test_duplicate_header_text_binds_first_column() {
        let mapping = map_headers(&standard(), &["Date", "Amount", "Date"]);
        assert_eq!(mapping.column(CanonicalField::Date), Some(0));
        assert_eq!(mapping.field_for_column(2), None);
    }
}
