//! A cleaned data row viewed through a header mapping.

use crate::field::CanonicalField;
use crate::header::normalize_header;
use crate::mapping::HeaderMapping;
use crate::table::flatten_lines;

/// One cell of a data row, named for the resolvers.
///
/// Mapped columns are named by their canonical field (`debit`, `narration`);
/// unmapped columns keep their normalized header text (`amount`, `value date`)
/// so the name-based fallbacks can still look at them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowField {
    pub key: String,
    pub field: Option<CanonicalField>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowFields {
    entries: Vec<RowField>,
}

impl RowFields {
    /// Pair a cleaned row with the header it belongs to. Cells beyond the
    /// header width are ignored.
    pub fn from_row(mapping: &HeaderMapping, cells: &[String]) -> Self {
        let entries = mapping
            .headers()
            .iter()
            .enumerate()
            .map(|(column, raw)| {
                let field = mapping.field_for_column(column);
                let key = match field {
                    Some(f) => f.as_str().to_string(),
                    None => {
                        let normalized = normalize_header(raw);
                        if normalized.is_empty() {
                            format!("column {}", column + 1)
                        } else {
                            normalized
                        }
                    }
                };
                let value = cells.get(column).map(|c| flatten_lines(c)).unwrap_or_default();
                RowField { key, field, value }
            })
            .collect();
        Self { entries }
    }

    /// Build a row from `(key, value)` pairs. Keys that name a canonical field
    /// are treated as mapped.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let entries = pairs
            .iter()
            .map(|(key, value)| RowField {
                key: key.to_string(),
                field: key.parse().ok(),
                value: flatten_lines(value),
            })
            .collect();
        Self { entries }
    }

    /// Non-blank value of a mapped field.
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.field == Some(field))
            .map(|e| e.value.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Non-blank value of the first column named `key`.
    pub fn by_key(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowField> {
        self.entries.iter()
    }

    /// Every non-blank value in column order.
    pub fn non_blank_values(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|e| e.value.as_str())
            .filter(|v| !v.is_empty())
    }
}
