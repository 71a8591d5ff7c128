//! Raw grids as handed over by table extractors and CSV readers.

use serde::{Deserialize, Serialize};

/// One cell of a raw grid.
///
/// Deserializes untagged, so a JSON table dump may use `null`, strings,
/// numbers or short string arrays (some extractors split multi-line cells).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    #[default]
    Missing,
    Text(String),
    Number(f64),
    List(Vec<String>),
}

impl RawCell {
    /// Trimmed, single-line rendering. Missing cells render empty.
    pub fn to_single_line(&self) -> String {
        match self {
            RawCell::Missing => String::new(),
            RawCell::Text(s) => flatten_lines(s),
            RawCell::Number(n) => n.to_string(),
            RawCell::List(items) => flatten_lines(&items.join(" ")),
        }
    }

    /// The first element of a list cell, otherwise the whole cell.
    pub fn first_text(&self) -> String {
        match self {
            RawCell::List(items) => items.first().map(|s| flatten_lines(s)).unwrap_or_default(),
            other => other.to_single_line(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.to_single_line().is_empty()
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        RawCell::Text(s.to_string())
    }
}

impl From<String> for RawCell {
    fn from(s: String) -> Self {
        RawCell::Text(s)
    }
}

impl From<Option<&str>> for RawCell {
    fn from(s: Option<&str>) -> Self {
        s.map_or(RawCell::Missing, RawCell::from)
    }
}

/// Replace embedded line breaks with single spaces and trim.
pub(crate) fn flatten_lines(s: &str) -> String {
    s.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A grid of raw cells plus where it came from (1-based page and table index).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawTable {
    #[serde(default, skip_serializing)]
    pub page: usize,
    #[serde(default, skip_serializing)]
    pub index: usize,
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<RawCell>>) -> Self {
        Self {
            page: 0,
            index: 0,
            rows,
        }
    }

    /// Convenience for tests and callers holding plain strings.
    pub fn from_strings(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|c| RawCell::from(*c)).collect())
                .collect(),
        )
    }

    /// Widest row in the grid.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(default, skip_serializing)]
    pub number: usize,
    #[serde(default)]
    pub tables: Vec<RawTable>,
}

impl Page {
    pub fn new(tables: Vec<RawTable>) -> Self {
        Self { number: 0, tables }
    }
}

/// Everything a table extractor found in one document, in reading order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(pages: Vec<Page>) -> Self {
        let mut doc = Self { pages };
        doc.stamp_positions();
        doc
    }

    /// Number pages and tables by their position in the document.
    pub fn stamp_positions(&mut self) {
        for (p, page) in self.pages.iter_mut().enumerate() {
            page.number = p + 1;
            for (t, table) in page.tables.iter_mut().enumerate() {
                table.page = p + 1;
                table.index = t + 1;
            }
        }
    }

    pub fn table_count(&self) -> usize {
        self.pages.iter().map(|p| p.tables.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_rendering() {
        assert_eq!(RawCell::Missing.to_single_line(), "");
        assert_eq!(RawCell::from("  UPI/CR\n123 \r\n JOHN ").to_single_line(), "UPI/CR 123 JOHN");
        assert_eq!(RawCell::Number(1500.0).to_single_line(), "1500");
        assert_eq!(RawCell::Number(12.5).to_single_line(), "12.5");
        let list = RawCell::List(vec!["01/03/2024".into(), "(02/03/2024)".into()]);
        assert_eq!(list.to_single_line(), "01/03/2024 (02/03/2024)");
        assert_eq!(list.first_text(), "01/03/2024");
    }

    #[test]
    fn test_deserializes_json_dump() {
        let json = r#"{"pages":[{"tables":[{"rows":[["Date",null,3.5,["a","b"]]]}]},{"tables":[]}]}"#;
        let mut doc: Document = serde_json::from_str(json).unwrap();
        doc.stamp_positions();
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.table_count(), 1);
        let table = &doc.pages[0].tables[0];
        assert_eq!((table.page, table.index), (1, 1));
        assert_eq!(
            table.rows[0],
            vec![
                RawCell::from("Date"),
                RawCell::Missing,
                RawCell::Number(3.5),
                RawCell::List(vec!["a".into(), "b".into()]),
            ]
        );
    }
}
