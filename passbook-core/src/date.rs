//! Date cells: many conventions, no declared format.

use chrono::NaiveDate;

use crate::table::RawCell;

/// Tried in order; the first format that parses wins.
///
/// Within each group the two-digit-year form comes first: `%y` consumes
/// exactly two digits and fails on a four-digit year, while `%Y` would
/// happily read `24` as the year 24.
const DATE_FORMATS: &[&str] = &[
    // day first
    "%d/%m/%y",
    "%d/%m/%Y",
    "%d-%m-%y",
    "%d-%m-%Y",
    "%d.%m.%y",
    "%d.%m.%Y",
    // ISO
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    // US month first
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%y",
    "%m-%d-%Y",
    // month names
    "%d-%b-%y",
    "%d-%b-%Y",
    "%d/%b/%y",
    "%d/%b/%Y",
    "%d.%b.%y",
    "%d.%b.%Y",
    "%d%b%y",
    "%d%b%Y",
    "%b-%d-%y",
    "%b-%d-%Y",
];

const NULL_MARKERS: &[&str] = &["nan", "none", "nat", "null"];

/// Parse a date cell, ignoring anything after the first whitespace.
///
/// Blank cells and the textual null markers `nan`, `none` and `nat` give `None`.
pub fn resolve_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() || NULL_MARKERS.contains(&trimmed.to_lowercase().as_str()) {
        return None;
    }

    let token = trimmed.split_whitespace().next()?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}

/// Like [`resolve_date`], taking the first element of a list cell.
pub fn resolve_date_cell(cell: &RawCell) -> Option<NaiveDate> {
    resolve_date(&cell.first_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_day_first_wins_when_ambiguous() {
        assert_eq!(resolve_date("01/03/2024"), Some(d(2024, 3, 1)));
        assert_eq!(resolve_date("01-03-2024"), Some(d(2024, 3, 1)));
        assert_eq!(resolve_date("01.03.24"), Some(d(2024, 3, 1)));
        assert_eq!(resolve_date("1/3/24"), Some(d(2024, 3, 1)));
    }

    #[test]
    fn test_iso_and_us_fallbacks() {
        assert_eq!(resolve_date("2024-01-31"), Some(d(2024, 1, 31)));
        assert_eq!(resolve_date("12/31/2024"), Some(d(2024, 12, 31)));
        assert_eq!(resolve_date("02/16/2026"), Some(d(2026, 2, 16)));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(resolve_date("05-Mar-24"), Some(d(2024, 3, 5)));
        assert_eq!(resolve_date("05-MAR-2024"), Some(d(2024, 3, 5)));
        assert_eq!(resolve_date("5/march/2024"), Some(d(2024, 3, 5)));
        assert_eq!(resolve_date("Mar-05-2024"), Some(d(2024, 3, 5)));
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        assert_eq!(resolve_date("  01/03/2024 10:45 AM "), Some(d(2024, 3, 1)));
        assert_eq!(resolve_date("01/03/2024 (02/03/2024)"), Some(d(2024, 3, 1)));
    }

    #[test]
    fn test_absent_values() {
        for v in ["", "   ", "nan", "NaN", "None", "NaT", "Opening", "32/13/2024", "2024"] {
            assert_eq!(resolve_date(v), None, "{v:?}");
        }
    }

    #[test]
    fn test_list_cell_uses_first_element() {
        let cell = RawCell::List(vec!["05-Mar-24".into(), "06-Mar-24".into()]);
        assert_eq!(resolve_date_cell(&cell), Some(d(2024, 3, 5)));
        assert_eq!(resolve_date_cell(&RawCell::Missing), None);
    }
}
