//! Reference-number extraction.
//!
//! A mapped `ref_no` column is trusted as-is. Otherwise the row text is
//! searched with a cascade of patterns, most specific first; the first
//! pattern that captures a code containing a digit decides the result.

use regex::Regex;

use crate::field::CanonicalField;
use crate::row::RowFields;

const STANDARD_RULES: &[(&str, &str)] = &[
    (
        "network_alnum",
        r"(?i)\b(?:UPI|IMPS|NEFT|RTGS)(?:[/:\-\s]+(?:CR|DR|P2A|P2M))?[/:\-\s]+([A-Z0-9]{8,})",
    ),
    ("network_numeric", r"(?i)\b(?:UPI|IMPS|NEFT|RTGS)\D{0,20}?(\d{10,})"),
    (
        "generic_ref",
        r"(?i)\b(?:REF|UTR|TXN)(?:\s*(?:NO|ID|NUM|NUMBER))?\b[.:#/\-\s]*([A-Z0-9]{6,})",
    ),
    ("cheque", r"(?i)\b(?:CHQ|CHEQUE|CHK)(?:\s*NO)?[.:#/\-\s]*(\d{4,})"),
    ("long_digits", r"(\d{12,})"),
    ("prefixed_code", r"\b([A-Za-z]{3,}\d{8,})\b"),
    ("digits", r"(\d{10,})"),
];

#[derive(Debug, Clone)]
pub struct ReferenceRule {
    name: &'static str,
    pattern: Regex,
}

impl ReferenceRule {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// First capture, left to right, that contains a digit. Plain words
    /// after a network or `REF` prefix are not codes.
    pub fn find(&self, haystack: &str) -> Option<String> {
        self.pattern
            .captures_iter(haystack)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .find(|code| code.bytes().any(|b| b.is_ascii_digit()))
            .map(str::to_string)
    }
}

/// Build once and share; the compiled cascade is immutable.
#[derive(Debug, Clone)]
pub struct ReferenceExtractor {
    rules: Vec<ReferenceRule>,
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::standard()
    }
}

impl ReferenceExtractor {
    /// The built-in cascade: payment-network codes, then REF/UTR/TXN codes,
    /// cheque numbers, and finally bare long digit runs.
    pub fn standard() -> Self {
        let rules = STANDARD_RULES
            .iter()
            .map(|(name, pattern)| ReferenceRule {
                name,
                pattern: Regex::new(pattern).expect("reference pattern"),
            })
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[ReferenceRule] {
        &self.rules
    }

    /// Reference for a row: the mapped `ref_no` value, else the first
    /// cascade hit over every non-blank value plus the description.
    pub fn extract(&self, row: &RowFields, description: &str) -> Option<String> {
        if let Some(direct) = row.get(CanonicalField::RefNo) {
            return Some(direct.trim().to_string());
        }

        let mut blob: Vec<&str> = row.non_blank_values().collect();
        if !description.trim().is_empty() {
            blob.push(description);
        }
        self.search(&blob.join(" "))
    }

    /// Run the cascade over free text.
    pub fn search(&self, text: &str) -> Option<String> {
        self.rules.iter().find_map(|rule| rule.find(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ReferenceExtractor {
        ReferenceExtractor::standard()
    }

    #[test]
    fn test_direct_ref_column_wins() {
        let row = RowFields::from_pairs(&[("ref_no", " CHQ-000123 "), ("narration", "UPI/123456789012")]);
        assert_eq!(extractor().extract(&row, "UPI/123456789012").as_deref(), Some("CHQ-000123"));
    }

    #[test]
    fn test_upi_code_is_stable() {
        let row = RowFields::from_pairs(&[("narration", "UPI/CR/987654321098/JohnDoe")]);
        let ex = extractor();
        let first = ex.extract(&row, "UPI/CR/987654321098/JohnDoe");
        assert_eq!(first.as_deref(), Some("987654321098"));
        for _ in 0..5 {
            assert_eq!(ex.extract(&row, "UPI/CR/987654321098/JohnDoe"), first);
        }
    }

    #[test]
    fn test_network_codes() {
        let ex = extractor();
        assert_eq!(ex.search("NEFT-HDFCN52024030112345-ACME LTD").as_deref(), Some("HDFCN52024030112345"));
        assert_eq!(ex.search("IMPS P2A 412345678901 JOHN").as_deref(), Some("412345678901"));
        assert_eq!(ex.search("By RTGS: 1234 5678901234").as_deref(), Some("5678901234"));
    }

    #[test]
    fn test_generic_and_cheque() {
        let ex = extractor();
        assert_eq!(ex.search("Payment REF NO: AB12CD34 thanks").as_deref(), Some("AB12CD34"));
        assert_eq!(ex.search("UTR#N123456789").as_deref(), Some("N123456789"));
        assert_eq!(ex.search("CHQ NO 004512 deposited").as_deref(), Some("004512"));
    }

    #[test]
    fn test_bare_digit_fallbacks() {
        let ex = extractor();
        assert_eq!(ex.search("ATM WDL 123456789012345 MG ROAD").as_deref(), Some("123456789012345"));
        assert_eq!(ex.search("POS HDFC12345678 STORE").as_deref(), Some("HDFC12345678"));
        assert_eq!(ex.search("Bill pay 9876543210").as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_no_match_is_absent() {
        let row = RowFields::from_pairs(&[("narration", "Cash deposit"), ("credit", "500")]);
        assert_eq!(extractor().extract(&row, "Cash deposit"), None);
    }

    #[test]
    fn test_words_are_not_codes() {
        let refs = extractor();
        let cases = [
            ("NEFT TRANSFER FROM ACME 123456789012", Some("123456789012")),
            ("Cash deposit reference 123456789012", Some("123456789012")),
            ("Refurbished phone 123456789012", Some("123456789012")),
            ("UPI Collection 412345678901", Some("412345678901")),
            ("NEFT TRANSFER FROM ACME", None),
            ("Refund for order", None),
        ];
        for (text, want) in cases {
            assert_eq!(refs.search(text).as_deref(), want, "{text:?}");
        }
    }
}
