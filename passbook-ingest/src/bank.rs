//! Guess the issuing bank from statement text.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bank {
    Sbi,
    Hdfc,
    Icici,
    Axis,
    Kotak,
    Yes,
    Unknown,
}

/// Checked in order; the first bank with any keyword in the text wins.
const BANK_KEYWORDS: &[(Bank, &[&str])] = &[
    (Bank::Sbi, &["state bank of india", "sbi"]),
    (Bank::Hdfc, &["hdfc bank"]),
    (Bank::Icici, &["icici bank"]),
    (Bank::Axis, &["axis bank"]),
    (Bank::Kotak, &["kotak bank"]),
    (Bank::Yes, &["yes bank"]),
];

impl Bank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bank::Sbi => "sbi",
            Bank::Hdfc => "hdfc",
            Bank::Icici => "icici",
            Bank::Axis => "axis",
            Bank::Kotak => "kotak",
            Bank::Yes => "yes",
            Bank::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn detect_bank(text: &str) -> Bank {
    let text = text.to_lowercase();
    BANK_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(bank, _)| *bank)
        .unwrap_or(Bank::Unknown)
}
