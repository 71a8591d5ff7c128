//! Canonical transaction attributes a raw column can map to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Date,
    Narration,
    Instrument,
    RefNo,
    Debit,
    Credit,
    Balance,
}

impl CanonicalField {
    /// Every field, in the order used to break alias priority ties.
    pub const ALL: [CanonicalField; 7] = [
        CanonicalField::Date,
        CanonicalField::Narration,
        CanonicalField::Instrument,
        CanonicalField::RefNo,
        CanonicalField::Debit,
        CanonicalField::Credit,
        CanonicalField::Balance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Date => "date",
            CanonicalField::Narration => "narration",
            CanonicalField::Instrument => "instrument",
            CanonicalField::RefNo => "ref_no",
            CanonicalField::Debit => "debit",
            CanonicalField::Credit => "credit",
            CanonicalField::Balance => "balance",
        }
    }

    /// Debit, credit and balance carry money; everything else is text.
    pub fn is_monetary(&self) -> bool {
        matches!(
            self,
            CanonicalField::Debit | CanonicalField::Credit | CanonicalField::Balance
        )
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        CanonicalField::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| format!("unknown field: {s}"))
    }
}
