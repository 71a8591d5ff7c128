//! Normalized transaction records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Money columns recovered from one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedAmounts {
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
    pub balance: Option<Decimal>,
}

impl ResolvedAmounts {
    /// Credit as-is when present, otherwise the debit as a negative number.
    pub fn signed_amount(&self) -> Option<Decimal> {
        match (self.credit, self.debit) {
            (Some(credit), _) => Some(credit),
            (None, Some(debit)) => Some(-debit.abs()),
            (None, None) => None,
        }
    }
}

/// One bank-statement line, bank-agnostic.
///
/// The parser builds records through [`TransactionRecord::new`], which
/// guarantees that a debit or a credit is present and that `amount` agrees
/// with them. The fields are public and deserializing does not re-check
/// this, so a record built any other way carries whatever it was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub description: String,
    /// Positive means money in; negative means money out.
    pub amount: Decimal,
    pub balance: Option<Decimal>,
    pub ref_no: Option<String>,
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
}

impl TransactionRecord {
    /// Returns `None` if neither a debit nor a credit was resolved.
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amounts: ResolvedAmounts,
        ref_no: Option<String>,
    ) -> Option<Self> {
        let amount = amounts.signed_amount()?;
        Some(Self {
            date,
            description: description.into(),
            amount,
            balance: amounts.balance,
            ref_no,
            debit: amounts.debit,
            credit: amounts.credit,
        })
    }

    pub fn is_debit(&self) -> bool {
        self.credit.is_none()
    }

    pub fn is_credit(&self) -> bool {
        self.credit.is_some()
    }
}
