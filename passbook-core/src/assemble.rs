//! Turn a header mapping plus cleaned rows into transaction records.

use chrono::NaiveDate;
use tracing::debug;

use crate::amount::AmountResolver;
use crate::date::resolve_date;
use crate::description::build_description;
use crate::field::CanonicalField;
use crate::mapping::HeaderMapping;
use crate::record::TransactionRecord;
use crate::reference::ReferenceExtractor;
use crate::row::RowFields;

/// Runs date, amount, description and reference resolution for each row.
///
/// Rows whose date or amount cannot be resolved are dropped and only show up
/// in the debug log.
#[derive(Debug, Clone, Copy)]
pub struct TableAssembler<'a> {
    amounts: &'a AmountResolver,
    references: &'a ReferenceExtractor,
}

impl<'a> TableAssembler<'a> {
    pub fn new(amounts: &'a AmountResolver, references: &'a ReferenceExtractor) -> Self {
        Self {
            amounts,
            references,
        }
    }

    pub fn assemble(&self, mapping: &HeaderMapping, rows: &[Vec<String>]) -> Vec<TransactionRecord> {
        rows.iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let record = self.assemble_row(mapping, row);
                if record.is_none() {
                    debug!(row = i, cells = ?row, "dropping row without date or amount");
                }
                record
            })
            .collect()
    }

    pub fn assemble_row(&self, mapping: &HeaderMapping, cells: &[String]) -> Option<TransactionRecord> {
        let row = RowFields::from_row(mapping, cells);

        let date = row_date(&row)?;
        let description = build_description(&row);
        let amounts = self.amounts.resolve(&row, &description)?;
        let ref_no = self.references.extract(&row, &description);

        TransactionRecord::new(date, description, amounts, ref_no)
    }
}

/// The mapped date column first, then any other column with `date` in its
/// name, in column order.
fn row_date(row: &RowFields) -> Option<NaiveDate> {
    let mapped = row.get(CanonicalField::Date).and_then(resolve_date);
    mapped.or_else(|| {
        row.iter()
            .filter(|e| e.field.is_none() && e.key.contains("date"))
            .find_map(|e| resolve_date(&e.value))
    })
}
