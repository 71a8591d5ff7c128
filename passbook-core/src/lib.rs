//! passbook-core: schema-free heuristics for turning raw statement tables into
//! normalized transaction records.
//!
//! Nothing in this crate performs I/O. Callers hand in raw grids (from a CSV
//! reader or an external PDF table extractor) and get back
//! [`TransactionRecord`]s. The alias table, the amount resolver and the
//! reference extractor are immutable once built and can be shared freely
//! between threads.

pub mod aliases;
pub mod amount;
pub mod assemble;
pub mod clean;
pub mod date;
pub mod description;
pub mod detect;
pub mod field;
pub mod header;
pub mod mapping;
pub mod record;
pub mod reference;
pub mod row;
pub mod table;

pub use aliases::AliasPriorityTable;
pub use amount::{AmountResolver, Side, SideRule, clean_amount};
pub use assemble::TableAssembler;
pub use clean::{clean_row, is_noise};
pub use date::{resolve_date, resolve_date_cell};
pub use description::{NO_DESCRIPTION, build_description};
pub use detect::{DEFAULT_HEADER_THRESHOLD, HeaderDetection, detect_header_row, score_row};
pub use field::CanonicalField;
pub use header::normalize_header;
pub use mapping::{FieldBinding, HeaderMapping, map_headers};
pub use record::{ResolvedAmounts, TransactionRecord};
pub use reference::{ReferenceExtractor, ReferenceRule};
pub use row::{RowField, RowFields};
pub use table::{Document, Page, RawCell, RawTable};
