//! Pipeline settings.

use passbook_core::{AliasPriorityTable, CanonicalField, DEFAULT_HEADER_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 10 MiB, the upload limit of the hosted converter.
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum share of known aliases for a row to count as a header.
    pub header_threshold: f64,
    /// Let a signed `amount` column decide debit vs credit when nothing else can.
    pub signed_amount_fallback: bool,
    /// Larger documents are rejected before parsing.
    pub max_document_bytes: usize,
    /// Extra header aliases merged over the built-in table, per field.
    pub aliases: BTreeMap<CanonicalField, BTreeMap<String, i32>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            header_threshold: DEFAULT_HEADER_THRESHOLD,
            signed_amount_fallback: false,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            aliases: BTreeMap::new(),
        }
    }
}

impl PipelineConfig {
    /// The built-in alias table with this config's extra aliases applied.
    pub fn alias_table(&self) -> AliasPriorityTable {
        let mut table = AliasPriorityTable::standard();
        for (field, aliases) in &self.aliases {
            for (alias, priority) in aliases {
                table.insert(*field, alias, *priority);
            }
        }
        table
    }
}
