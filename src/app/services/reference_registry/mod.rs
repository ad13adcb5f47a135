//! Reference registry for O(1) OurAirports lookups
//!
//! This module loads the OurAirports CSV (from a local cache file or the
//! remote URL) and indexes its rows by uppercase ICAO code.

use crate::app::models::ReferenceRecord;
use std::collections::HashMap;

pub mod loader;
pub mod metadata;
pub mod parser;

#[cfg(test)]
pub mod tests;

pub use metadata::LoadStats;
pub use parser::{CsvRow, parse_csv, parse_reference_record};

/// OurAirports rows indexed by uppercase primary code
#[derive(Debug, Clone, Default)]
pub struct ReferenceRegistry {
    pub(crate) records: HashMap<String, ReferenceRecord>,
}

impl ReferenceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Index parsed CSV rows
    ///
    /// Rows without an `ident` are skipped. A later row with the same code
    /// replaces an earlier one.
    pub fn from_rows(rows: &[CsvRow]) -> Self {
        let records = rows
            .iter()
            .filter_map(parse_reference_record)
            .map(|record| (record.icao.clone(), record))
            .collect();
        Self { records }
    }

    /// Parse and index raw CSV text
    pub fn from_csv(text: &str) -> Self {
        Self::from_rows(&parse_csv(text))
    }

    /// Look up a record by code, ignoring case
    pub fn get(&self, code: &str) -> Option<&ReferenceRecord> {
        self.records.get(&code.to_uppercase())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
