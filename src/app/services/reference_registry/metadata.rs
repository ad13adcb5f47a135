//! Reference registry loading statistics

use std::time::Duration;

/// Statistics about loading the reference registry
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// CSV text was read from the local cache instead of downloaded
    pub from_cache: bool,

    /// Data rows found after the header
    pub rows_parsed: usize,

    /// Records indexed after dropping rows without a code
    pub records_indexed: usize,

    /// Time taken to fetch, parse and index
    pub load_duration: Duration,
}

impl LoadStats {
    /// Create new empty load statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows that carried no primary code or were shadowed by a later duplicate
    pub fn rows_dropped(&self) -> usize {
        self.rows_parsed.saturating_sub(self.records_indexed)
    }
}
