//! Dataset assembly and output writing
//!
//! Entries are folded into a map keyed by ICAO code; a later entry with the
//! same code replaces the earlier one in full.

use crate::app::models::{AirportEntry, Dataset, DatasetMeta};
use crate::constants::VERSION_DATE_FORMAT;
use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Fold entries into a dataset stamped with `generated_at`
///
/// The version label is `version` when given and non-empty, otherwise the
/// UTC date of `generated_at`.
pub fn assemble_dataset<I>(
    entries: I,
    version: Option<&str>,
    generated_at: DateTime<Utc>,
) -> Dataset
where
    I: IntoIterator<Item = AirportEntry>,
{
    let mut airports = BTreeMap::new();
    let mut replaced = 0;

    for entry in entries {
        if let Some(previous) = airports.insert(entry.icao.clone(), entry) {
            debug!("Duplicate ICAO {} replaced by later feature", previous.icao);
            replaced += 1;
        }
    }

    if replaced > 0 {
        info!("{} duplicate ICAO codes resolved by last write", replaced);
    }

    let dataset_version = version
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| generated_at.format(VERSION_DATE_FORMAT).to_string());

    Dataset {
        meta: DatasetMeta::new(
            dataset_version,
            generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        airports,
    }
}

/// Write the dataset as pretty-printed JSON, creating parent directories
pub async fn write_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            Error::io(format!("Failed to create output directory {}", parent.display()), e)
        })?;
    }

    let json =
        serde_json::to_string_pretty(dataset).map_err(|e| Error::serialize("dataset", e))?;

    tokio::fs::write(path, json)
        .await
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

    debug!("Dataset written to {}", path.display());
    Ok(())
}
