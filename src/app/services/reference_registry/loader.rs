//! Reference registry loading from cache or remote source
//!
//! A cache file, when present, always wins over the network. A downloaded
//! CSV is written back to the cache path so later runs stay offline.

use super::ReferenceRegistry;
use super::metadata::LoadStats;
use super::parser::parse_csv;
use crate::{Error, Result};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

impl ReferenceRegistry {
    /// Load the OurAirports registry
    ///
    /// # Arguments
    /// * `client` - HTTP client used when the cache is missing
    /// * `url` - Remote location of `airports.csv`
    /// * `cache_path` - Optional cache file, read if it exists and written after a download
    ///
    /// # Errors
    /// * `Error::ReferenceSource` if the download returns a non-success status
    /// * `Error::Request` for transport failures
    /// * `Error::Io` for cache read or write failures
    pub async fn load(
        client: &reqwest::Client,
        url: &str,
        cache_path: Option<&Path>,
    ) -> Result<(Self, LoadStats)> {
        let start_time = Instant::now();
        let mut stats = LoadStats::new();

        let text = match cache_path.filter(|path| path.exists()) {
            Some(path) => {
                info!("Loading OurAirports from cache: {}", path.display());
                stats.from_cache = true;
                tokio::fs::read_to_string(path).await.map_err(|e| {
                    Error::io(format!("Failed to read cache file {}", path.display()), e)
                })?
            }
            None => {
                let text = Self::download(client, url).await?;
                if let Some(path) = cache_path {
                    Self::write_cache(path, &text).await?;
                }
                text
            }
        };

        let rows = parse_csv(&text);
        let registry = Self::from_rows(&rows);

        stats.rows_parsed = rows.len();
        stats.records_indexed = registry.len();
        stats.load_duration = start_time.elapsed();

        info!(
            "Reference registry loaded: {} records from {} rows ({} dropped) in {:.2}s",
            stats.records_indexed,
            stats.rows_parsed,
            stats.rows_dropped(),
            stats.load_duration.as_secs_f64()
        );

        Ok((registry, stats))
    }

    /// Download the raw CSV text
    pub(crate) async fn download(client: &reqwest::Client, url: &str) -> Result<String> {
        info!("Downloading OurAirports from {}", url);

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::request(url, e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| Error::request(url, e))?;

        if !status.is_success() {
            return Err(Error::ReferenceSource {
                url: url.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        debug!("Downloaded {} bytes from {}", text.len(), url);
        Ok(text)
    }

    async fn write_cache(path: &Path, text: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::io(format!("Failed to create cache directory {}", parent.display()), e)
            })?;
        }

        tokio::fs::write(path, text)
            .await
            .map_err(|e| Error::io(format!("Failed to write cache file {}", path.display()), e))?;

        debug!("Cached OurAirports CSV at {}", path.display());
        Ok(())
    }
}
