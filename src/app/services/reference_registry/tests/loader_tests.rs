//! Tests for reference registry loading from cache and remote source

use super::*;
use crate::Error;
use crate::app::services::reference_registry::ReferenceRegistry;
use crate::app::services::test_support::{local_client, serve_responses};
use tempfile::TempDir;

#[tokio::test]
async fn test_load_prefers_existing_cache() {
    let temp_dir = TempDir::new().unwrap();
    let cache_path = write_file(temp_dir.path(), "airports.csv", SAMPLE_CSV);

    // Nothing listens at this URL; the cache must short-circuit the download
    let (registry, stats) = ReferenceRegistry::load(
        &local_client(),
        "http://127.0.0.1:9/airports.csv",
        Some(cache_path.as_path()),
    )
    .await
    .unwrap();

    assert!(stats.from_cache);
    assert_eq!(stats.rows_parsed, 4);
    assert_eq!(stats.records_indexed, 3);
    assert_eq!(stats.rows_dropped(), 1);
    assert!(registry.contains("RJAA"));
}

#[tokio::test]
async fn test_load_downloads_and_writes_cache() {
    let temp_dir = TempDir::new().unwrap();
    let cache_path = temp_dir.path().join("nested").join("ourairports.csv");
    let (url, server) = serve_responses(vec![(200, SAMPLE_CSV.to_string())]).await;

    let (registry, stats) =
        ReferenceRegistry::load(&local_client(), &url, Some(cache_path.as_path()))
            .await
            .unwrap();

    assert!(!stats.from_cache);
    assert_eq!(registry.len(), 3);
    assert_eq!(std::fs::read_to_string(&cache_path).unwrap(), SAMPLE_CSV);

    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("GET "));
}

#[tokio::test]
async fn test_load_without_cache_path_only_downloads() {
    let (url, _server) = serve_responses(vec![(200, SAMPLE_CSV.to_string())]).await;

    let (registry, stats) = ReferenceRegistry::load(&local_client(), &url, None).await.unwrap();

    assert!(!stats.from_cache);
    assert!(registry.contains("KEWR"));
}

#[tokio::test]
async fn test_load_fails_on_error_status() {
    let temp_dir = TempDir::new().unwrap();
    let cache_path = temp_dir.path().join("ourairports.csv");
    let (url, _server) = serve_responses(vec![(503, "maintenance".to_string())]).await;

    let result = ReferenceRegistry::load(&local_client(), &url, Some(cache_path.as_path())).await;

    match result {
        Err(Error::ReferenceSource { status, body, .. }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected result: {:?}", other.map(|(r, _)| r.len())),
    }
    assert!(!cache_path.exists());
}
