//! Command implementation for the dataset builder
//!
//! Runs the whole pipeline: load the reference table, fetch aerodromes with
//! endpoint fallback, reconcile, assemble and write.

use crate::app::services::assembler::{assemble_dataset, write_dataset};
use crate::app::services::country::CountryLanguages;
use crate::app::services::names::{ScriptConverter, default_converter};
use crate::app::services::overpass::{
    EndpointFetcher, OverpassClient, build_http_client, fetch_with_fallback,
};
use crate::app::services::reconciler::Reconciler;
use crate::app::services::reference_registry::ReferenceRegistry;
use crate::cli::args::Args;
use crate::config::Config;
use crate::Result;
use chrono::Utc;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of a dataset build
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// OSM features returned by Overpass
    pub features_fetched: usize,
    /// Reference records indexed from OurAirports
    pub reference_records: usize,
    /// Whether the reference table came from the local cache
    pub reference_from_cache: bool,
    /// Features dropped for lacking an ICAO code
    pub missing_identity: usize,
    /// Airports written after duplicate resolution
    pub airports_written: usize,
    /// Dataset version label written to the metadata
    pub dataset_version: String,
    /// Output file
    pub output_path: PathBuf,
    /// Wall time of the run
    pub processing_time: Duration,
}

/// Entry point for the binary
pub async fn run(args: Args) -> Result<RunSummary> {
    setup_logging(&args)?;

    info!("Starting airport dataset build");
    debug!("Command line arguments: {:?}", args);

    let config = args.to_config();
    let client = build_http_client()?;
    let fetcher = OverpassClient::new(client.clone());

    let summary = execute(&config, &client, &fetcher, default_converter()).await?;

    println!(
        "Wrote {} airports to {}",
        summary.airports_written,
        summary.output_path.display()
    );
    Ok(summary)
}

/// Run the pipeline described by `config`
///
/// `client` is used for the OurAirports download; Overpass queries go through
/// `fetcher`. Nothing is written unless every step before the write succeeds.
pub async fn execute<F>(
    config: &Config,
    client: &reqwest::Client,
    fetcher: &F,
    converter: &dyn ScriptConverter,
) -> Result<RunSummary>
where
    F: EndpointFetcher + Sync,
{
    let start_time = Instant::now();
    config.validate()?;

    let mut languages = CountryLanguages::builtin();
    if let Some(path) = &config.country_lang_map {
        let applied = languages.load_overrides(path)?;
        info!(
            "Loaded {} country language overrides ({} countries mapped)",
            applied,
            languages.len()
        );
    }

    let (registry, load_stats) = ReferenceRegistry::load(
        client,
        &config.reference_url,
        config.cache_path.as_deref(),
    )
    .await?;

    info!(
        "Querying Overpass ({} endpoint{})",
        config.endpoints.len(),
        if config.endpoints.len() == 1 { "" } else { "s" }
    );
    let response = fetch_with_fallback(fetcher, &config.endpoints, &config.retry).await?;
    info!("Overpass returned {} features", response.elements.len());

    let reconciler = Reconciler::new(&registry, &languages, converter);
    let (entries, reconcile_stats) = reconciler.reconcile_all(&response.elements);

    let dataset = assemble_dataset(entries, config.dataset_version.as_deref(), Utc::now());
    write_dataset(&config.output_path, &dataset).await?;

    let summary = RunSummary {
        features_fetched: response.elements.len(),
        reference_records: load_stats.records_indexed,
        reference_from_cache: load_stats.from_cache,
        missing_identity: reconcile_stats.missing_identity,
        airports_written: dataset.airport_count(),
        dataset_version: dataset.meta.dataset_version.clone(),
        output_path: config.output_path.clone(),
        processing_time: start_time.elapsed(),
    };

    info!(
        "Dataset {} complete: {} airports in {:.2}s",
        summary.dataset_version,
        summary.airports_written,
        summary.processing_time.as_secs_f64()
    );
    Ok(summary)
}

/// Set up logging based on verbosity flags
///
/// `RUST_LOG` overrides the flags when set.
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("airport_dataset={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
