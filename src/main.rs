use std::sync::Arc;
use tracing::{error, info};

use compat_resolver::{
    utils::config::Config, HttpDownloader, ManifestHostResolver, ManifestLoader, ScenarioCache,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .init();

    info!("Starting compat-resolver v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::new().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    let downloader = Arc::new(HttpDownloader::new(
        config.get_request_timeout(),
        &config.http.user_agent,
    )?);
    let loader = ManifestLoader::new(downloader, &config.manifests);

    // The manifest-backed lookup reuses the host compatibility document the
    // resolver consumes anyway.
    let host_manifest = loader.fetch_host_compatibility().await.map_err(|e| {
        error!("Failed to fetch host compatibility manifest: {}", e);
        e
    })?;
    let host_resolver = ManifestHostResolver::new(host_manifest);

    let cache = ScenarioCache::new();
    cache
        .get_or_resolve(&loader, &host_resolver)
        .await
        .map_err(|e| {
            error!("Failed to resolve version scenarios: {}", e);
            e
        })?;

    info!("Scenario resolution complete");
    Ok(())
}
