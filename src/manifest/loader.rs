// src/manifest/loader.rs
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::manifest::types::{HostCompatibility, PluginCompatibility};
use crate::utils::config::ManifestConfig;
use crate::utils::error::{ResolverError, Result};

/// Fetches the raw bytes behind a URL. A transport failure is terminal for
/// the resolution that triggered it; no retries happen at this layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ResolverError::Fetch(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Downloading manifest from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ResolverError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ResolverError::Fetch(format!(
                "{} returned HTTP {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ResolverError::Fetch(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

/// Retrieves and parses the two compatibility manifests from their
/// configured locations.
pub struct ManifestLoader {
    downloader: Arc<dyn Downloader>,
    plugin_url: String,
    host_url: String,
}

impl ManifestLoader {
    pub fn new(downloader: Arc<dyn Downloader>, config: &ManifestConfig) -> Self {
        Self {
            downloader,
            plugin_url: config.plugin_compatibility_url.clone(),
            host_url: config.host_compatibility_url.clone(),
        }
    }

    pub async fn fetch_plugin_compatibility(&self) -> Result<PluginCompatibility> {
        let bytes = self.downloader.download(&self.plugin_url).await?;
        PluginCompatibility::from_slice(&bytes)
    }

    pub async fn fetch_host_compatibility(&self) -> Result<HostCompatibility> {
        let bytes = self.downloader.download(&self.host_url).await?;
        HostCompatibility::from_slice(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn test_config() -> ManifestConfig {
        ManifestConfig {
            plugin_compatibility_url: "http://manifests.test/plugin.json".into(),
            host_compatibility_url: "http://manifests.test/host.json".into(),
        }
    }

    #[tokio::test]
    async fn fetches_and_parses_plugin_manifest() {
        let mut downloader = MockDownloader::new();
        downloader
            .expect_download()
            .with(eq("http://manifests.test/plugin.json"))
            .times(1)
            .returning(|_| Ok(br#"{"0.9.0": 9}"#.to_vec()));

        let loader = ManifestLoader::new(Arc::new(downloader), &test_config());
        let manifest = loader.fetch_plugin_compatibility().await.unwrap();
        assert_eq!(manifest.protocol_for("0.9.0"), Some(9));
    }

    #[tokio::test]
    async fn propagates_fetch_failures() {
        let mut downloader = MockDownloader::new();
        downloader
            .expect_download()
            .returning(|url| Err(ResolverError::Fetch(format!("{} unreachable", url))));

        let loader = ManifestLoader::new(Arc::new(downloader), &test_config());
        let err = loader.fetch_host_compatibility().await.unwrap_err();
        assert!(matches!(err, ResolverError::Fetch(_)));
    }

    #[tokio::test]
    async fn propagates_parse_failures() {
        let mut downloader = MockDownloader::new();
        downloader
            .expect_download()
            .returning(|_| Ok(b"not json".to_vec()));

        let loader = ManifestLoader::new(Arc::new(downloader), &test_config());
        let err = loader.fetch_plugin_compatibility().await.unwrap_err();
        assert!(matches!(err, ResolverError::Parse(_)));
    }
}
