// src/resolver/cache.rs
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use super::scenario::ScenarioMap;
use super::{resolve, HostResolver};
use crate::manifest::loader::ManifestLoader;
use crate::utils::error::Result;

/// One-shot memoized resolution. The first caller fetches both manifests and
/// runs the resolver while holding the lock; everyone else blocks until the
/// map exists, then shares it read-only. A failed resolution caches nothing,
/// so the next caller retries from scratch.
pub struct ScenarioCache {
    resolved: Mutex<Option<Arc<ScenarioMap>>>,
}

impl ScenarioCache {
    pub fn new() -> Self {
        Self {
            resolved: Mutex::new(None),
        }
    }

    pub async fn get_or_resolve(
        &self,
        loader: &ManifestLoader,
        host_resolver: &dyn HostResolver,
    ) -> Result<Arc<ScenarioMap>> {
        let mut resolved = self.resolved.lock().await;
        if let Some(map) = resolved.as_ref() {
            return Ok(Arc::clone(map));
        }

        let plugin_manifest = loader.fetch_plugin_compatibility().await?;
        let host_manifest = loader.fetch_host_compatibility().await?;
        let map = Arc::new(resolve(&plugin_manifest, &host_manifest, host_resolver).await?);

        for (scenario, version) in map.iter() {
            info!("{}: {}", scenario, version);
        }

        *resolved = Some(Arc::clone(&map));
        Ok(map)
    }
}

impl Default for ScenarioCache {
    fn default() -> Self {
        Self::new()
    }
}
