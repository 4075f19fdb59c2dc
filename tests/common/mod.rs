// tests/common/mod.rs
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use compat_resolver::{
    Downloader, HostCompatibility, HostResolver, PluginCompatibility, ResolverError,
    Result as ResolverResult,
};

pub const PLUGIN_MANIFEST_URL: &str = "http://manifests.test/plugin.json";
pub const HOST_MANIFEST_URL: &str = "http://manifests.test/host.json";

/// Serves canned manifest bytes and counts downloads.
pub struct StaticDownloader {
    responses: HashMap<String, Vec<u8>>,
    pub calls: AtomicUsize,
}

impl StaticDownloader {
    pub fn new(plugin_json: &str, host_json: &str) -> Self {
        let mut responses = HashMap::new();
        responses.insert(PLUGIN_MANIFEST_URL.to_string(), plugin_json.into());
        responses.insert(HOST_MANIFEST_URL.to_string(), host_json.into());
        Self {
            responses,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            responses: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Downloader for StaticDownloader {
    async fn download(&self, url: &str) -> ResolverResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| ResolverError::Fetch(format!("no response configured for {}", url)))
    }
}

/// Host lookup with a fixed protocol-to-release table.
pub struct FixedHostResolver {
    by_protocol: HashMap<u32, String>,
}

impl FixedHostResolver {
    pub fn new(entries: &[(u32, &str)]) -> Self {
        Self {
            by_protocol: entries
                .iter()
                .map(|(protocol, host)| (*protocol, host.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl HostResolver for FixedHostResolver {
    async fn latest_host_for_protocol(&self, protocol: u32) -> ResolverResult<String> {
        self.by_protocol
            .get(&protocol)
            .cloned()
            .ok_or(ResolverError::NoHostForProtocol(protocol))
    }
}

pub fn plugin_manifest(entries: &[(&str, u32)]) -> PluginCompatibility {
    PluginCompatibility {
        protocol_by_plugin: entries
            .iter()
            .map(|(version, protocol)| (version.to_string(), *protocol))
            .collect(),
    }
}

pub fn host_manifest(entries: &[(&str, &[&str])]) -> HostCompatibility {
    HostCompatibility {
        hosts_by_protocol: entries
            .iter()
            .map(|(protocol, hosts)| {
                (
                    protocol.to_string(),
                    hosts.iter().map(|h| h.to_string()).collect(),
                )
            })
            .collect(),
    }
}
