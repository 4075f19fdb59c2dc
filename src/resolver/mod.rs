// src/resolver/mod.rs
pub mod cache;
pub mod scenario;

use async_trait::async_trait;
use semver::Version;
use std::cmp::Ordering;
use tracing::debug;

use crate::manifest::types::{HostCompatibility, PluginCompatibility};
use crate::utils::error::{ResolverError, Result};
use self::scenario::{Scenario, ScenarioMap};

/// Looks up the best known host release speaking a given protocol version.
/// Lookup errors abort the resolution that issued them, unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn latest_host_for_protocol(&self, protocol: u32) -> Result<String>;
}

/// Host lookup backed by the host compatibility manifest itself: the latest
/// host for a protocol is the highest-versioned release in its group.
pub struct ManifestHostResolver {
    manifest: HostCompatibility,
}

impl ManifestHostResolver {
    pub fn new(manifest: HostCompatibility) -> Self {
        Self { manifest }
    }
}

#[async_trait]
impl HostResolver for ManifestHostResolver {
    async fn latest_host_for_protocol(&self, protocol: u32) -> Result<String> {
        let mut hosts = self.manifest.hosts_for(protocol).to_vec();
        if hosts.is_empty() {
            return Err(ResolverError::NoHostForProtocol(protocol));
        }
        sort_semver_descending(&mut hosts);
        Ok(hosts.swap_remove(0))
    }
}

/// Cross-references the two compatibility manifests into the scenario map.
///
/// Plugin versions are considered newest-first; protocol versions likewise.
/// The highest protocol group with two or more hosts supplies the multi-host
/// scenarios, and the first adjacent plugin pair sharing a protocol version
/// supplies the solo scenarios. Consecutive plugin releases are expected to
/// eventually share a protocol version; a manifest where none do is a data
/// integrity failure.
pub async fn resolve(
    plugin_manifest: &PluginCompatibility,
    host_manifest: &HostCompatibility,
    host_resolver: &dyn HostResolver,
) -> Result<ScenarioMap> {
    let plugin_versions = selectable_plugin_versions(plugin_manifest)?;
    let protocols = protocols_descending(host_manifest)?;

    let mut map = ScenarioMap::default();

    // Only the highest protocol version with at least two host releases
    // drives the multi-host scenarios; lower groups are never consulted.
    // A manifest without such a group leaves them unset.
    for protocol in protocols {
        let listed = host_manifest.hosts_for(protocol);
        if listed.len() > 1 {
            let mut hosts = listed.to_vec();
            sort_semver_descending(&mut hosts);
            map.set(Scenario::MultiHost1, hosts[0].clone());
            map.set(Scenario::MultiHost2, hosts[1].clone());

            if let Some((version, _)) = plugin_versions
                .iter()
                .find(|(_, plugin_protocol)| *plugin_protocol == protocol)
            {
                map.set(Scenario::MultiHostPlugin, version.clone());
            }
            break;
        }
        debug!("Protocol {} has fewer than two hosts, skipping", protocol);
    }

    // A lone host always runs whatever is newest.
    map.set(Scenario::OnlyHost, "latest");

    let mut solo_found = false;
    for pair in plugin_versions.windows(2) {
        let (first, first_protocol) = (&pair[0].0, pair[0].1);
        let (second, second_protocol) = (&pair[1].0, pair[1].1);

        let latest_host = host_resolver.latest_host_for_protocol(first_protocol).await?;

        if first_protocol == second_protocol {
            map.set(Scenario::SoloPluginA, first.clone());
            map.set(Scenario::SoloPluginB, second.clone());
            map.set(Scenario::SoloHost, latest_host);
            solo_found = true;
            break;
        }
        if !map.is_set(Scenario::LatestPluginToHost) {
            map.set(Scenario::LatestPluginToHost, first.clone());
            map.set(Scenario::LatestHostToPlugin, latest_host);
        }
        // Mismatched pairs past the first record nothing; the scan keeps
        // looking for a same-protocol pair.
    }
    if !solo_found {
        return Err(ResolverError::NoSoloPairFound);
    }

    Ok(map)
}

/// Plugin versions usable as scenario values, paired with their protocol
/// versions, newest first. The manifest publishes the upcoming release
/// before its binaries exist, so the newest entry is never selectable.
fn selectable_plugin_versions(manifest: &PluginCompatibility) -> Result<Vec<(String, u32)>> {
    let mut versions: Vec<(String, u32)> = manifest
        .protocol_by_plugin
        .iter()
        .map(|(version, protocol)| (version.clone(), *protocol))
        .collect();
    versions.sort_by(|a, b| compare_semver(&b.0, &a.0));

    if !versions.is_empty() {
        versions.remove(0);
    }
    if versions.len() < 2 {
        return Err(ResolverError::InsufficientVersions(versions.len()));
    }

    Ok(versions)
}

/// Protocol version keys as integers, highest first. Map iteration order is
/// never relied on; keys are materialized and sorted explicitly.
fn protocols_descending(manifest: &HostCompatibility) -> Result<Vec<u32>> {
    let mut protocols = Vec::with_capacity(manifest.hosts_by_protocol.len());
    for key in manifest.hosts_by_protocol.keys() {
        let protocol: u32 = key
            .parse()
            .map_err(|_| ResolverError::MalformedProtocolVersion(key.clone()))?;
        protocols.push(protocol);
    }
    protocols.sort_unstable_by(|a, b| b.cmp(a));
    Ok(protocols)
}

/// Semantic-version ordering over release strings. Upstream manifests
/// sometimes prefix versions with "v"; strip it before parsing. Strings that
/// do not parse order below every valid version, with byte order as the
/// final tie-break so the ordering stays total and deterministic.
fn compare_semver(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| Version::parse(v.trim_start_matches('v')).ok();
    match (parse(a), parse(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

fn sort_semver_descending(versions: &mut [String]) {
    versions.sort_by(|a, b| compare_semver(b, a));
}
