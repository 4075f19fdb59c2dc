// src/manifest/types.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::utils::error::Result;

/// Compatibility manifest published with plugin releases: each plugin version
/// declares the single protocol version it speaks. Several plugin releases
/// may share a protocol version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginCompatibility {
    pub protocol_by_plugin: HashMap<String, u32>,
}

impl PluginCompatibility {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn protocol_for(&self, plugin_version: &str) -> Option<u32> {
        self.protocol_by_plugin.get(plugin_version).copied()
    }
}

/// Compatibility manifest published with host releases: each protocol version
/// lists the host releases able to speak it. Keys are integer protocol
/// versions carried as strings in the JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostCompatibility {
    pub hosts_by_protocol: HashMap<String, Vec<String>>,
}

impl HostCompatibility {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn hosts_for(&self, protocol: u32) -> &[String] {
        self.hosts_by_protocol
            .get(&protocol.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
