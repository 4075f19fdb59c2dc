// src/manifest/mod.rs
pub mod loader;
pub mod types;

pub use loader::{Downloader, HttpDownloader, ManifestLoader};
pub use types::{HostCompatibility, PluginCompatibility};
