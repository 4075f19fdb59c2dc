pub mod manifest;
pub mod resolver;
pub mod utils;

pub use manifest::{Downloader, HostCompatibility, HttpDownloader, ManifestLoader, PluginCompatibility};
pub use resolver::cache::ScenarioCache;
pub use resolver::scenario::{Scenario, ScenarioMap};
pub use resolver::{resolve, HostResolver, ManifestHostResolver};
pub use utils::error::{ResolverError, Result};
