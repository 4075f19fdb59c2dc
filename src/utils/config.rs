use config::{Config as ConfigLib, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::utils::error::{ResolverError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub manifests: ManifestConfig,
    pub http: HttpConfig,
}

/// Locations of the two compatibility manifests.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestConfig {
    /// Maps each plugin release to the protocol version it speaks.
    pub plugin_compatibility_url: String,
    /// Maps each protocol version to the host releases that speak it.
    pub host_compatibility_url: String,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub request_timeout: u64,
    pub user_agent: String,
}

impl Config {
    pub fn new() -> Result<Self> {
        let config = ConfigLib::builder()
            // Start with default values
            .set_default("http.request_timeout", 30)?
            .set_default(
                "http.user_agent",
                concat!("compat-resolver/", env!("CARGO_PKG_VERSION")),
            )?

            // Load from config file
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name("config/local").required(false))

            // Override with environment variables (e.g. RESOLVER_MANIFESTS__PLUGIN_COMPATIBILITY_URL)
            .add_source(Environment::with_prefix("RESOLVER").separator("__"))

            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.manifests.plugin_compatibility_url.is_empty() {
            return Err(ResolverError::Config(
                "manifests.plugin_compatibility_url must be set".into(),
            ));
        }
        if self.manifests.host_compatibility_url.is_empty() {
            return Err(ResolverError::Config(
                "manifests.host_compatibility_url must be set".into(),
            ));
        }
        if self.http.request_timeout == 0 {
            return Err(ResolverError::Config(
                "http.request_timeout must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    pub fn get_request_timeout(&self) -> Duration {
        Duration::from_secs(self.http.request_timeout)
    }
}

impl From<ConfigError> for ResolverError {
    fn from(error: ConfigError) -> Self {
        ResolverError::Config(error.to_string())
    }
}
