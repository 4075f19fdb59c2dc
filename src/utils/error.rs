// src/utils/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Malformed protocol version key: {0:?}")]
    MalformedProtocolVersion(String),

    #[error("Insufficient plugin versions: {0} usable after dropping the unreleased head")]
    InsufficientVersions(usize),

    #[error("No consecutive plugin versions share a protocol version")]
    NoSoloPairFound,

    #[error("No host release known for protocol version {0}")]
    NoHostForProtocol(u32),
}

pub type Result<T> = std::result::Result<T, ResolverError>;
