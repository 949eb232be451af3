use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache file not found")]
    NotFound,

    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt cache record: {0}")]
    Parse(#[from] CacheParseError),
}

/// Reasons a cache line fails to parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheParseError {
    #[error("expected 2 fields separated by '|', found {0}")]
    FieldCount(usize),

    #[error("invalid version '{0}'")]
    Version(String),

    #[error("invalid check date '{0}'")]
    Date(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl RegistryError {
    /// True when the index could not be reached at all (as opposed to
    /// answering with something unusable).
    pub fn is_unreachable(&self) -> bool {
        matches!(self, RegistryError::Network(_) | RegistryError::Timeout(_))
    }
}
