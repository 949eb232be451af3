//! Registry trait for fetching release and flag information from a package index

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::{FlaggedIndex, ReleaseIndex};

/// Trait for fetching a package's index documents
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches every published version of the package
    ///
    /// # Returns
    /// * `Ok(ReleaseIndex)` - Keys of the `releases` mapping, in no particular order
    /// * `Err(RegistryError)` - On network failure, non-success status or a body
    ///   without a `releases` mapping
    async fn fetch_releases(&self) -> Result<ReleaseIndex, RegistryError>;

    /// Fetches the map of versions flagged upstream as defective
    ///
    /// # Returns
    /// * `Ok(FlaggedIndex)` - Parsed `flagged` mapping
    /// * `Err(RegistryError)` - On network failure, non-success status, or a
    ///   missing or non-mapping `flagged` key
    async fn fetch_flagged(&self) -> Result<FlaggedIndex, RegistryError>;
}
