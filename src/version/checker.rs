//! Latest release lookup backed by the on-disk cache

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use chrono::{Local, NaiveDate};
use pep508_rs::pep440_rs::Version;
use tracing::{debug, info, warn};

use crate::version::cache::CacheRecord;
use crate::version::error::CacheError;
use crate::version::registry::Registry;

/// Trait for storing and retrieving the last resolved release
#[cfg_attr(test, automock)]
pub trait VersionStorer: Send + Sync {
    /// Load the stored record
    ///
    /// Returns `CacheError::NotFound` when nothing was stored yet and
    /// `CacheError::Parse` when the stored content is corrupt.
    fn load(&self) -> Result<CacheRecord, CacheError>;

    /// Replace the stored record, creating any missing directories
    fn store(&self, record: &CacheRecord) -> Result<(), CacheError>;
}

/// Resolves the latest stable release, consulting the cache before the index
pub struct LatestVersionChecker<S: VersionStorer> {
    registry: Arc<dyn Registry>,
    storer: S,
    release_expiry_days: i64,
}

impl<S: VersionStorer> LatestVersionChecker<S> {
    pub fn new(registry: Arc<dyn Registry>, storer: S, release_expiry_days: i64) -> Self {
        Self {
            registry,
            storer,
            release_expiry_days,
        }
    }

    /// Latest stable release as of the local calendar date
    pub async fn check_latest(&self) -> Option<Version> {
        self.check_latest_on(Local::now().date_naive()).await
    }

    /// Latest stable release, treating `today` as the current date
    ///
    /// Never fails: an unreachable index falls back to the cached version,
    /// any other failure yields `None`.
    pub async fn check_latest_on(&self, today: NaiveDate) -> Option<Version> {
        let cached = self.load_cached();

        if let Some(record) = cached
            .as_ref()
            .filter(|record| record.is_fresh(today, self.release_expiry_days))
        {
            debug!(
                "Using cached latest version {} checked on {}",
                record.version, record.checked_on
            );
            return Some(record.version.clone());
        }

        let latest = match self.registry.fetch_releases().await {
            Ok(releases) => releases.latest_stable(),
            Err(e) if e.is_unreachable() => {
                warn!("Package index unreachable: {}", e);
                return cached.map(|record| record.version);
            }
            Err(e) => {
                warn!("Failed to fetch releases: {}", e);
                None
            }
        };

        if let Some(version) = &latest {
            info!("Latest release is {}", version);
            let record = CacheRecord::new(version.clone(), today);
            let _ = self.storer.store(&record).inspect_err(|e| {
                warn!("Failed to save latest version to cache: {}", e);
            });
        }

        latest
    }

    fn load_cached(&self) -> Option<CacheRecord> {
        match self.storer.load() {
            Ok(record) => Some(record),
            Err(CacheError::NotFound) => {
                debug!("No cached latest version");
                None
            }
            Err(e) => {
                debug!("Ignoring cached latest version: {}", e);
                None
            }
        }
    }
}
