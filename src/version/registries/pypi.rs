//! PyPI JSON API client for release and flagged-version lookups

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::CheckConfig;
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::{FlaggedIndex, IndexDocument, ReleaseIndex};

/// PyPI registry client
pub struct PypiRegistry {
    client: Client,
    base_url: String,
    package_name: String,
    flagged_url: Option<String>,
}

impl PypiRegistry {
    pub fn new(
        base_url: &str,
        package_name: &str,
        timeout: Duration,
    ) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            package_name: package_name.to_string(),
            flagged_url: None,
        })
    }

    pub fn from_config(config: &CheckConfig) -> Result<Self, RegistryError> {
        let registry = Self::new(
            &config.index_url,
            &config.package_name,
            Duration::from_millis(config.fetch_timeout_ms),
        )?;

        Ok(match &config.flagged_url {
            Some(url) => registry.with_flagged_url(url),
            None => registry,
        })
    }

    /// Read the `flagged` map from a separate document instead of the releases one
    pub fn with_flagged_url(mut self, url: &str) -> Self {
        self.flagged_url = Some(url.to_string());
        self
    }

    fn releases_url(&self) -> String {
        format!("{}/pypi/{}/json", self.base_url, self.package_name)
    }

    fn flagged_url(&self) -> String {
        self.flagged_url.clone().unwrap_or_else(|| self.releases_url())
    }

    async fn fetch_document(&self, url: &str) -> Result<IndexDocument, RegistryError> {
        debug!("Fetching index document: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(e, url))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(url.to_string()));
        }

        if status != StatusCode::OK {
            warn!("Package index returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Package index returned status {}",
                status
            )));
        }

        response.json::<IndexDocument>().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::Timeout(url.to_string())
            } else {
                RegistryError::InvalidResponse(e.to_string())
            }
        })
    }
}

fn transport_error(error: reqwest::Error, url: &str) -> RegistryError {
    if error.is_timeout() {
        RegistryError::Timeout(url.to_string())
    } else {
        RegistryError::Network(error)
    }
}

#[async_trait]
impl Registry for PypiRegistry {
    async fn fetch_releases(&self) -> Result<ReleaseIndex, RegistryError> {
        let document = self.fetch_document(&self.releases_url()).await?;

        let releases = document
            .releases
            .as_ref()
            .and_then(ReleaseIndex::from_value)
            .ok_or_else(|| {
                RegistryError::InvalidResponse("missing 'releases' mapping".to_string())
            })?;

        debug!(
            "Found {} releases for package {}",
            releases.versions.len(),
            self.package_name
        );

        Ok(releases)
    }

    async fn fetch_flagged(&self) -> Result<FlaggedIndex, RegistryError> {
        let document = self.fetch_document(&self.flagged_url()).await?;

        document
            .flagged
            .as_ref()
            .and_then(FlaggedIndex::from_value)
            .ok_or_else(|| {
                RegistryError::InvalidResponse("missing 'flagged' mapping".to_string())
            })
    }
}
