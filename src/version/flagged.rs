//! Flagged-version lookup

use std::sync::Arc;

use tracing::{debug, warn};

use crate::version::registry::Registry;

/// Whether a version was flagged upstream as defective
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagStatus {
    NotFlagged,
    Flagged { reason: Option<String> },
}

impl FlagStatus {
    pub fn is_flagged(&self) -> bool {
        matches!(self, FlagStatus::Flagged { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            FlagStatus::Flagged { reason } => reason.as_deref(),
            FlagStatus::NotFlagged => None,
        }
    }
}

pub struct FlaggedVersionChecker {
    registry: Arc<dyn Registry>,
}

impl FlaggedVersionChecker {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }

    /// Look up `current_version` in the upstream flagged map.
    ///
    /// Any failure to obtain the map reports the version as not flagged.
    pub async fn is_flagged(&self, current_version: &str) -> FlagStatus {
        let flagged = match self.registry.fetch_flagged().await {
            Ok(flagged) => flagged,
            Err(e) => {
                warn!("Failed to fetch flagged versions: {}", e);
                return FlagStatus::NotFlagged;
            }
        };

        if flagged.is_empty() {
            debug!("No versions are flagged upstream");
        }

        match flagged.get(current_version) {
            Some(reason) => {
                debug!("Version {} is flagged: {:?}", current_version, reason);
                FlagStatus::Flagged {
                    reason: reason.map(str::to_string),
                }
            }
            None => FlagStatus::NotFlagged,
        }
    }
}
