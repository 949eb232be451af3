//! Common types shared by the registry client and the checkers

use std::collections::HashMap;

use pep508_rs::pep440_rs::Version;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::version::pep440::find_stable_max;

/// Raw package index document.
///
/// Only the keys used by the checks are modeled; both are optional so a
/// response without them still deserializes and can be reported precisely.
#[derive(Debug, Default, Deserialize)]
pub struct IndexDocument {
    #[serde(default)]
    pub releases: Option<Value>,
    #[serde(default)]
    pub flagged: Option<Value>,
}

/// Set of published version strings for a package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseIndex {
    pub versions: Vec<String>,
}

impl ReleaseIndex {
    pub fn new(versions: Vec<String>) -> Self {
        Self { versions }
    }

    /// Build from the `releases` value of an index document.
    ///
    /// Returns `None` unless `releases` is a JSON object; release payloads are ignored.
    pub fn from_value(releases: &Value) -> Option<Self> {
        let releases = releases.as_object()?;
        Some(Self::new(releases.keys().cloned().collect()))
    }

    /// Highest stable release, skipping pre-releases and unparseable keys.
    pub fn latest_stable(&self) -> Option<Version> {
        let latest = find_stable_max(self.versions.iter().map(String::as_str));
        if latest.is_none() {
            debug!(
                "No stable release among {} published versions",
                self.versions.len()
            );
        }
        latest
    }
}

/// Versions flagged upstream as defective, with an optional reason
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlaggedIndex {
    entries: HashMap<String, Option<String>>,
}

impl FlaggedIndex {
    pub fn new(entries: HashMap<String, Option<String>>) -> Self {
        Self { entries }
    }

    /// Build from the `flagged` value of an index document.
    ///
    /// `null` yields an empty index; anything other than an object is rejected.
    /// Null, empty or non-string reasons are stored as `None`.
    pub fn from_value(flagged: &Value) -> Option<Self> {
        if flagged.is_null() {
            return Some(Self::default());
        }

        let flagged = flagged.as_object()?;
        let entries = flagged
            .iter()
            .map(|(version, reason)| {
                let reason = reason
                    .as_str()
                    .filter(|r| !r.is_empty())
                    .map(str::to_string);
                (version.clone(), reason)
            })
            .collect();

        Some(Self::new(entries))
    }

    /// Lookup a version. Outer `None` means not flagged.
    pub fn get(&self, version: &str) -> Option<Option<&str>> {
        self.entries.get(version).map(|reason| reason.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
