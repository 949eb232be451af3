use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Time-related constants
// =============================================================================

/// Days a cached latest-version lookup stays valid
pub const DEFAULT_RELEASE_EXPIRY_DAYS: i64 = 14;

/// Timeout for index requests in milliseconds (1 second)
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 1_000;

/// `chrono` format of the check date stored in the cache file
pub const DATE_FORMAT: &str = "%Y%m%d";

// =============================================================================
// Index-related constants
// =============================================================================

pub const DEFAULT_APP_NAME: &str = "fmriprep";

pub const DEFAULT_PACKAGE_NAME: &str = "fmriprep";

pub const DEFAULT_INDEX_URL: &str = "https://pypi.org";

/// Name of the cache file under the application cache directory
pub const CACHE_FILE_NAME: &str = "latest";

/// Version check configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckConfig {
    /// Directory name used under `~/.cache`
    pub app_name: String,
    /// Project name on the package index
    pub package_name: String,
    /// Base URL of the package index
    pub index_url: String,
    /// Document holding the `flagged` map; the releases document when unset
    pub flagged_url: Option<String>,
    /// Maximum age of a cached lookup in days
    pub release_expiry_days: i64,
    /// Per-request timeout in milliseconds
    pub fetch_timeout_ms: u64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            index_url: DEFAULT_INDEX_URL.to_string(),
            flagged_url: None,
            release_expiry_days: DEFAULT_RELEASE_EXPIRY_DAYS,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
        }
    }
}

impl CheckConfig {
    /// Load configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Path of the latest-version cache file for this application.
    pub fn cache_path(&self) -> PathBuf {
        cache_dir(&self.app_name).join(CACHE_FILE_NAME)
    }
}

/// Returns the cache directory for `app_name`.
/// Uses ~/.cache/<app_name>, or ./.cache/<app_name> if no home directory is known.
pub fn cache_dir(app_name: &str) -> PathBuf {
    cache_dir_with_home(dirs::home_dir(), app_name)
}

fn cache_dir_with_home(home_dir: Option<PathBuf>, app_name: &str) -> PathBuf {
    home_dir
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cache")
        .join(app_name)
}
