//! Package index test utilities

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use mockito::{Mock, ServerGuard};

use fmriprep_version::config::{CACHE_FILE_NAME, DATE_FORMAT};
use fmriprep_version::version::cache::FileCache;
use fmriprep_version::version::checker::LatestVersionChecker;
use fmriprep_version::version::registries::PypiRegistry;
use fmriprep_version::version::registry::Registry;

pub const RELEASES_PATH: &str = "/pypi/fmriprep/json";

/// Index response with three stable releases and one release candidate
pub const RELEASES_BODY: &str =
    r#"{"releases": {"1.0.0": null, "1.0.1": null, "1.1.0": null, "1.1.1rc1": null}}"#;

/// Address nothing listens on
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

/// Register a GET handler for the releases document
pub async fn mock_releases(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
    server
        .mock("GET", RELEASES_PATH)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

pub fn create_registry(base_url: &str) -> Arc<dyn Registry> {
    Arc::new(PypiRegistry::new(base_url, "fmriprep", Duration::from_secs(5)).unwrap())
}

/// Cache file location under a fake home directory
pub fn cache_file(home: &Path) -> PathBuf {
    home.join(".cache").join("fmriprep").join(CACHE_FILE_NAME)
}

pub fn create_checker(base_url: &str, home: &Path) -> LatestVersionChecker<FileCache> {
    LatestVersionChecker::new(
        create_registry(base_url),
        FileCache::new(cache_file(home)),
        14,
    )
}

/// Write raw content to the cache file, creating its directory
pub fn write_cache(home: &Path, content: &str) {
    let path = cache_file(home);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Read the clock once per test and pass the date along
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date the way the cache file stores it
pub fn stamp(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
