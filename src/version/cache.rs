use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use pep508_rs::pep440_rs::Version;
use tracing::debug;

use crate::config::DATE_FORMAT;
use crate::version::checker::VersionStorer;
use crate::version::error::{CacheError, CacheParseError};

/// Last resolved version and the day it was checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
    pub version: Version,
    pub checked_on: NaiveDate,
}

impl CacheRecord {
    pub fn new(version: Version, checked_on: NaiveDate) -> Self {
        Self {
            version,
            checked_on,
        }
    }

    /// Parse a `<version>|<YYYYMMDD>` line.
    pub fn parse(line: &str) -> Result<Self, CacheParseError> {
        let fields: Vec<&str> = line.trim().split('|').collect();
        let [version, date] = fields.as_slice() else {
            return Err(CacheParseError::FieldCount(fields.len()));
        };

        let version =
            Version::from_str(version).map_err(|_| CacheParseError::Version(version.to_string()))?;
        let checked_on = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| CacheParseError::Date(date.to_string()))?;

        Ok(Self::new(version, checked_on))
    }

    /// Whether the record is at most `expiry_days` away from `today`.
    ///
    /// Dates in the future count by their absolute distance.
    pub fn is_fresh(&self, today: NaiveDate, expiry_days: i64) -> bool {
        (today - self.checked_on).num_days().abs() <= expiry_days
    }
}

impl fmt::Display for CacheRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}",
            self.version,
            self.checked_on.format(DATE_FORMAT)
        )
    }
}

/// Single-file cache holding the latest known release
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole cache file
    pub fn read(&self) -> Result<String, CacheError> {
        std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CacheError::NotFound,
            _ => CacheError::Io(e),
        })
    }

    /// Overwrite the cache file with `text`
    pub fn write(&self, text: &str) -> Result<(), CacheError> {
        std::fs::write(&self.path, text)?;
        Ok(())
    }

    /// Create the parent directory (recursively). Succeeds if it already exists.
    pub fn ensure_parent_dir(&self) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl VersionStorer for FileCache {
    fn load(&self) -> Result<CacheRecord, CacheError> {
        let text = self.read()?;
        let record = CacheRecord::parse(&text)?;
        debug!("Loaded cache record {} from {:?}", record, self.path());
        Ok(record)
    }

    fn store(&self, record: &CacheRecord) -> Result<(), CacheError> {
        self.ensure_parent_dir()?;
        self.write(&record.to_string())?;
        debug!("Saved cache record {} to {:?}", record, self.path());
        Ok(())
    }
}
