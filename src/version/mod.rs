//! Release freshness and flagged-version checks
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Registry  │────▶│   Checker   │────▶│    Cache    │
//! │  (fetch)    │     │  (latest)   │     │   (file)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   Flagged   │
//! │  (lookup)   │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: `version|YYYYMMDD` cache file and its record type
//! - [`checker`]: Latest stable release lookup with cache/TTL handling
//! - [`flagged`]: Flagged-version lookup for the running version
//! - [`registry`]: Registry trait for fetching index documents
//! - [`registries`]: Concrete registry implementations (PyPI)
//! - [`error`]: Error types for cache and registry operations
//! - [`pep440`]: PEP 440 parsing and comparison helpers
//! - [`types`]: Release and flagged index types

pub mod cache;
pub mod checker;
pub mod error;
pub mod flagged;
pub mod pep440;
pub mod registries;
pub mod registry;
pub mod types;
