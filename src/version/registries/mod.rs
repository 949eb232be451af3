//! Registry implementations for fetching package index documents

pub mod pypi;

pub use pypi::PypiRegistry;
