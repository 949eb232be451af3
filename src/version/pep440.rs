use std::str::FromStr;

use pep508_rs::pep440_rs::Version;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareResult {
    Latest,
    Outdated,
    Newer,
    Invalid,
}

/// Parse a PEP 440 version string, returning `None` if it is not valid.
pub fn parse_version(version: &str) -> Option<Version> {
    Version::from_str(version.trim()).ok()
}

/// A version is stable when it carries neither a pre-release (`a`, `b`, `rc`)
/// nor a dev-release segment. Post releases count as stable.
pub fn is_stable(version: &Version) -> bool {
    !version.is_pre() && !version.is_dev()
}

/// Find the highest stable version among `versions`.
///
/// Invalid version strings are skipped.
pub fn find_stable_max<'a, I>(versions: I) -> Option<Version>
where
    I: IntoIterator<Item = &'a str>,
{
    versions
        .into_iter()
        .filter_map(parse_version)
        .filter(is_stable)
        .max()
}

/// Compare the running version against the latest published one.
pub fn compare_to_latest(current_version: &str, latest: &Version) -> CompareResult {
    let Some(current) = parse_version(current_version) else {
        return CompareResult::Invalid;
    };

    match current.cmp(latest) {
        std::cmp::Ordering::Equal => CompareResult::Latest,
        std::cmp::Ordering::Less => CompareResult::Outdated,
        std::cmp::Ordering::Greater => CompareResult::Newer,
    }
}
