//! User-facing messages built from the version checks

use pep508_rs::pep440_rs::Version;

use crate::version::checker::{LatestVersionChecker, VersionStorer};
use crate::version::flagged::{FlagStatus, FlaggedVersionChecker};
use crate::version::pep440::{CompareResult, compare_to_latest};

const UPGRADE_DOCS_URL: &str = "https://fmriprep.readthedocs.io/en/latest/faq.html#upgrading";

/// Notice shown when a newer stable release than `current_version` exists
pub fn update_notice(app_name: &str, current_version: &str, latest: &Version) -> Option<String> {
    match compare_to_latest(current_version, latest) {
        CompareResult::Outdated => Some(format!(
            "You are using {app_name}-{current_version}, and a newer version of {app_name} \
             is available: {latest}.\n\
             Please check out our documentation about how and when to upgrade:\n\
             {UPGRADE_DOCS_URL}"
        )),
        CompareResult::Latest | CompareResult::Newer | CompareResult::Invalid => None,
    }
}

/// Warning shown when `current_version` is flagged upstream
pub fn flagged_warning(
    app_name: &str,
    current_version: &str,
    status: &FlagStatus,
) -> Option<String> {
    if !status.is_flagged() {
        return None;
    }

    let reason = status.reason().unwrap_or("unknown");
    Some(format!(
        "WARNING: Version {current_version} of {app_name} (current) has been FLAGGED\n\
         (reason: {reason}).\n\
         That means some severe flaw was found in it and we strongly\n\
         discourage its usage."
    ))
}

/// Run both checks in sequence and collect the messages to show
pub async fn collect_advisories<S: VersionStorer>(
    app_name: &str,
    current_version: &str,
    latest_checker: &LatestVersionChecker<S>,
    flagged_checker: &FlaggedVersionChecker,
) -> Vec<String> {
    let mut advisories = Vec::new();

    if let Some(latest) = latest_checker.check_latest().await {
        advisories.extend(update_notice(app_name, current_version, &latest));
    }

    let status = flagged_checker.is_flagged(current_version).await;
    advisories.extend(flagged_warning(app_name, current_version, &status));

    advisories
}
