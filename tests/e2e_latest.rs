//! Latest-version check E2E tests against a mock package index

mod helper;

use std::str::FromStr;

use mockito::Server;
use pep508_rs::pep440_rs::Version;
use rstest::rstest;
use tempfile::TempDir;

use helper::{
    RELEASES_BODY, RELEASES_PATH, UNREACHABLE_URL, cache_file, create_checker, mock_releases,
    stamp, today, write_cache,
};

fn v(version: &str) -> Version {
    Version::from_str(version).unwrap()
}

#[tokio::test]
async fn first_check_fetches_index_and_creates_cache() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new_async().await;
    let mock = mock_releases(&mut server, 200, RELEASES_BODY).await;

    let date = today();

    assert!(!cache_file(home.path()).exists());

    let latest = create_checker(&server.url(), home.path()).check_latest_on(date).await;

    mock.assert_async().await;
    assert_eq!(latest, Some(v("1.1.0")));
    assert_eq!(
        std::fs::read_to_string(cache_file(home.path())).unwrap(),
        format!("1.1.0|{}", stamp(date))
    );
}

#[tokio::test]
async fn fresh_cache_is_used_without_network() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", RELEASES_PATH)
        .expect(0)
        .create_async()
        .await;
    let date = today();
    write_cache(home.path(), &format!("1.0.0|{}", stamp(date)));

    let latest = create_checker(&server.url(), home.path()).check_latest_on(date).await;

    mock.assert_async().await;
    assert_eq!(latest, Some(v("1.0.0")));
}

#[tokio::test]
async fn fresh_cache_is_used_when_index_is_unreachable() {
    let home = TempDir::new().unwrap();
    let date = today();
    write_cache(home.path(), &format!("1.0.0|{}", stamp(date)));

    let latest = create_checker(UNREACHABLE_URL, home.path()).check_latest_on(date).await;

    assert_eq!(latest, Some(v("1.0.0")));
}

#[tokio::test]
async fn stale_cache_is_refreshed_and_overwritten() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new_async().await;
    let mock = mock_releases(&mut server, 200, RELEASES_BODY).await;
    write_cache(home.path(), "2.0.0|20180121");
    let date = today();

    let latest = create_checker(&server.url(), home.path()).check_latest_on(date).await;

    mock.assert_async().await;
    assert_eq!(latest, Some(v("1.1.0")));
    assert_eq!(
        std::fs::read_to_string(cache_file(home.path())).unwrap(),
        format!("1.1.0|{}", stamp(date))
    );
}

#[tokio::test]
async fn unreachable_index_falls_back_to_stale_cache() {
    let home = TempDir::new().unwrap();
    write_cache(home.path(), "2.0.0|20180121");

    let latest = create_checker(UNREACHABLE_URL, home.path()).check_latest().await;

    assert_eq!(latest, Some(v("2.0.0")));
    assert_eq!(
        std::fs::read_to_string(cache_file(home.path())).unwrap(),
        "2.0.0|20180121"
    );
}

#[tokio::test]
async fn unreachable_index_without_cache_returns_none() {
    let home = TempDir::new().unwrap();

    let latest = create_checker(UNREACHABLE_URL, home.path()).check_latest().await;

    assert_eq!(latest, None);
    assert!(!cache_file(home.path()).exists());
}

#[rstest]
#[case(404, RELEASES_BODY, None)]
#[case(200, r#"{"releases": {"1.0.0rc1": null}}"#, None)]
#[case(200, r#"{"info": {}}"#, None)]
#[case(200, RELEASES_BODY, Some("1.1.0"))]
#[case(200, r#"{"releases": {"1.0.0": null}}"#, Some("1.0.0"))]
#[tokio::test]
async fn resolves_latest_from_varying_responses(
    #[case] status: usize,
    #[case] body: &str,
    #[case] expected: Option<&str>,
) {
    let home = TempDir::new().unwrap();
    let mut server = Server::new_async().await;
    let _mock = mock_releases(&mut server, status, body).await;

    let latest = create_checker(&server.url(), home.path()).check_latest().await;

    assert_eq!(latest, expected.map(v));
    assert_eq!(cache_file(home.path()).exists(), expected.is_some());
}

#[rstest]
#[case("3laj#r???d|3akajdf#".to_string())]
#[case("2.0.0|3akajdf#".to_string())]
#[case(format!("2.0.0|{}|", stamp(today())))]
#[case(String::new())]
#[tokio::test]
async fn corrupt_cache_triggers_fresh_check(#[case] bad_cache: String) {
    let home = TempDir::new().unwrap();
    let mut server = Server::new_async().await;
    let mock = mock_releases(&mut server, 200, RELEASES_BODY).await;
    write_cache(home.path(), &bad_cache);

    let latest = create_checker(&server.url(), home.path()).check_latest().await;

    mock.assert_async().await;
    assert_eq!(latest, Some(v("1.1.0")));
}

#[tokio::test]
async fn check_completes_when_cache_directory_cannot_be_created() {
    let home = TempDir::new().unwrap();
    // A regular file where the cache directory should go
    std::fs::write(home.path().join(".cache"), "").unwrap();
    let mut server = Server::new_async().await;
    let _mock = mock_releases(&mut server, 200, RELEASES_BODY).await;

    let latest = create_checker(&server.url(), home.path()).check_latest().await;

    assert_eq!(latest, Some(v("1.1.0")));
}

#[cfg(unix)]
#[tokio::test]
async fn check_completes_with_read_only_cache_root() {
    use std::os::unix::fs::PermissionsExt;

    let home = TempDir::new().unwrap();
    let cache_root = home.path().join(".cache");
    std::fs::create_dir(&cache_root).unwrap();
    std::fs::set_permissions(&cache_root, std::fs::Permissions::from_mode(0o555)).unwrap();

    // Permission bits do not bind root, so the directory would be created anyway
    let app_dir = cache_root.join("fmriprep");
    if std::fs::create_dir(&app_dir).is_ok() {
        std::fs::remove_dir(&app_dir).unwrap();
        std::fs::set_permissions(&cache_root, std::fs::Permissions::from_mode(0o755)).unwrap();
        eprintln!("skipping: cache root is writable despite 0o555");
        return;
    }

    let mut server = Server::new_async().await;
    let _mock = mock_releases(&mut server, 200, RELEASES_BODY).await;

    let latest = create_checker(&server.url(), home.path()).check_latest().await;

    std::fs::set_permissions(&cache_root, std::fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(latest, Some(v("1.1.0")));
    assert!(!cache_file(home.path()).exists());
}
