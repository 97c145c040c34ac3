//! End-to-end runs from configuration files to the final tally.

use axum::http::StatusCode;
use precache::app::{self, Options};
use precache::config::settings::DEFAULT_DOWNLOAD_DIRECTORY;
use precache::config::TextEncoding;
use precache::report::Level;
use precache::{ConfigStore, Error, ErrorKind, StyleOptions};
use std::path::Path;

mod common;
use common::helpers::*;

fn options(dir: &Path, server_text: &str, cache: &Path) -> Options {
    let server_config = write_config(dir, "server.ini", server_text, TextEncoding::Utf16Le);
    let local_text = local_config_text(cache);
    let local_config = write_config(dir, "local.ini", &local_text, TextEncoding::Utf8);
    Options {
        server_config,
        local_config,
        style_options: StyleOptions::hidden(),
        ..Options::default()
    }
}

#[tokio::test]
async fn test_full_run() {
    let server = MockServer::start(vec![
        ("files/playlist.json", Route::ok(r#"["a.mp4", "b.mp4"]"#)),
        ("files/a.mp4", Route::ok("aaaa")),
        ("files/b.mp4", Route::status(StatusCode::NOT_FOUND)),
    ])
    .await;
    let dir = create_temp_dir();
    let cache = dir.path().join("cache");
    std::fs::create_dir(&cache).unwrap();
    let options = options(
        dir.path(),
        &server_config_text(&format!("'{}'", server.url("files")), "\"playlist.json\""),
        &cache,
    );
    let reporter = RecordingReporter::new();

    let summary = app::run(&options, reporter.clone()).await.unwrap();

    assert_eq!(summary.to_string(), "1 of 2");
    assert_file_content(&cache.join("a.mp4"), b"aaaa");
    assert!(!cache.join("b.mp4").exists());
    assert!(reporter.contains(Level::Ok, "Successfully downloaded 1 of 2 into cache."));
    assert_eq!(
        server.requests(),
        vec![
            "/files/playlist.json".to_string(),
            "/files/a.mp4".to_string(),
            "/files/b.mp4".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_unqualified_playlist_makes_no_request() {
    let server = MockServer::start(vec![("playlist.json", Route::ok(r#"["a.mp4"]"#))]).await;
    let dir = create_temp_dir();
    let options = options(
        dir.path(),
        &server_config_text("", "playlist.json"),
        dir.path(),
    );

    let err = app::run(&options, RecordingReporter::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnqualifiedReference(_)));
    assert_eq!(err.kind(), ErrorKind::Resolution);
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_relative_download_server_with_qualified_playlist() {
    let files = MockServer::start(vec![("cdn/a.mp4", Route::ok("aaaa"))]).await;
    let body = format!(r#"["{}"]"#, files.url("cdn/a.mp4"));
    let lists = MockServer::start(vec![("lists/playlist.json", Route::ok(body))]).await;
    let dir = create_temp_dir();
    let options = options(
        dir.path(),
        &server_config_text("files", &lists.url("lists/playlist.json")),
        dir.path(),
    );

    let summary = app::run(&options, RecordingReporter::new()).await.unwrap();

    assert_eq!(summary.to_string(), "1 of 1");
    assert_file_content(&dir.path().join("a.mp4"), b"aaaa");
    assert_eq!(lists.requests(), vec!["/lists/playlist.json".to_string()]);
    assert_eq!(files.requests(), vec!["/cdn/a.mp4".to_string()]);
}

#[tokio::test]
async fn test_bad_playlist_downloads_nothing() {
    let server = MockServer::start(vec![
        ("playlist.json", Route::ok(r#"["a.mp4", 5]"#)),
        ("a.mp4", Route::ok("a")),
    ])
    .await;
    let dir = create_temp_dir();
    let options = options(
        dir.path(),
        &server_config_text(&server.base(), "playlist.json"),
        dir.path(),
    );

    let err = app::run(&options, RecordingReporter::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::PlaylistShape(_)));
    assert_eq!(server.requests(), vec!["/playlist.json".to_string()]);
    assert!(!dir.path().join("a.mp4").exists());
}

#[tokio::test]
async fn test_missing_server_config() {
    let dir = create_temp_dir();
    let options = Options {
        server_config: dir.path().join("absent.ini"),
        local_config: dir.path().join("local.ini"),
        style_options: StyleOptions::hidden(),
        ..Options::default()
    };

    let err = app::run(&options, RecordingReporter::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ServerConfigRequired { .. }));
    assert!(err.to_string().contains("precache-remote-settings.ini"));
    // Nothing is written when the run cannot start.
    assert!(!dir.path().join("local.ini").exists());
}

#[tokio::test]
async fn test_missing_playlist_key() {
    let dir = create_temp_dir();
    let options = options(
        dir.path(),
        "[Application]\nDownloadServer = http://host\n",
        dir.path(),
    );

    let err = app::run(&options, RecordingReporter::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingKey { .. }));
}

#[tokio::test]
async fn test_local_config_is_bootstrapped() {
    let dir = create_temp_dir();
    let server_config = write_config(
        dir.path(),
        "server.ini",
        &server_config_text("", "playlist.json"),
        TextEncoding::Utf8,
    );
    let local_config = dir.path().join("local.ini");
    let options = Options {
        server_config,
        local_config: local_config.clone(),
        style_options: StyleOptions::hidden(),
        ..Options::default()
    };
    let reporter = RecordingReporter::new();

    // The default cache directory is relative to the working directory and
    // the playlist is unqualified, so the run itself stops early.
    assert!(app::run(&options, reporter.clone()).await.is_err());

    let store = ConfigStore::load(&[&local_config]).unwrap();
    assert_eq!(
        store.get("Application", "DownloadDirectory", None),
        Some(DEFAULT_DOWNLOAD_DIRECTORY)
    );
    assert_eq!(reporter.messages(Level::Info).len(), 1);
}
