use super::reconciler::tests::sample_metadata;
use super::{DownloadReconciler, LegacyMigrator, PlaybackRouter};
use crate::adapters::local::{
    FsAdapter, JsonDownloadStatusStore, JsonDownloadedVideoStore, JsonWatchHistoryStore,
    SnapshotCatalog,
};
use crate::domain::records::{
    CatalogVideoInfo, DownloadStatus, DownloadStatusRecord, PlaybackDecision, PlaybackSource,
    WatchedEntry,
};
use crate::ports::{DownloadStatusStore, DownloadedVideoStore, WatchHistoryStore};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{TimeZone, Utc};
use std::path::Path;
use tempfile::{tempdir, TempDir};

type LocalRouter = PlaybackRouter<JsonDownloadStatusStore, JsonDownloadedVideoStore, FsAdapter>;

fn local_router(dir: &Path) -> LocalRouter {
    PlaybackRouter::new(DownloadReconciler::new(
        JsonDownloadStatusStore::new(dir.join("download_status.json")),
        JsonDownloadedVideoStore::new(dir.join("downloaded_videos.json")),
        FsAdapter::new(),
    ))
}

async fn record_download(dir: &Path, catalog_id: &str, file_path: &str) {
    JsonDownloadStatusStore::new(dir.join("download_status.json"))
        .put(&DownloadStatusRecord {
            catalog_id: catalog_id.to_string(),
            status: DownloadStatus::Completed,
            progress: 100.0,
        })
        .await
        .unwrap();
    JsonDownloadedVideoStore::new(dir.join("downloaded_videos.json"))
        .put(&sample_metadata(catalog_id, file_path))
        .await
        .unwrap();
}

fn media_dir() -> (TempDir, String) {
    let dir = tempdir().unwrap();
    let video = dir.path().join("Counting with Blocks.mp4");
    std::fs::write(&video, b"\x00\x00\x00\x18ftypmp42").unwrap();
    let video = video.to_str().unwrap().to_string();
    (dir, video)
}

#[tokio::test]
async fn test_functional_downloaded_file_plays_locally_until_deleted() {
    let (dir, video) = media_dir();
    record_download(dir.path(), "dQw4w9WgXcQ", &video).await;
    let router = local_router(dir.path());

    assert_eq!(
        router.decide("dQw4w9WgXcQ").await,
        PlaybackDecision::Local(sample_metadata("dQw4w9WgXcQ", &video))
    );

    std::fs::remove_file(&video).unwrap();

    assert_eq!(router.decide("dQw4w9WgXcQ").await, PlaybackDecision::Network);
    // stale records are not removed by a routing decision
    assert!(router.reconciler().is_downloaded("dQw4w9WgXcQ").await);
}

#[tokio::test]
async fn test_functional_remove_clears_both_stores() {
    let (dir, video) = media_dir();
    record_download(dir.path(), "dQw4w9WgXcQ", &video).await;
    let router = local_router(dir.path());

    let report = router.reconciler().remove("dQw4w9WgXcQ").await.unwrap();
    assert!(report.status_existed);
    assert!(report.metadata_existed);

    let status = JsonDownloadStatusStore::new(dir.path().join("download_status.json"));
    assert_eq!(status.get("dQw4w9WgXcQ").await.unwrap(), None);
    assert!(!router.reconciler().is_downloaded("dQw4w9WgXcQ").await);
    // the file itself is left alone
    assert!(Path::new(&video).exists());

    let again = router.reconciler().remove("dQw4w9WgXcQ").await.unwrap();
    assert!(!again.status_existed);
    assert!(!again.metadata_existed);
}

#[tokio::test]
async fn test_functional_sweep_drops_vanished_downloads() {
    let (dir, video) = media_dir();
    record_download(dir.path(), "aaaaaaaaaaa", &video).await;
    record_download(dir.path(), "bbbbbbbbbbb", "/nonexistent/tubeguard/b.mp4").await;
    record_download(dir.path(), "ccccccccccc", "").await;
    let router = local_router(dir.path());

    let report = router.reconciler().reconcile_missing_files().await.unwrap();
    assert_eq!(report.checked, 3);
    assert_eq!(report.removed, vec!["bbbbbbbbbbb", "ccccccccccc"]);
    assert!(report.failed.is_empty());

    let remaining = JsonDownloadedVideoStore::new(dir.path().join("downloaded_videos.json"))
        .list()
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].catalog_id, "aaaaaaaaaaa");
}

#[tokio::test]
async fn test_functional_route_local_file() {
    let (dir, video) = media_dir();
    let router = local_router(dir.path());

    let source = router.route(&format!("local:{}", video)).await.unwrap();
    assert_eq!(source, PlaybackSource::LocalFile { path: video });
}

#[tokio::test]
async fn test_functional_migration_round_trip() {
    let (dir, video) = media_dir();
    let bedtime = dir.path().join("Bedtime Story.mp4");
    std::fs::write(&bedtime, b"\x00\x00\x00\x18ftypmp42").unwrap();
    let thumbnail = dir.path().join("Bedtime Story.png");
    std::fs::write(&thumbnail, b"\x89PNG").unwrap();

    let watched_at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let mut legacy_entry =
        WatchedEntry::new(format!("local_{}", STANDARD.encode(&video)), watched_at);
    legacy_entry.position = 42.0;
    let bare_local_entry =
        WatchedEntry::new(format!("local:{}", bedtime.to_str().unwrap()), watched_at);
    let catalog_entry = WatchedEntry::new("dQw4w9WgXcQ", watched_at);
    let mut current_entry = WatchedEntry::new("local:/srv/media/intro.mp4", watched_at);
    current_entry.title = Some("Intro".to_string());

    let history_path = dir.path().join("watched_history.json");
    let history = JsonWatchHistoryStore::new(&history_path);
    history
        .write_all(&[
            legacy_entry,
            bare_local_entry.clone(),
            catalog_entry,
            current_entry.clone(),
        ])
        .await
        .unwrap();
    let original = std::fs::read(&history_path).unwrap();

    let mut catalog = SnapshotCatalog::empty();
    catalog.insert(
        "dQw4w9WgXcQ",
        CatalogVideoInfo {
            title: "Never Gonna Give You Up".to_string(),
            thumbnail: "https://img.example/dQw.jpg".to_string(),
            source_label: "Rick Astley".to_string(),
        },
    );

    let migrator = LegacyMigrator::new(history, FsAdapter::new());
    let report = migrator.migrate(&catalog).await.unwrap();
    assert_eq!(report.total, 4);
    assert_eq!(report.migrated, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.errors, 0);
    assert!(report.written);

    let backup = report.backup_path.expect("backup path");
    assert_eq!(std::fs::read(&backup).unwrap(), original);

    let entries = JsonWatchHistoryStore::new(&history_path)
        .read_all()
        .await
        .unwrap();
    assert_eq!(entries.len(), 4);

    assert_eq!(entries[0].identifier, format!("local:{}", video));
    assert_eq!(entries[0].position, 42.0);
    assert_eq!(entries[0].title.as_deref(), Some("Counting with Blocks"));
    assert_eq!(entries[0].source_label.as_deref(), Some("local"));
    assert_eq!(entries[0].first_watched_at, Some(watched_at));

    assert_eq!(entries[1].identifier, bare_local_entry.identifier);
    assert_eq!(entries[1].title.as_deref(), Some("Bedtime Story"));
    assert_eq!(
        entries[1].thumbnail.as_deref(),
        Some(thumbnail.to_str().unwrap())
    );

    assert_eq!(entries[2].identifier, "dQw4w9WgXcQ");
    assert_eq!(entries[2].title.as_deref(), Some("Never Gonna Give You Up"));
    assert_eq!(entries[2].source_label.as_deref(), Some("Rick Astley"));

    assert_eq!(entries[3], current_entry);

    let second = migrator.migrate(&catalog).await.unwrap();
    assert_eq!(second.migrated, 0);
    assert_eq!(second.skipped, 4);
    assert!(!second.written);
    assert_eq!(second.backup_path, None);
}
