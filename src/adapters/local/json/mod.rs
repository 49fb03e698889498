//! JSON file adapter for local deployment.
//!
//! This module provides file-backed implementations of:
//! - `DownloadStatusStore` for download status rows
//! - `DownloadedVideoStore` for downloaded-video metadata
//! - `WatchHistoryStore` for the watched history
//! - `CatalogRegistry` from a catalog snapshot file
//!
//! Each store owns one JSON document that is rewritten whole on every change.

mod catalog;
mod download_status;
mod downloaded_videos;
mod error;
mod file;
mod watch_history;

pub use catalog::SnapshotCatalog;
pub use download_status::JsonDownloadStatusStore;
pub use downloaded_videos::JsonDownloadedVideoStore;
pub use error::StoreError;
pub use watch_history::JsonWatchHistoryStore;

/// Default file names inside the data directory
pub const WATCH_HISTORY_FILE: &str = "watched_history.json";
pub const DOWNLOAD_STATUS_FILE: &str = "download_status.json";
pub const DOWNLOADED_VIDEOS_FILE: &str = "downloaded_videos.json";
