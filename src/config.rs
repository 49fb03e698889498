//! Configuration for local deployment.

use crate::adapters::local::json::{
    DOWNLOADED_VIDEOS_FILE, DOWNLOAD_STATUS_FILE, WATCH_HISTORY_FILE,
};
use std::env;
use std::path::PathBuf;

/// Configuration for local/single-machine deployment.
#[derive(Clone, Debug)]
pub struct LocalConfig {
    /// Directory holding the JSON stores
    pub data_dir: PathBuf,
    /// Watched history document
    pub watch_history_file: PathBuf,
    /// Download status document
    pub download_status_file: PathBuf,
    /// Downloaded video metadata document
    pub downloaded_videos_file: PathBuf,
    /// Catalog snapshot consulted by the migration, if any
    pub catalog_snapshot_file: Option<PathBuf>,
    /// Run the history migration before anything else
    pub run_migration: bool,
}

impl LocalConfig {
    /// Load configuration from environment variables (and `.env`).
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = var("TUBEGUARD_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));
        let file = |key: &str, default: &str| {
            var(key)
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join(default))
        };

        Self {
            watch_history_file: file("WATCH_HISTORY_FILE", WATCH_HISTORY_FILE),
            download_status_file: file("DOWNLOAD_STATUS_FILE", DOWNLOAD_STATUS_FILE),
            downloaded_videos_file: file("DOWNLOADED_VIDEOS_FILE", DOWNLOADED_VIDEOS_FILE),
            catalog_snapshot_file: var("CATALOG_SNAPSHOT_FILE").map(PathBuf::from),
            run_migration: var("RUN_MIGRATION").map_or(true, |value| parse_flag(&value)),
            data_dir,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
