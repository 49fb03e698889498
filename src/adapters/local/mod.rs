//! Local adapters for single-machine deployment.

pub mod fs;
pub mod json;

pub use fs::FsAdapter;
pub use json::{
    JsonDownloadStatusStore, JsonDownloadedVideoStore, JsonWatchHistoryStore, SnapshotCatalog,
    StoreError,
};
