//! Ports - Trait definitions for every collaborator the services talk to.

pub mod catalog;
pub mod download_status;
pub mod downloaded_videos;
pub mod probe;
pub mod watch_history;

pub use catalog::CatalogRegistry;
pub use download_status::DownloadStatusStore;
pub use downloaded_videos::DownloadedVideoStore;
pub use probe::FileProbe;
pub use watch_history::WatchHistoryStore;

/// Error type every port returns. Services wrap it into
/// [`crate::error::ReconcileError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
