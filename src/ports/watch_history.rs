use super::BoxError;
use crate::domain::records::WatchedEntry;
use async_trait::async_trait;

/// Whole-file access to the watched history. There is no partial update.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WatchHistoryStore: Send + Sync {
    async fn read_all(&self) -> Result<Vec<WatchedEntry>, BoxError>;

    async fn write_all(&self, entries: &[WatchedEntry]) -> Result<(), BoxError>;

    /// Copy the currently persisted history aside, tagged with `stamp`.
    /// Returns where the copy was written.
    async fn backup(&self, stamp: &str) -> Result<String, BoxError>;
}
