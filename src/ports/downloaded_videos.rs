use super::BoxError;
use crate::domain::records::DownloadedVideoMetadata;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DownloadedVideoStore: Send + Sync {
    /// Get the metadata recorded for a downloaded catalog video
    async fn get(&self, catalog_id: &str) -> Result<Option<DownloadedVideoMetadata>, BoxError>;

    /// Insert or replace metadata, keyed by `catalog_id`
    async fn put(&self, metadata: &DownloadedVideoMetadata) -> Result<(), BoxError>;

    /// Delete metadata. Deleting a missing entry is not an error.
    async fn delete(&self, catalog_id: &str) -> Result<(), BoxError>;

    /// Every recorded download
    async fn list(&self) -> Result<Vec<DownloadedVideoMetadata>, BoxError>;
}
