use super::BoxError;
use crate::domain::records::DownloadStatusRecord;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DownloadStatusStore: Send + Sync {
    /// Get the status row for a catalog id
    async fn get(&self, catalog_id: &str) -> Result<Option<DownloadStatusRecord>, BoxError>;

    /// Insert or replace a status row
    async fn put(&self, record: &DownloadStatusRecord) -> Result<(), BoxError>;

    /// Delete a status row. Deleting a missing row is not an error.
    async fn delete(&self, catalog_id: &str) -> Result<(), BoxError>;
}
