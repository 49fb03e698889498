use crate::domain::records::DownloadedVideoMetadata;
use crate::error::{ReconcileError, Result};
use crate::ports::{DownloadStatusStore, DownloadedVideoStore, FileProbe};
use tracing::{debug, error, info, warn};

/// What `remove` found before deleting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemovalReport {
    pub status_existed: bool,
    pub metadata_existed: bool,
}

/// Result of sweeping every recorded download for vanished files.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SweepReport {
    pub checked: usize,
    pub removed: Vec<String>,
    pub failed: Vec<String>,
}

/// Keeps the download status store and the downloaded-video store in step.
///
/// Read-only queries come in pairs: `try_*` surfaces store failures, the plain
/// form degrades to the conservative answer (`false` / `None`) and logs.
pub struct DownloadReconciler<S, M, F> {
    status: S,
    videos: M,
    probe: F,
}

impl<S, M, F> DownloadReconciler<S, M, F>
where
    S: DownloadStatusStore,
    M: DownloadedVideoStore,
    F: FileProbe,
{
    pub fn new(status: S, videos: M, probe: F) -> Self {
        Self {
            status,
            videos,
            probe,
        }
    }

    pub fn probe(&self) -> &F {
        &self.probe
    }

    pub async fn try_is_downloaded(&self, catalog_id: &str) -> Result<bool> {
        Ok(self.try_get_metadata(catalog_id).await?.is_some())
    }

    pub async fn is_downloaded(&self, catalog_id: &str) -> bool {
        match self.try_is_downloaded(catalog_id).await {
            Ok(found) => found,
            Err(e) => {
                warn!(catalog_id, error = %e, "Treating video as not downloaded");
                false
            }
        }
    }

    pub async fn try_get_metadata(
        &self,
        catalog_id: &str,
    ) -> Result<Option<DownloadedVideoMetadata>> {
        self.videos
            .get(catalog_id)
            .await
            .map_err(|e| ReconcileError::persistence("read downloaded video", catalog_id, e))
    }

    pub async fn get_metadata(&self, catalog_id: &str) -> Option<DownloadedVideoMetadata> {
        match self.try_get_metadata(catalog_id).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(catalog_id, error = %e, "Ignoring unreadable download metadata");
                None
            }
        }
    }

    /// The single authority on whether the local copy is usable right now.
    ///
    /// No metadata or an empty path answers `None` without touching the
    /// filesystem.
    pub async fn try_get_validated_local_path(&self, catalog_id: &str) -> Result<Option<String>> {
        let Some(metadata) = self.try_get_metadata(catalog_id).await? else {
            return Ok(None);
        };

        if metadata.file_path.is_empty() {
            debug!(catalog_id, "Download metadata has no file path");
            return Ok(None);
        }

        if self.probe.exists(&metadata.file_path).await {
            Ok(Some(metadata.file_path))
        } else {
            debug!(catalog_id, path = %metadata.file_path, "Recorded download is missing on disk");
            Ok(None)
        }
    }

    pub async fn get_validated_local_path(&self, catalog_id: &str) -> Option<String> {
        match self.try_get_validated_local_path(catalog_id).await {
            Ok(path) => path,
            Err(e) => {
                warn!(catalog_id, error = %e, "Could not validate local copy");
                None
            }
        }
    }

    /// Deletes the status row, then the metadata entry.
    ///
    /// Both deletions are always attempted, even when the first one fails.
    /// There is no transaction: on error the caller must assume one of the two
    /// records may already be gone.
    pub async fn remove(&self, catalog_id: &str) -> Result<RemovalReport> {
        let status_existed = match self.status.get(catalog_id).await {
            Ok(record) => record.is_some(),
            Err(e) => {
                warn!(catalog_id, error = %e, "Could not read download status before removal");
                false
            }
        };
        let status_result = self.status.delete(catalog_id).await;

        let metadata_existed = match self.videos.get(catalog_id).await {
            Ok(metadata) => metadata.is_some(),
            Err(e) => {
                warn!(catalog_id, error = %e, "Could not read download metadata before removal");
                false
            }
        };
        let metadata_result = self.videos.delete(catalog_id).await;

        info!(
            catalog_id,
            status_existed, metadata_existed, "Removed download records"
        );

        match (status_result, metadata_result) {
            (Ok(()), Ok(())) => Ok(RemovalReport {
                status_existed,
                metadata_existed,
            }),
            (Err(status_err), metadata_result) => {
                if let Err(metadata_err) = metadata_result {
                    error!(
                        catalog_id,
                        error = %metadata_err,
                        "Downloaded video delete also failed"
                    );
                }
                Err(ReconcileError::persistence(
                    "delete download status",
                    catalog_id,
                    status_err,
                ))
            }
            (Ok(()), Err(metadata_err)) => Err(ReconcileError::persistence(
                "delete downloaded video",
                catalog_id,
                metadata_err,
            )),
        }
    }

    /// Removes every download whose file has disappeared from disk.
    pub async fn reconcile_missing_files(&self) -> Result<SweepReport> {
        let downloads = self
            .videos
            .list()
            .await
            .map_err(|e| ReconcileError::persistence("list downloaded videos", "*", e))?;

        let mut report = SweepReport {
            checked: downloads.len(),
            ..SweepReport::default()
        };

        for metadata in downloads {
            let present =
                !metadata.file_path.is_empty() && self.probe.exists(&metadata.file_path).await;
            if present {
                continue;
            }

            match self.remove(&metadata.catalog_id).await {
                Ok(_) => report.removed.push(metadata.catalog_id),
                Err(e) => {
                    error!(catalog_id = %metadata.catalog_id, error = %e, "Failed to drop stale download");
                    report.failed.push(metadata.catalog_id);
                }
            }
        }

        info!(
            checked = report.checked,
            removed = report.removed.len(),
            failed = report.failed.len(),
            "Download sweep finished"
        );
        Ok(report)
    }
}
