//! JSON WatchHistoryStore implementation.

use super::file::JsonFile;
use crate::domain::records::WatchedEntry;
use crate::ports::{BoxError, WatchHistoryStore};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// The watched history as one JSON array.
#[derive(Debug)]
pub struct JsonWatchHistoryStore {
    file: JsonFile,
}

impl JsonWatchHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl WatchHistoryStore for JsonWatchHistoryStore {
    async fn read_all(&self) -> Result<Vec<WatchedEntry>, BoxError> {
        Ok(self.file.load().await?)
    }

    async fn write_all(&self, entries: &[WatchedEntry]) -> Result<(), BoxError> {
        self.file.store(&entries).await?;
        Ok(())
    }

    async fn backup(&self, stamp: &str) -> Result<String, BoxError> {
        let path = self.file.backup(stamp).await?;
        Ok(path.to_string_lossy().into_owned())
    }
}
