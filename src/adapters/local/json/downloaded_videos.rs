//! JSON DownloadedVideoStore implementation.

use super::file::JsonFile;
use crate::domain::records::DownloadedVideoMetadata;
use crate::ports::{BoxError, DownloadedVideoStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

type Document = BTreeMap<String, DownloadedVideoMetadata>;

/// Downloaded-video metadata keyed by catalog id, in a single JSON object.
#[derive(Debug)]
pub struct JsonDownloadedVideoStore {
    file: JsonFile,
}

impl JsonDownloadedVideoStore {
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
impl DownloadedVideoStore for JsonDownloadedVideoStore {
    async fn get(&self, catalog_id: &str) -> Result<Option<DownloadedVideoMetadata>, BoxError> {
        let mut document: Document = self.file.load().await?;
        Ok(document.remove(catalog_id))
    }

    async fn put(&self, metadata: &DownloadedVideoMetadata) -> Result<(), BoxError> {
        let metadata = metadata.clone();
        self.file
            .update(move |document: &mut Document| {
                document.insert(metadata.catalog_id.clone(), metadata);
                (true, ())
            })
            .await?;
        Ok(())
    }

    async fn delete(&self, catalog_id: &str) -> Result<(), BoxError> {
        self.file
            .update(|document: &mut Document| (document.remove(catalog_id).is_some(), ()))
            .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<DownloadedVideoMetadata>, BoxError> {
        let document: Document = self.file.load().await?;
        Ok(document.into_values().collect())
    }
}
