//! JSON DownloadStatusStore implementation.

use super::file::JsonFile;
use crate::domain::records::DownloadStatusRecord;
use crate::ports::{BoxError, DownloadStatusStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

type Document = BTreeMap<String, DownloadStatusRecord>;

/// Download status rows keyed by catalog id, in a single JSON object.
#[derive(Debug)]
pub struct JsonDownloadStatusStore {
    file: JsonFile,
}

impl JsonDownloadStatusStore {
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
impl DownloadStatusStore for JsonDownloadStatusStore {
    async fn get(&self, catalog_id: &str) -> Result<Option<DownloadStatusRecord>, BoxError> {
        let mut document: Document = self.file.load().await?;
        Ok(document.remove(catalog_id))
    }

    async fn put(&self, record: &DownloadStatusRecord) -> Result<(), BoxError> {
        let record = record.clone();
        self.file
            .update(move |document: &mut Document| {
                document.insert(record.catalog_id.clone(), record);
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
}
