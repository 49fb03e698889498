//! Catalog snapshot loaded from a JSON file.

use super::error::StoreError;
use super::file::JsonFile;
use crate::domain::records::CatalogVideoInfo;
use crate::ports::{BoxError, CatalogRegistry};
use std::collections::HashMap;
use std::path::PathBuf;

/// What the catalog client had loaded, keyed by catalog id.
///
/// The snapshot is read once; lookups never touch the disk.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCatalog {
    videos: HashMap<String, CatalogVideoInfo>,
}

impl SnapshotCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads `{ "<catalog id>": { "title", "thumbnail", "source_label" } }`.
    /// A missing file is an empty snapshot.
    pub async fn from_file(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let videos = JsonFile::new(path).load().await?;
        Ok(Self { videos })
    }

    pub fn insert(&mut self, catalog_id: impl Into<String>, info: CatalogVideoInfo) {
        self.videos.insert(catalog_id.into(), info);
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

impl CatalogRegistry for SnapshotCatalog {
    fn lookup_by_identifier(&self, catalog_id: &str) -> Result<Option<CatalogVideoInfo>, BoxError> {
        Ok(self.videos.get(catalog_id).cloned())
    }
}
