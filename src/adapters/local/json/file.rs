//! Whole-file JSON document with serialized writers.

use super::error::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

#[derive(Debug)]
pub(super) struct JsonFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFile {
    pub(super) fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or blank file reads as `T::default()`.
    pub(super) async fn load<T>(&self) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        serde_json::from_slice(&bytes).map_err(|e| StoreError::serialization(&self.path, e))
    }

    /// Replaces the file atomically (write to a sibling, then rename).
    pub(super) async fn store<T>(&self, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let _guard = self.write_lock.lock().await;
        self.store_locked(value).await
    }

    /// Load, mutate and store under the write lock. `apply` returns whether
    /// anything changed; unchanged documents are not rewritten.
    pub(super) async fn update<T, R>(
        &self,
        apply: impl FnOnce(&mut T) -> (bool, R),
    ) -> Result<R, StoreError>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load::<T>().await?;
        let (changed, result) = apply(&mut document);
        if changed {
            self.store_locked(&document).await?;
        }
        Ok(result)
    }

    /// Copies the current file to `<file>.backup-<stamp>`.
    pub(super) async fn backup(&self, stamp: &str) -> Result<PathBuf, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".backup-{}", stamp));
        let backup = PathBuf::from(name);
        tokio::fs::copy(&self.path, &backup)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        Ok(backup)
    }

    async fn store_locked<T>(&self, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let json = serde_json::to_vec_pretty(value)
            .map_err(|e| StoreError::serialization(&self.path, e))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_and_blank_files_read_as_default() {
        let dir = tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("absent.json"));
        let loaded: Vec<String> = file.load().await.unwrap();
        assert!(loaded.is_empty());

        std::fs::write(dir.path().join("blank.json"), "  \n").unwrap();
        let file = JsonFile::new(dir.path().join("blank.json"));
        let loaded: BTreeMap<String, u32> = file.load().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFile::new(&path).load::<Vec<String>>().await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[tokio::test]
    async fn test_store_creates_parent_dirs_and_leaves_no_tmp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("doc.json");
        let file = JsonFile::new(&path);

        file.store(&vec!["a".to_string()]).await.unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("nested").join("doc.json.tmp").exists());
        let loaded: Vec<String> = file.load().await.unwrap();
        assert_eq!(loaded, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_unchanged_update_does_not_create_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let file = JsonFile::new(&path);

        let removed = file
            .update(|doc: &mut BTreeMap<String, u32>| {
                let removed = doc.remove("nothing").is_some();
                (removed, removed)
            })
            .await
            .unwrap();

        assert!(!removed);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_backup_copies_current_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        let file = JsonFile::new(&path);
        file.store(&vec![1, 2, 3]).await.unwrap();

        let backup = file.backup("20240101T000000Z").await.unwrap();

        assert_eq!(
            backup.file_name().unwrap().to_str().unwrap(),
            "history.json.backup-20240101T000000Z"
        );
        assert_eq!(
            std::fs::read_to_string(&backup).unwrap(),
            std::fs::read_to_string(&path).unwrap()
        );
    }

    #[tokio::test]
    async fn test_backup_of_missing_file_fails() {
        let dir = tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("history.json"));
        assert!(matches!(
            file.backup("stamp").await,
            Err(StoreError::Io { .. })
        ));
    }
}
