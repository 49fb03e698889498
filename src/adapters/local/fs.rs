use crate::ports::FileProbe;
use async_trait::async_trait;
use std::io::ErrorKind;
use tracing::debug;

/// Checks the local filesystem. Only regular files count as present.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsAdapter;

impl FsAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileProbe for FsAdapter {
    async fn exists(&self, path: &str) -> bool {
        match tokio::fs::metadata(path).await {
            Ok(meta) => meta.is_file(),
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                debug!(path, error = %e, "File probe failed");
                false
            }
        }
    }
}
