use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileProbe: Send + Sync {
    /// Whether `path` currently exists. A missing file is `false`, never an
    /// error; anything that prevents the check also reads as `false`.
    async fn exists(&self, path: &str) -> bool;
}
