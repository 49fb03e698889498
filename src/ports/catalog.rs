use super::BoxError;
use crate::domain::records::CatalogVideoInfo;

/// Snapshot of the videos the remote catalog client has loaded right now.
///
/// Absence is normal; callers fall back to synthesized metadata.
#[cfg_attr(test, mockall::automock)]
pub trait CatalogRegistry: Send + Sync {
    fn lookup_by_identifier(&self, catalog_id: &str) -> Result<Option<CatalogVideoInfo>, BoxError>;
}
