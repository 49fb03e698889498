use crate::ports::BoxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Unrecognized identifier format: {raw}")]
    UnrecognizedIdentifierFormat { raw: String },

    #[error("Persistence failure during {operation} for {key}: {source}")]
    Persistence {
        operation: &'static str,
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("Downloaded video {catalog_id} has no file path")]
    MissingFilePath { catalog_id: String },

    #[error("File not accessible: {path}")]
    FileNotAccessible { path: String },

    #[error("Could not create history backup: {source}")]
    BackupCreation {
        #[source]
        source: BoxError,
    },

    #[error("Catalog lookup failed for {identifier}: {source}")]
    CatalogLookup {
        identifier: String,
        #[source]
        source: BoxError,
    },
}

impl ReconcileError {
    pub(crate) fn persistence(operation: &'static str, key: &str, source: BoxError) -> Self {
        ReconcileError::Persistence {
            operation,
            key: key.to_string(),
            source,
        }
    }
}

impl From<crate::domain::identifier::UnrecognizedFormat> for ReconcileError {
    fn from(err: crate::domain::identifier::UnrecognizedFormat) -> Self {
        ReconcileError::UnrecognizedIdentifierFormat { raw: err.raw }
    }
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
