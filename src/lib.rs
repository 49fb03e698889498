//! Tubeguard - Video identity and playback-state reconciliation
//!
//! Hexagonal Architecture:
//! - domain/: Pure types (identifiers, stored records)
//! - ports/: Trait definitions for stores, file probe and catalog
//! - adapters/: Concrete implementations
//! - application/: Generic services (reconciler, router, migrator)
//! - config: Environment configuration
//!
//! # Features
//! - `local`: JSON-file stores, filesystem probe and the `tubeguard` binary

pub mod adapters;
pub mod application;
#[cfg(feature = "local")]
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use application::{DownloadReconciler, LegacyMigrator, PlaybackRouter};
pub use domain::identifier::{VideoIdentifier, VideoOrigin};
pub use error::{ReconcileError, Result};

#[cfg(feature = "local")]
pub use config::LocalConfig;
