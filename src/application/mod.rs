//! Application layer - Generic services that use ports.

// History upgrade to the URI identifier scheme, run at startup
pub mod migrator;

// Download status / downloaded video bookkeeping
pub mod reconciler;

// Local copy vs network decision
pub mod router;

#[cfg(all(test, feature = "local"))]
mod functional_tests;

pub use migrator::{LegacyMigrator, MigrationReport};
pub use reconciler::{DownloadReconciler, RemovalReport, SweepReport};
pub use router::PlaybackRouter;
