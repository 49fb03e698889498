//! One-time upgrade of the watched history to the URI identifier scheme.
//!
//! Each entry goes through the same steps:
//! 1. entries with a modern identifier and some metadata are left alone
//! 2. `local_<base64>` identifiers are decoded and rewritten to `local:<path>`,
//!    backfilling title, source label and first-watched time where empty
//! 3. entries still without metadata are enriched from the file name, a
//!    thumbnail next to the file, the catalog snapshot, or a synthesized
//!    fallback
//!
//! A failing entry is kept as it was. The history is backed up before it is
//! overwritten, and only rewritten when something changed, so running the
//! migration again is a no-op.

use crate::domain::identifier::{self, VideoIdentifier};
use crate::domain::records::{is_filled, WatchedEntry};
use crate::error::{ReconcileError, Result};
use crate::ports::{CatalogRegistry, FileProbe, WatchHistoryStore};
use chrono::Utc;
use std::path::Path;
use tracing::{debug, info, warn};

pub const LOCAL_SOURCE_LABEL: &str = "local";
pub const NETWORK_DEVICE_SOURCE_LABEL: &str = "dlna";
pub const UNKNOWN_SOURCE_LABEL: &str = "unknown";

/// Image extensions tried next to a local video, in order.
const THUMBNAIL_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub total: usize,
    pub migrated: usize,
    pub skipped: usize,
    pub errors: usize,
    pub backup_path: Option<String>,
    pub backup_warning: Option<String>,
    /// Whether the history was rewritten
    pub written: bool,
}

enum EntryOutcome {
    Migrated(WatchedEntry),
    Skipped,
}

pub struct LegacyMigrator<H, F> {
    history: H,
    probe: F,
}

impl<H, F> LegacyMigrator<H, F>
where
    H: WatchHistoryStore,
    F: FileProbe,
{
    pub fn new(history: H, probe: F) -> Self {
        Self { history, probe }
    }

    /// Runs the migration over the whole history.
    ///
    /// `catalog` is whatever the catalog client has loaded right now; it is
    /// only consulted for catalog entries that lack metadata.
    pub async fn migrate<C>(&self, catalog: &C) -> Result<MigrationReport>
    where
        C: CatalogRegistry + ?Sized,
    {
        let entries = self
            .history
            .read_all()
            .await
            .map_err(|e| ReconcileError::persistence("read watched history", "history", e))?;

        let mut report = MigrationReport {
            total: entries.len(),
            ..MigrationReport::default()
        };
        let mut output = Vec::with_capacity(entries.len());

        // one at a time so a failure stays attached to its own entry
        for entry in entries {
            match self.migrate_entry(&entry, catalog).await {
                Ok(EntryOutcome::Migrated(updated)) => {
                    debug!(from = %entry.identifier, to = %updated.identifier, "Migrated history entry");
                    report.migrated += 1;
                    output.push(updated);
                }
                Ok(EntryOutcome::Skipped) => {
                    report.skipped += 1;
                    output.push(entry);
                }
                Err(e) => {
                    warn!(identifier = %entry.identifier, error = %e, "Keeping history entry unchanged");
                    report.errors += 1;
                    output.push(entry);
                }
            }
        }

        if report.migrated == 0 {
            info!(
                total = report.total,
                skipped = report.skipped,
                errors = report.errors,
                "Watched history already up to date"
            );
            return Ok(report);
        }

        let stamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        match self.history.backup(&stamp).await {
            Ok(path) => {
                info!(path = %path, "Backed up watched history");
                report.backup_path = Some(path);
            }
            Err(source) => {
                let err = ReconcileError::BackupCreation { source };
                warn!(error = %err, "Migrating without a backup");
                report.backup_warning = Some(err.to_string());
            }
        }

        self.history
            .write_all(&output)
            .await
            .map_err(|e| ReconcileError::persistence("write watched history", "history", e))?;
        report.written = true;

        info!(
            total = report.total,
            migrated = report.migrated,
            skipped = report.skipped,
            errors = report.errors,
            "Watched history migrated"
        );
        Ok(report)
    }

    async fn migrate_entry<C>(&self, entry: &WatchedEntry, catalog: &C) -> Result<EntryOutcome>
    where
        C: CatalogRegistry + ?Sized,
    {
        let parsed = identifier::parse(&entry.identifier);
        let had_metadata = entry.has_metadata();

        if had_metadata && matches!(&parsed, Ok(id) if !id.is_legacy()) {
            return Ok(EntryOutcome::Skipped);
        }

        let mut updated = entry.clone();

        if let Ok(VideoIdentifier::LegacyOpaque { raw }) = &parsed {
            match identifier::decode_legacy(raw) {
                Some(path) => {
                    updated.identifier = identifier::create_local(&path);
                    backfill_local(&mut updated, &path);
                }
                None => debug!(identifier = %raw, "Legacy identifier did not decode"),
            }
        }

        if !updated.has_metadata() {
            self.enhance(&mut updated, catalog).await?;
        }

        if updated.identifier != entry.identifier || (!had_metadata && updated.has_metadata()) {
            Ok(EntryOutcome::Migrated(updated))
        } else {
            Ok(EntryOutcome::Skipped)
        }
    }

    async fn enhance<C>(&self, entry: &mut WatchedEntry, catalog: &C) -> Result<()>
    where
        C: CatalogRegistry + ?Sized,
    {
        match identifier::parse(&entry.identifier) {
            Ok(VideoIdentifier::Local { path }) => {
                fill(&mut entry.title, identifier::file_stem(&path));
                fill(&mut entry.thumbnail, self.find_thumbnail(&path).await);
                fill(&mut entry.source_label, Some(LOCAL_SOURCE_LABEL.to_string()));
            }
            Ok(VideoIdentifier::Catalog { raw_id }) => {
                let info = catalog.lookup_by_identifier(&raw_id).map_err(|source| {
                    ReconcileError::CatalogLookup {
                        identifier: raw_id.clone(),
                        source,
                    }
                })?;
                match info {
                    Some(info) => {
                        fill(&mut entry.title, Some(info.title));
                        fill(&mut entry.thumbnail, Some(info.thumbnail));
                        fill(&mut entry.source_label, Some(info.source_label));
                    }
                    None => synthesize(entry),
                }
            }
            Ok(VideoIdentifier::NetworkDevice { path, .. }) => {
                fill(&mut entry.title, identifier::file_stem(&path));
                fill(
                    &mut entry.source_label,
                    Some(NETWORK_DEVICE_SOURCE_LABEL.to_string()),
                );
            }
            Ok(VideoIdentifier::LegacyOpaque { .. }) | Err(_) => synthesize(entry),
        }

        // a catalog hit with blank fields still needs something to show
        if !entry.has_metadata() {
            synthesize(entry);
        }
        Ok(())
    }

    /// Looks for `<stem>.<image ext>` in the video's directory.
    async fn find_thumbnail(&self, video_path: &str) -> Option<String> {
        for ext in THUMBNAIL_EXTENSIONS {
            let candidate = Path::new(video_path).with_extension(ext);
            let candidate = candidate.to_string_lossy();
            if candidate == video_path {
                continue;
            }
            if self.probe.exists(&candidate).await {
                return Some(candidate.into_owned());
            }
        }
        None
    }
}

fn backfill_local(entry: &mut WatchedEntry, path: &str) {
    fill(&mut entry.title, identifier::file_stem(path));
    fill(&mut entry.source_label, Some(LOCAL_SOURCE_LABEL.to_string()));
    if entry.first_watched_at.is_none() {
        entry.first_watched_at = Some(entry.last_watched_at);
    }
}

fn synthesize(entry: &mut WatchedEntry) {
    let title = format!("Video {}", entry.identifier);
    fill(&mut entry.title, Some(title));
    fill(&mut entry.source_label, Some(UNKNOWN_SOURCE_LABEL.to_string()));
}

/// Sets `field` only when it is currently empty.
fn fill(field: &mut Option<String>, value: Option<String>) {
    if is_filled(field) {
        return;
    }
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        *field = Some(value);
    }
}
