use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a queued download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    #[default]
    Queued,
    Downloading,
    Completed,
    Failed,
}

/// One row per catalog video that has ever been queued for download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadStatusRecord {
    pub catalog_id: String,
    pub status: DownloadStatus,
    /// Percentage, 0.0 to 100.0
    pub progress: f32,
}

/// One entry per catalog video whose local copy is believed to exist.
///
/// `file_path` is only a claim. Use the reconciler's validated lookup before
/// handing it to a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadedVideoMetadata {
    pub catalog_id: String,
    pub title: String,
    pub file_path: String,
    pub downloaded_at: DateTime<Utc>,
    /// Seconds
    pub duration: f64,
    pub thumbnail: String,
    /// Kind of listing the video was downloaded from (channel, playlist)
    pub source_type: String,
    pub source_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_title: Option<String>,
}

/// A single watched-history row. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedEntry {
    /// Stored identifier string, see [`crate::domain::identifier`].
    pub identifier: String,
    pub position: f64,
    pub last_watched_at: DateTime<Utc>,
    pub total_time_watched: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_watched_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watched: Option<bool>,
}

impl WatchedEntry {
    pub fn new(identifier: impl Into<String>, last_watched_at: DateTime<Utc>) -> Self {
        Self {
            identifier: identifier.into(),
            position: 0.0,
            last_watched_at,
            total_time_watched: 0.0,
            title: None,
            thumbnail: None,
            source_label: None,
            first_watched_at: None,
            duration: None,
            watched: None,
        }
    }

    /// An entry has metadata once any of title, thumbnail or source label is
    /// non-empty.
    pub fn has_metadata(&self) -> bool {
        [&self.title, &self.thumbnail, &self.source_label]
            .into_iter()
            .any(|field| is_filled(field))
    }
}

pub(crate) fn is_filled(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.trim().is_empty())
}

/// Read-only view of what the remote catalog client currently has loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogVideoInfo {
    pub title: String,
    pub thumbnail: String,
    pub source_label: String,
}

/// Outcome of routing a catalog video.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackDecision {
    /// A validated local copy exists.
    Local(DownloadedVideoMetadata),
    /// Stream from the network.
    Network,
}

impl PlaybackDecision {
    pub fn use_local(&self) -> bool {
        matches!(self, PlaybackDecision::Local(_))
    }

    pub fn metadata(&self) -> Option<&DownloadedVideoMetadata> {
        match self {
            PlaybackDecision::Local(metadata) => Some(metadata),
            PlaybackDecision::Network => None,
        }
    }

    pub fn into_metadata(self) -> Option<DownloadedVideoMetadata> {
        match self {
            PlaybackDecision::Local(metadata) => Some(metadata),
            PlaybackDecision::Network => None,
        }
    }
}

/// Where playback for an arbitrary identifier should come from.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackSource {
    /// Downloaded copy of a catalog video.
    LocalCopy(DownloadedVideoMetadata),
    /// Catalog video streamed from the network.
    Network { catalog_id: String },
    /// A file on disk that was never part of the catalog.
    LocalFile { path: String },
    /// A file served by a network media device.
    NetworkDevice { url: String },
}

/// A downloaded catalog video ready to be handed to the player.
///
/// `catalog_id` is kept so back navigation returns to the catalog entry the
/// user came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayableLocalVideo<C> {
    pub catalog_id: String,
    pub title: String,
    pub playback_url: String,
    pub duration: f64,
    pub thumbnail: String,
    pub source_type: String,
    pub source_id: String,
    pub source_title: Option<String>,
    pub navigation: Option<C>,
}
