use super::reconciler::DownloadReconciler;
use crate::domain::identifier::{self, VideoIdentifier};
use crate::domain::records::{
    DownloadedVideoMetadata, PlayableLocalVideo, PlaybackDecision, PlaybackSource,
};
use crate::error::{ReconcileError, Result};
use crate::ports::{DownloadStatusStore, DownloadedVideoStore, FileProbe};
use tracing::{debug, warn};

/// Decides whether a catalog video plays from its downloaded copy or from the
/// network. It only ever fails toward the network.
pub struct PlaybackRouter<S, M, F> {
    reconciler: DownloadReconciler<S, M, F>,
}

impl<S, M, F> PlaybackRouter<S, M, F>
where
    S: DownloadStatusStore,
    M: DownloadedVideoStore,
    F: FileProbe,
{
    pub fn new(reconciler: DownloadReconciler<S, M, F>) -> Self {
        Self { reconciler }
    }

    pub fn reconciler(&self) -> &DownloadReconciler<S, M, F> {
        &self.reconciler
    }

    /// Same decision as [`Self::decide`] with store failures left visible.
    pub async fn try_decide(&self, catalog_id: &str) -> Result<PlaybackDecision> {
        if !self.reconciler.try_is_downloaded(catalog_id).await? {
            return Ok(PlaybackDecision::Network);
        }

        let Some(metadata) = self.reconciler.try_get_metadata(catalog_id).await? else {
            // vanished between the two reads
            warn!(catalog_id, "Download metadata disappeared while routing");
            return Ok(PlaybackDecision::Network);
        };

        match self
            .reconciler
            .try_get_validated_local_path(catalog_id)
            .await?
        {
            Some(_) => Ok(PlaybackDecision::Local(metadata)),
            None => Ok(PlaybackDecision::Network),
        }
    }

    pub async fn decide(&self, catalog_id: &str) -> PlaybackDecision {
        match self.try_decide(catalog_id).await {
            Ok(decision) => {
                debug!(catalog_id, local = decision.use_local(), "Routed playback");
                decision
            }
            Err(e) => {
                warn!(catalog_id, error = %e, "Routing failed, falling back to network");
                PlaybackDecision::Network
            }
        }
    }

    pub async fn get_validated_downloaded_video(
        &self,
        catalog_id: &str,
    ) -> Option<DownloadedVideoMetadata> {
        self.decide(catalog_id).await.into_metadata()
    }

    pub async fn is_routed_to_local(&self, catalog_id: &str) -> bool {
        self.decide(catalog_id).await.use_local()
    }

    /// Builds the player view for a downloaded video.
    ///
    /// The file is probed again here: it may have been deleted since
    /// [`Self::decide`] ran.
    pub async fn materialize_local_view<C>(
        &self,
        metadata: DownloadedVideoMetadata,
        navigation: Option<C>,
    ) -> Result<PlayableLocalVideo<C>> {
        if metadata.file_path.is_empty() {
            return Err(ReconcileError::MissingFilePath {
                catalog_id: metadata.catalog_id,
            });
        }

        if !self.reconciler.probe().exists(&metadata.file_path).await {
            return Err(ReconcileError::FileNotAccessible {
                path: metadata.file_path,
            });
        }

        Ok(PlayableLocalVideo {
            catalog_id: metadata.catalog_id,
            title: metadata.title,
            playback_url: metadata.file_path,
            duration: metadata.duration,
            thumbnail: metadata.thumbnail,
            source_type: metadata.source_type,
            source_id: metadata.source_id,
            source_title: metadata.source_title,
            navigation,
        })
    }

    /// Resolves any stored identifier to a playback source.
    pub async fn route(&self, raw: &str) -> Result<PlaybackSource> {
        match identifier::parse(raw)? {
            VideoIdentifier::Catalog { raw_id } => Ok(match self.decide(&raw_id).await {
                PlaybackDecision::Local(metadata) => PlaybackSource::LocalCopy(metadata),
                PlaybackDecision::Network => PlaybackSource::Network { catalog_id: raw_id },
            }),
            VideoIdentifier::Local { path } => {
                if !path.is_empty() && self.reconciler.probe().exists(&path).await {
                    Ok(PlaybackSource::LocalFile { path })
                } else {
                    Err(ReconcileError::FileNotAccessible { path })
                }
            }
            VideoIdentifier::NetworkDevice { host, path } => Ok(PlaybackSource::NetworkDevice {
                url: format!("http://{}{}", host, path),
            }),
            VideoIdentifier::LegacyOpaque { raw } => {
                Err(ReconcileError::UnrecognizedIdentifierFormat { raw })
            }
        }
    }
}
