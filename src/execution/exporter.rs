use crate::base::catalog::{Album, FileReference};
use crate::execution::archive::ArchiveBuilder;
use crate::execution::stats::ExportStats;
use crate::ops::sources::AlbumSource;
use crate::prelude::*;
use crate::utils::retryable::{self, RetryOptions};

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The album holds no image-typed files; no fetch is issued.
    #[error("album {0:?} contains no image files")]
    EmptyAlbum(String),
    /// Every file failed retrieval past the retry bound.
    #[error("no files could be downloaded for album {0:?}")]
    NoFilesDownloaded(String),
    /// Another export is already running on this exporter.
    #[error("an export is already in progress")]
    AlreadyInProgress,
    /// Archive assembly failed; no partial artifact is produced.
    #[error("export failed: {0:#}")]
    ExportFailed(anyhow::Error),
}

/// Receives advisory, human-readable progress strings during an export.
/// Not part of the correctness contract.
pub trait StatusSink: Send + Sync {
    fn status(&self, message: &str);
}

/// Default sink: forwards progress strings to the log.
pub struct LogStatusSink;

impl StatusSink for LogStatusSink {
    fn status(&self, message: &str) {
        info!("{message}");
    }
}

/// The packaged output of one export: the zip bytes, a suggested file name,
/// and the job's final counters for partial-success reporting.
#[derive(Debug)]
pub struct ArtifactHandle {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub stats: ExportStats,
}

/// Runs album export jobs against a storage source.
///
/// At most one job is active per exporter; a second `export` call while one
/// is running returns `AlreadyInProgress` instead of queueing. Files are
/// fetched strictly sequentially to respect the upstream service's implicit
/// rate limits.
pub struct AlbumExporter<S> {
    source: S,
    retry: RetryOptions,
    status: Box<dyn StatusSink>,
    busy: AtomicBool,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: AlbumSource> AlbumExporter<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            retry: RetryOptions::default(),
            status: Box::new(LogStatusSink),
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_retry(mut self, retry: RetryOptions) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_status_sink(mut self, sink: impl StatusSink + 'static) -> Self {
        self.status = Box::new(sink);
        self
    }

    /// Runs one export job to completion.
    ///
    /// Each image file is attempted exactly once (through the retry policy);
    /// a file's permanent failure is tallied and skipped, never fatal to the
    /// job. The busy flag is released on every exit path.
    pub async fn export(&self, album: &Album) -> Result<ArtifactHandle, ExportError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(ExportError::AlreadyInProgress);
        }
        let _busy = BusyGuard(&self.busy);

        let images: Vec<&FileReference> = album.image_files().collect();
        if images.is_empty() {
            return Err(ExportError::EmptyAlbum(album.name.clone()));
        }

        info!("exporting album {:?}: {} image files", album.name, images.len());
        let stats = ExportStats::default();
        let mut archive = ArchiveBuilder::new();
        let total = images.len();

        for (index, file) in images.into_iter().enumerate() {
            stats.num_attempted.inc(1);
            self.status
                .status(&format!("Downloading file {}/{}", index + 1, total));

            match retryable::run(|| self.source.fetch_content(file), &self.retry).await {
                Ok(bytes) => {
                    archive
                        .add_file(&file.name, &bytes)
                        .map_err(ExportError::ExportFailed)?;
                    stats.num_succeeded.inc(1);
                }
                Err(err) => {
                    warn!("giving up on {}: {:#}", file.name, err.error);
                    stats.num_failed.inc(1);
                }
            }
        }

        if stats.num_succeeded.get() == 0 {
            return Err(ExportError::NoFilesDownloaded(album.name.clone()));
        }

        let bytes = archive.finish().map_err(ExportError::ExportFailed)?;
        let file_name = format!("{}.zip", album.name);
        info!("exported {file_name}: {stats}");

        Ok(ArtifactHandle {
            file_name,
            bytes,
            stats,
        })
    }
}
