//! Album export pipeline: enumerate a remote folder of photos, fetch each
//! file sequentially with bounded retry, and pack the successes into a
//! single downloadable zip artifact.

mod base;
mod execution;
mod ops;
mod prelude;
mod settings;
mod utils;

// Flat re-exports — the public API surface
pub use base::catalog::{Album, FileReference};
pub use execution::archive::ArchiveBuilder;
pub use execution::exporter::{
    AlbumExporter, ArtifactHandle, ExportError, LogStatusSink, StatusSink,
};
pub use execution::stats::{Counter, ExportStats};
pub use ops::sources::AlbumSource;
pub use ops::sources::drive::DriveSource;
pub use settings::{FolderSpec, Settings};
pub use utils::retryable::{self, RetryOptions};
