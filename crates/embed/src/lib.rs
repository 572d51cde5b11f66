//! Batch application of sidecar metadata to an exported media tree.
//!
//! The entry point is [`embed`], which snapshots the tree under
//! [`Context::root`], pairs every media file with its sidecar up front, then
//! streams one [`FileResult`] per media file as the configured
//! [`MetadataWriter`](takeout_exiftool::MetadataWriter) works through them.
//! [`run`] drains that stream into a [`Report`].

pub mod error;
mod file;
mod plan;
mod relocate;
mod report;
mod snapshot;
mod stream;

use std::num::NonZeroUsize;
use std::path::PathBuf;

use takeout_exiftool::WriterHandle;
use takeout_sidecar::{MediaFilter, Resolver};

pub use crate::file::{Applied, FileResult};
pub use crate::plan::{Job, plan};
pub use crate::report::{Counts, Outcome, Report};
pub use crate::snapshot::{DirectoryListing, Snapshot};
pub use crate::stream::{EmbedEvent, embed, run};

/// What happens to a successfully paired media file.
#[derive(Clone)]
pub enum Mode {
    /// Write the sidecar's fields with the given writer.
    Apply(WriterHandle),
    /// Read and validate sidecars, but leave media and sidecars untouched.
    DryRun,
}
impl Mode {
    pub fn is_dry_run(&self) -> bool {
        matches!(self, Self::DryRun)
    }
}

/// Everything a batch run needs to know.
#[derive(Clone)]
pub struct Context {
    /// The Takeout media tree being processed.
    pub root: PathBuf,
    pub mode: Mode,
    pub resolver: Resolver,
    pub filter: MediaFilter,
    /// Consumed sidecars are moved here, mirroring their path under `root`.
    /// `None` leaves them in place.
    pub metadata_dir: Option<PathBuf>,
    /// Maximum number of media files processed at once.
    pub concurrency: usize,
}
impl Context {
    pub fn new(root: impl Into<PathBuf>, mode: Mode) -> Self {
        Self {
            root: root.into(),
            mode,
            resolver: Resolver::default(),
            filter: MediaFilter::default(),
            metadata_dir: None,
            concurrency: default_concurrency(),
        }
    }
}

/// One worker per available CPU, falling back to a single worker.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1)
}
