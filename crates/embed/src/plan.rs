use std::path::PathBuf;

use takeout_sidecar::{MediaFile, Pairing, Resolver};

use crate::snapshot::Snapshot;

/// A single media file together with its pairing decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Directory relative to the tree root.
    pub directory: PathBuf,
    pub media: MediaFile,
    pub pairing: Pairing,
}
impl Job {
    /// Path of the media file relative to the tree root.
    pub fn media_path(&self) -> PathBuf {
        self.directory.join(self.media.name())
    }
}

/// Resolves every directory of `snapshot`, producing one job per media file
/// in directory order.
///
/// Pairing happens entirely before any file is touched, so a sidecar claimed
/// by one media file can never be handed to another later on.
pub fn plan(snapshot: &Snapshot, resolver: &Resolver) -> Vec<Job> {
    let mut jobs = Vec::with_capacity(snapshot.media_count());
    for (directory, listing) in snapshot.directories() {
        if listing.media.is_empty() {
            continue;
        }
        let pairings = resolver.resolve(&listing.media, &listing.sidecars);
        jobs.extend(pairings.into_iter().map(|(media, pairing)| Job {
            directory: directory.to_path_buf(),
            media,
            pairing,
        }));
    }
    jobs
}
