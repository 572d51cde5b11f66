//! A point-in-time listing of an export tree.
//!
//! Captured once before any processing starts, so sidecars relocated (or
//! media rewritten) during the run never feed back into pairing decisions.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use exn::ResultExt;
use takeout_sidecar::{MediaFile, MediaFilter, SidecarKind};
use tokio::fs;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// The files of interest in one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    pub media: Vec<MediaFile>,
    /// Names of candidate item sidecars (album `metadata.json` excluded).
    pub sidecars: BTreeSet<String>,
    /// Whether the directory carries an album `metadata.json`.
    pub album: bool,
    /// Files that are neither media nor JSON.
    pub ignored: usize,
}
impl DirectoryListing {
    fn add(&mut self, name: String, filter: &MediaFilter) {
        match SidecarKind::classify(&name) {
            SidecarKind::Album => self.album = true,
            SidecarKind::Item => {
                self.sidecars.insert(name);
            },
            SidecarKind::NotSidecar if filter.is_media(&name) => self.media.push(MediaFile::new(name)),
            SidecarKind::NotSidecar => self.ignored += 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Keyed by path relative to the root; the root itself is the empty path.
    directories: BTreeMap<PathBuf, DirectoryListing>,
    /// Sub-directories that could not be listed (relative paths).
    unreadable: Vec<PathBuf>,
}
impl Snapshot {
    /// Walks `root` recursively.
    ///
    /// Entries whose names aren't valid UTF-8 are skipped with a warning, as
    /// are symlinks. Failing to list a sub-directory is recorded rather than
    /// fatal.
    ///
    /// # Errors
    /// [`ErrorKind::RootInaccessible`] if `root` itself can't be listed.
    #[instrument(level = "debug", skip(root, filter), fields(root = %root.display()))]
    pub async fn capture(root: &Path, filter: &MediaFilter) -> Result<Self> {
        let mut snapshot = Self::default();
        let mut entries = fs::read_dir(root).await.or_raise(|| ErrorKind::RootInaccessible(root.to_path_buf()))?;
        let mut stack = Vec::new();
        let mut current = PathBuf::new();
        loop {
            let mut listing = DirectoryListing::default();
            'entries: loop {
                let entry = match entries.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break 'entries,
                    Err(err) => {
                        tracing::warn!(directory = %current.display(), error = %err, "Failed to read directory entry");
                        break 'entries;
                    },
                };
                let Ok(name) = entry.file_name().into_string() else {
                    tracing::warn!(path = %entry.path().display(), "Skipping entry with a non UTF-8 name");
                    continue 'entries;
                };
                match entry.file_type().await {
                    Ok(kind) if kind.is_dir() => stack.push(current.join(&name)),
                    Ok(kind) if kind.is_file() => listing.add(name, filter),
                    // Symlinks and special files.
                    Ok(_) => {},
                    Err(err) => tracing::warn!(path = %entry.path().display(), error = %err, "Failed to stat entry"),
                }
            }
            listing.media.sort();
            snapshot.directories.insert(current, listing);

            'dirs: loop {
                let Some(next) = stack.pop() else {
                    return Ok(snapshot);
                };
                match fs::read_dir(root.join(&next)).await {
                    Ok(read) => {
                        entries = read;
                        current = next;
                        break 'dirs;
                    },
                    Err(err) => {
                        tracing::warn!(directory = %next.display(), error = %err, "Failed to list directory");
                        snapshot.unreadable.push(next);
                    },
                }
            }
        }
    }

    pub fn directories(&self) -> impl Iterator<Item = (&Path, &DirectoryListing)> {
        self.directories.iter().map(|(path, listing)| (path.as_path(), listing))
    }

    pub fn directory(&self, relative: &Path) -> Option<&DirectoryListing> {
        self.directories.get(relative)
    }

    pub fn unreadable(&self) -> &[PathBuf] {
        &self.unreadable
    }

    pub fn media_count(&self) -> usize {
        self.directories.values().map(|listing| listing.media.len()).sum()
    }
}
