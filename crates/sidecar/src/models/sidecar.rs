use crate::consts::{ALBUM_METADATA_NAME, JSON_EXTENSION};

/// What a file in an export directory is, as far as sidecars are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidecarKind {
    /// Describes the album/directory as a whole; never paired with a file.
    Album,
    /// Candidate metadata for a single media file.
    Item,
    /// Not JSON at all.
    NotSidecar,
}
impl SidecarKind {
    pub fn classify(name: &str) -> Self {
        if name == ALBUM_METADATA_NAME {
            Self::Album
        } else if name.len() > JSON_EXTENSION.len() && name.ends_with(JSON_EXTENSION) {
            Self::Item
        } else {
            Self::NotSidecar
        }
    }
}
