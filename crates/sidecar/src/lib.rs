//! Pairing of exported media files with their Takeout sidecar metadata, and
//! extraction of the handful of fields worth copying back into the media.
//!
//! Nothing in this crate touches the filesystem: the [`Resolver`] works on
//! file names alone and [`MetadataFields`] parses bytes the caller has already
//! read. See the `takeout-embed` crate for the part that walks directories.

mod consts;
pub mod error;
mod fields;
pub mod models;
mod pairing;

pub use crate::consts::{
    ALBUM_METADATA_NAME, DEFAULT_MEDIA_EXTENSIONS, DEFAULT_TRUNCATION_LIMIT, JSON_EXTENSION, LEGACY_SUFFIX,
    SUPPLEMENTAL_SUFFIX,
};
pub use crate::models::{GeoPoint, MediaFile, MediaFilter, MetadataFields, SidecarKind};
pub use crate::pairing::{Correlation, Pairing, Resolver, TruncationPoint, correlate};
