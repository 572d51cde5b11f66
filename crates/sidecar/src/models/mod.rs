mod fields;
mod media;
mod sidecar;

pub use self::fields::{GeoPoint, MetadataFields};
pub use self::media::{MediaFile, MediaFilter};
pub use self::sidecar::SidecarKind;
