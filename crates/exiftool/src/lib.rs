//! Writes [`MetadataFields`](takeout_sidecar::MetadataFields) into media files.
//!
//! The only real implementation shells out to [ExifTool](https://exiftool.org),
//! which already knows how to write the same logical field into JPEG, HEIC,
//! PNG and QuickTime containers. Everything is behind the [`MetadataWriter`]
//! trait so that batch processing can be tested without spawning anything.

mod args;
pub mod error;
mod exiftool;
#[cfg(feature = "mock")]
mod mock;
mod writer;

pub use crate::args::arguments;
pub use crate::exiftool::Exiftool;
#[cfg(feature = "mock")]
pub use crate::mock::MockWriter;
pub use crate::writer::{MetadataWriter, WriterHandle};
