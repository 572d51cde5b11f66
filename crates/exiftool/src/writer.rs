use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use takeout_sidecar::MetadataFields;

/// Something that can embed [`MetadataFields`] into a media file in place.
///
/// Implementations must leave the file untouched when they return an error,
/// as far as the underlying tool allows.
#[async_trait]
pub trait MetadataWriter {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Writes `fields` into the file at `media`. Writing a field set with
    /// nothing in it is a successful no-op.
    async fn write(&self, media: &Path, fields: &MetadataFields) -> Result<()>;
}

pub type WriterHandle = Arc<dyn MetadataWriter + Send + Sync>;
