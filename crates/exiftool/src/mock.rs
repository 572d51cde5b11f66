//! In-memory metadata writer for testing.

use crate::error::{ErrorKind, Result};
use crate::writer::MetadataWriter;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use takeout_sidecar::MetadataFields;
use tokio::sync::Mutex;

/// Records every write instead of touching files.
///
/// Writes to files whose name was passed to [`failing_on`](Self::failing_on)
/// fail the way a rejecting ExifTool would.
#[derive(Default)]
pub struct MockWriter {
    failing: BTreeSet<String>,
    calls: Mutex<Vec<(PathBuf, MetadataFields)>>,
}
impl MockWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            failing: names.into_iter().map(Into::into).collect(),
            calls: Mutex::default(),
        }
    }

    /// Every successful write so far, in completion order.
    pub async fn calls(&self) -> Vec<(PathBuf, MetadataFields)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl MetadataWriter for MockWriter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn write(&self, media: &Path, fields: &MetadataFields) -> Result<()> {
        let name = media.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        if self.failing.contains(&name) {
            exn::bail!(ErrorKind::ToolFailed { code: Some(1), stderr: format!("Error: rejected {name}") });
        }
        self.calls.lock().await.push((media.to_path_buf(), fields.clone()));
        Ok(())
    }
}
