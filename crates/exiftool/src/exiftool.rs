use crate::args::arguments;
use crate::error::{ErrorKind, Result};
use crate::writer::MetadataWriter;
use async_trait::async_trait;
use exn::ResultExt;
use std::path::{Path, PathBuf};
use takeout_sidecar::MetadataFields;
use tokio::process::Command;
use tracing::instrument;

/// An ExifTool executable.
#[derive(Debug, Clone)]
pub struct Exiftool {
    path: PathBuf,
}
impl Exiftool {
    /// Locates ExifTool. An explicit `executable` may be a path or a name to
    /// look up on `PATH`; without one, `exiftool` is looked up on `PATH`.
    pub fn discover(executable: Option<&Path>) -> Result<Self> {
        if let Some(executable) = executable {
            return match which::which(executable) {
                Ok(path) => Ok(Self { path }),
                Err(_) => exn::bail!(ErrorKind::ExecutableNotFound(executable.to_path_buf())),
            };
        }
        if let Ok(path) = which::which("exiftool") {
            return Ok(Self { path });
        }
        tracing::info!("ExifTool executable not found in PATH");
        exn::bail!(ErrorKind::ExiftoolNotFound);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `exiftool -ver`, confirming the executable actually works.
    pub async fn version(&self) -> Result<String> {
        let output = Command::new(&self.path).arg("-ver").output().await.or_raise(|| ErrorKind::Spawn)?;
        if !output.status.success() {
            exn::bail!(ErrorKind::ToolFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl MetadataWriter for Exiftool {
    fn name(&self) -> &str {
        "exiftool"
    }

    #[instrument(level = "debug", skip(self, media, fields), fields(media = %media.display()))]
    async fn write(&self, media: &Path, fields: &MetadataFields) -> Result<()> {
        let Some(args) = arguments(media, fields) else {
            tracing::debug!("Sidecar holds nothing worth writing; skipping exiftool");
            return Ok(());
        };
        let output = Command::new(&self.path).args(&args).output().await.or_raise(|| ErrorKind::Spawn)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        tracing::trace!(stdout = %stdout.trim(), "exiftool finished");
        if !output.status.success() {
            exn::bail!(ErrorKind::ToolFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
