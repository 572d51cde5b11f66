//! ExifTool Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A metadata writer error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for metadata writer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("exiftool not detected on your system")]
    ExiftoolNotFound,
    /// An explicitly configured executable does not exist or isn't executable.
    #[display("exiftool executable not found: {}", _0.display())]
    ExecutableNotFound(#[error(not(source))] PathBuf),
    /// The process could not be started at all.
    #[display("failed to launch exiftool")]
    Spawn,
    /// ExifTool ran but reported failure; `stderr` carries its diagnostic.
    #[display("exiftool exited with code {}: {stderr}", code.map(|c| c.to_string()).unwrap_or_else(|| "(signal)".to_string()))]
    ToolFailed { code: Option<i32>, stderr: String },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Spawn)
    }
}
