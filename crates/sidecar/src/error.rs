//! Sidecar Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A sidecar error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for sidecar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The sidecar is not a JSON document, or not a JSON object. Skip the file.
    #[display("malformed sidecar document")]
    MalformedSidecar,
    /// The truncation limit leaves no room for the media name.
    #[display("truncation limit {_0} is too small")]
    InvalidLimit(#[error(not(source))] usize),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Sidecars are either valid JSON or they're not; re-reading the same
        // bytes won't change that.
        false
    }
}
