//! Listing Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A listing error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for listing operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document contains no exported services at all.
    #[display("not a Takeout navigator page")]
    InvalidDocument,
    /// An entry doesn't follow the folder/file layout.
    #[display("malformed listing: {_0}")]
    MalformedListing(#[error(not(source))] String),
    #[display("missing required field: {_0}")]
    MissingField(#[error(not(source))] &'static str),
    #[display("cannot read export root {}", _0.display())]
    RootInaccessible(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The page is either well-formed or it isn't.
        matches!(self, Self::RootInaccessible(_))
    }
}
