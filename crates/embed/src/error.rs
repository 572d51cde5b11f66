//! Error types for the batch dispatcher.
//!
//! Every variant except [`ErrorKind::RootInaccessible`] is scoped to a single
//! media file and ends up counted in the [`Report`](crate::Report) rather than
//! aborting the run.

use std::path::PathBuf;

use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The tree root could not be listed; nothing was processed.
    #[display("cannot read media root {}", _0.display())]
    RootInaccessible(#[error(not(source))] PathBuf),
    #[display("no metadata sidecar")]
    NoSidecar,
    #[display("ambiguous metadata sidecar ({})", _0.join(", "))]
    AmbiguousSidecar(#[error(not(source))] Vec<String>),
    /// The paired sidecar could not be read from disk.
    #[display("cannot read metadata sidecar")]
    ReadSidecar,
    #[display("malformed metadata sidecar")]
    MalformedSidecar,
    /// The metadata writer rejected the file; carries its diagnostic.
    #[display("metadata tool failed: {_0}")]
    ExternalTool(#[error(not(source))] String),
    /// Metadata was written but the sidecar could not be moved aside.
    #[display("cannot relocate metadata sidecar to {}", _0.display())]
    Relocate(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ReadSidecar | Self::ExternalTool(_) | Self::Relocate(_))
    }
}
