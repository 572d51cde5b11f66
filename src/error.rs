use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that stop a command before it produces a report.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("invalid configuration")]
    Config,
    #[display("exiftool is unavailable")]
    Exiftool,
    #[display("cannot process media root")]
    Embed,
    #[display("cannot read navigator page {}", _0.display())]
    ReadNavigator(#[error(not(source))] PathBuf),
    #[display("cannot check listing")]
    Listing,
}
