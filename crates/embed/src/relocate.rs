use std::io::{Error as IoError, ErrorKind as IoErrorKind, Result as IoResult};
use std::path::Path;

use tokio::fs;

/// Moves `from` to `to`, creating parent directories as needed.
///
/// Falls back to copy-then-delete when the destination lives on another
/// filesystem. Never overwrites an existing destination.
pub(crate) async fn relocate(from: &Path, to: &Path) -> IoResult<()> {
    if fs::try_exists(to).await? {
        return Err(IoError::new(IoErrorKind::AlreadyExists, format!("{} already exists", to.display())));
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).await?;
    }
    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == IoErrorKind::CrossesDevices => {
            fs::copy(from, to).await?;
            fs::remove_file(from).await
        },
        Err(err) => Err(err),
    }
}
