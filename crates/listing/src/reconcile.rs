use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use exn::ResultExt;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::models::{EntryKind, Listing};

/// An expected entry that isn't on disk (or is, but as the wrong kind).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Missing {
    /// Relative to the export root.
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Expected entries nested below a missing folder, not listed separately.
    pub descendants: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReport {
    pub name: String,
    /// Whether the service's top-level directory exists.
    pub present: bool,
    /// Number of expected entries, excluding the service directory itself.
    pub expected: usize,
    pub missing: Vec<Missing>,
}
impl ServiceReport {
    pub fn is_complete(&self) -> bool {
        self.present && self.missing.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub services: Vec<ServiceReport>,
}
impl Reconciliation {
    pub fn is_complete(&self) -> bool {
        self.services.iter().all(ServiceReport::is_complete)
    }

    /// Missing entries across all services, counting collapsed descendants.
    pub fn missing_count(&self) -> usize {
        self.services.iter().flat_map(|s| &s.missing).map(|m| 1 + m.descendants).sum()
    }
}

/// Compares `listing` against the tree under `root`.
///
/// The tree is walked once. A missing folder is reported on its own, with
/// everything the listing places below it folded into
/// [`Missing::descendants`].
///
/// # Errors
/// [`ErrorKind::RootInaccessible`] if `root` can't be listed. Unreadable
/// sub-directories are logged, and their contents reported as missing.
#[instrument(skip(listing, root), fields(root = %root.display()))]
pub fn reconcile(listing: &Listing, root: &Path) -> Result<Reconciliation> {
    let present = walk(root)?;
    let mut services = Vec::with_capacity(listing.services.len());
    let mut expected = listing.expected().into_iter().peekable();
    for service in &listing.services {
        // `expected()` yields each service directory first, then its contents.
        let Some(service_dir) = expected.next() else { break };
        let found = present.get(&service_dir.path) == Some(&EntryKind::Folder);
        let mut report = ServiceReport {
            name: service.name.clone(),
            present: found,
            expected: 0,
            missing: Vec::new(),
        };
        if !found {
            report.missing.push(Missing { path: service_dir.path.clone(), kind: EntryKind::Folder, descendants: 0 });
        }
        while let Some(entry) = expected.next_if(|e| e.path.starts_with(&service_dir.path) && e.path != service_dir.path) {
            report.expected += 1;
            if let Some(last) = report.missing.last_mut()
                && last.kind == EntryKind::Folder
                && entry.path.starts_with(&last.path)
            {
                last.descendants += 1;
                continue;
            }
            if present.get(&entry.path) != Some(&entry.kind) {
                report.missing.push(Missing { path: entry.path, kind: entry.kind, descendants: 0 });
            }
        }
        tracing::info!(
            service = %report.name,
            present = report.present,
            expected = report.expected,
            missing = report.missing.len(),
            "Reconciled service"
        );
        services.push(report);
    }
    Ok(Reconciliation { services })
}

/// Every folder and file under `root`, keyed by relative path. Symlinks are
/// followed.
fn walk(root: &Path) -> Result<BTreeMap<PathBuf, EntryKind>> {
    let mut present = BTreeMap::new();
    fs::read_dir(root).or_raise(|| ErrorKind::RootInaccessible(root.to_path_buf()))?;
    let mut stack = vec![PathBuf::new()];
    while let Some(relative) = stack.pop() {
        let entries = match fs::read_dir(root.join(&relative)) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(directory = %relative.display(), error = %err, "Failed to list directory");
                continue;
            },
        };
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(directory = %relative.display(), error = %err, "Failed to read directory entry");
                    continue;
                },
            };
            let path = relative.join(entry.file_name());
            // `fs::metadata` follows symlinks, unlike `DirEntry::metadata`.
            match fs::metadata(entry.path()) {
                Ok(metadata) if metadata.is_dir() => {
                    present.insert(path.clone(), EntryKind::Folder);
                    stack.push(path);
                },
                Ok(_) => {
                    present.insert(path, EntryKind::File);
                },
                Err(err) => tracing::warn!(path = %path.display(), error = %err, "Failed to stat entry"),
            }
        }
    }
    Ok(present)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::tests::NAVIGATOR;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_complete_export() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "Google Photos/Photos from 2020/IMG_0001.jpg");
        touch(temp.path(), "Google Photos/Photos from 2020/IMG_0001.jpg.supplemental-metadata.json");
        touch(temp.path(), "Google Photos/user-generated-memory-titles.json");
        fs::create_dir(temp.path().join("Keep")).unwrap();

        let listing = Listing::parse(NAVIGATOR).unwrap();
        let reconciliation = reconcile(&listing, temp.path()).unwrap();
        assert!(reconciliation.is_complete());
        assert_eq!(reconciliation.services[0].expected, 4);
        assert_eq!(reconciliation.missing_count(), 0);
    }

    #[test]
    fn test_missing_entries() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "Google Photos/Photos from 2020/IMG_0001.jpg");
        // A directory where a file should be doesn't count.
        fs::create_dir_all(temp.path().join("Google Photos/user-generated-memory-titles.json")).unwrap();

        let listing = Listing::parse(NAVIGATOR).unwrap();
        let reconciliation = reconcile(&listing, temp.path()).unwrap();
        let photos = &reconciliation.services[0];
        assert!(photos.present);
        let missing: Vec<_> = photos.missing.iter().map(|m| m.path.clone()).collect();
        assert_eq!(missing, vec![
            PathBuf::from("Google Photos/Photos from 2020/IMG_0001.jpg.supplemental-metadata.json"),
            PathBuf::from("Google Photos/user-generated-memory-titles.json"),
        ]);
        let keep = &reconciliation.services[1];
        assert!(!keep.present);
        assert_eq!(keep.missing[0].path, PathBuf::from("Keep"));
        assert!(!reconciliation.is_complete());
    }

    #[test]
    fn test_missing_folder_collapses_children() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "Google Photos/user-generated-memory-titles.json");
        fs::create_dir(temp.path().join("Keep")).unwrap();

        let listing = Listing::parse(NAVIGATOR).unwrap();
        let reconciliation = reconcile(&listing, temp.path()).unwrap();
        assert_eq!(reconciliation.services[0].missing, vec![Missing {
            path: PathBuf::from("Google Photos/Photos from 2020"),
            kind: EntryKind::Folder,
            descendants: 2,
        }]);
        assert_eq!(reconciliation.missing_count(), 3);
    }

    #[test]
    fn test_root_inaccessible() {
        let temp = tempfile::tempdir().unwrap();
        let listing = Listing::parse(NAVIGATOR).unwrap();
        let err = reconcile(&listing, &temp.path().join("missing")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::RootInaccessible(_)));
    }
}
