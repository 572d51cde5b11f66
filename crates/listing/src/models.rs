use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryKind {
    Folder,
    File,
}
impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Folder => f.write_str("folder"),
            Self::File => f.write_str("file"),
        }
    }
}

/// One node of a service's exported tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Folder { name: String, children: Vec<Entry> },
    File { name: String },
}
impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Self::Folder { name, .. } | Self::File { name } => name,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Folder { .. } => EntryKind::Folder,
            Self::File { .. } => EntryKind::File,
        }
    }

    pub fn children(&self) -> &[Entry] {
        match self {
            Self::Folder { children, .. } => children,
            Self::File { .. } => &[],
        }
    }
}

/// A Google product (Photos, Drive, ...) and the tree it exported. The
/// service name doubles as its top-level directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub entries: Vec<Entry>,
}

/// A path the export is supposed to contain, relative to the export root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Expected {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Everything a navigator page says was exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub(crate) services: Vec<Service>,
}
impl Listing {
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Flattens the listing, parents before their children. Each service
    /// directory is included as a folder.
    pub fn expected(&self) -> Vec<Expected> {
        let mut expected = Vec::new();
        for service in &self.services {
            let root = PathBuf::from(&service.name);
            let mut stack: Vec<(PathBuf, &Entry)> =
                service.entries.iter().rev().map(|entry| (root.clone(), entry)).collect();
            expected.push(Expected { path: root, kind: EntryKind::Folder });
            while let Some((parent, entry)) = stack.pop() {
                let path = parent.join(entry.name());
                stack.extend(entry.children().iter().rev().map(|child| (path.clone(), child)));
                expected.push(Expected { path, kind: entry.kind() });
            }
        }
        expected
    }
}
