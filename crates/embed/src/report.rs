use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use crate::error::ErrorKind;
use crate::file::FileResult;

/// How a single media file ended up, for counting purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    SkippedNoMetadata,
    SkippedAmbiguous,
    SkippedMalformed,
    FailedExternalTool,
    FailedOther,
}
impl Outcome {
    pub fn of(result: &FileResult) -> Self {
        match &result.result {
            Ok(_) => Self::Applied,
            Err(err) => match &**err {
                ErrorKind::NoSidecar => Self::SkippedNoMetadata,
                ErrorKind::AmbiguousSidecar(_) => Self::SkippedAmbiguous,
                ErrorKind::MalformedSidecar => Self::SkippedMalformed,
                ErrorKind::ExternalTool(_) => Self::FailedExternalTool,
                ErrorKind::RootInaccessible(_) | ErrorKind::ReadSidecar | ErrorKind::Relocate(_) => Self::FailedOther,
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::FailedExternalTool | Self::FailedOther)
    }
}

/// Per-outcome tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub applied: usize,
    pub skipped_no_metadata: usize,
    pub skipped_ambiguous: usize,
    pub skipped_malformed: usize,
    pub failed_external_tool: usize,
    pub failed_other: usize,
}
impl Counts {
    pub fn record(&mut self, outcome: Outcome) {
        let slot = match outcome {
            Outcome::Applied => &mut self.applied,
            Outcome::SkippedNoMetadata => &mut self.skipped_no_metadata,
            Outcome::SkippedAmbiguous => &mut self.skipped_ambiguous,
            Outcome::SkippedMalformed => &mut self.skipped_malformed,
            Outcome::FailedExternalTool => &mut self.failed_external_tool,
            Outcome::FailedOther => &mut self.failed_other,
        };
        *slot += 1;
    }

    pub fn skipped(&self) -> usize {
        self.skipped_no_metadata + self.skipped_ambiguous + self.skipped_malformed
    }

    pub fn failed(&self) -> usize {
        self.failed_external_tool + self.failed_other
    }

    pub fn total(&self) -> usize {
        self.applied + self.skipped() + self.failed()
    }
}
impl AddAssign for Counts {
    fn add_assign(&mut self, rhs: Self) {
        self.applied += rhs.applied;
        self.skipped_no_metadata += rhs.skipped_no_metadata;
        self.skipped_ambiguous += rhs.skipped_ambiguous;
        self.skipped_malformed += rhs.skipped_malformed;
        self.failed_external_tool += rhs.failed_external_tool;
        self.failed_other += rhs.failed_other;
    }
}
impl Display for Counts {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} applied, {} without metadata, {} ambiguous, {} malformed, {} tool failures, {} other failures",
            self.applied,
            self.skipped_no_metadata,
            self.skipped_ambiguous,
            self.skipped_malformed,
            self.failed_external_tool,
            self.failed_other,
        )
    }
}

/// Summary of a batch run, broken down per directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    directories: BTreeMap<PathBuf, Counts>,
    unreadable: Vec<PathBuf>,
}
impl Report {
    pub fn record(&mut self, result: &FileResult) {
        self.directories.entry(result.job.directory.clone()).or_default().record(Outcome::of(result));
    }

    pub(crate) fn record_unreadable(&mut self, directories: &[PathBuf]) {
        self.unreadable.extend_from_slice(directories);
    }

    pub fn directories(&self) -> impl Iterator<Item = (&Path, &Counts)> {
        self.directories.iter().map(|(path, counts)| (path.as_path(), counts))
    }

    /// Directories that could not be listed, and so were never processed.
    pub fn unreadable(&self) -> &[PathBuf] {
        &self.unreadable
    }

    pub fn totals(&self) -> Counts {
        self.directories.values().fold(Counts::default(), |mut acc, counts| {
            acc += *counts;
            acc
        })
    }

    /// Every media file was applied and every directory was read.
    pub fn is_success(&self) -> bool {
        let totals = self.totals();
        self.unreadable.is_empty() && totals.applied == totals.total()
    }
}
