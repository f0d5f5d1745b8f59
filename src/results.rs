use std::fmt;
use std::path::PathBuf;

use humansize::{format_size, BINARY};

use crate::entry::FileRecord;
use crate::error::PruneError;
use crate::remover::RemovalOutcome;

/// A file count with its byte total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub count: usize,
    pub bytes: u64,
}

impl Tally {
    pub fn add(&mut self, record: &FileRecord) {
        self.count += 1;
        self.bytes += record.size;
    }

    pub fn merge(&mut self, other: Tally) {
        self.count += other.count;
        self.bytes += other.bytes;
    }

    pub fn of<'a>(records: impl IntoIterator<Item = &'a FileRecord>) -> Self {
        let mut tally = Self::default();
        for record in records {
            tally.add(record);
        }
        tally
    }
}

/// What happened under one root path.
#[derive(Debug)]
pub struct PathReport {
    pub root: PathBuf,

    /// The full candidate set, before retention selection.
    pub eligible: Tally,

    /// Size of the prune set handed to the remover.
    pub prune_count: usize,

    /// Size of the retained complement.
    pub kept_count: usize,

    /// One outcome per attempted deletion, in attempt order. Empty on dry runs.
    pub outcomes: Vec<RemovalOutcome>,

    /// Traversal errors that were skipped under ignore-errors.
    pub skipped: Vec<PruneError>,

    /// `true` when a failure stopped removal before the prune set was exhausted.
    pub halted: bool,
}

impl PathReport {
    pub fn removed(&self) -> Tally {
        Tally::of(self.outcomes.iter().filter(|o| o.is_removed()).map(|o| o.record()))
    }

    pub fn failed(&self) -> Tally {
        Tally::of(self.outcomes.iter().filter(|o| !o.is_removed()).map(|o| o.record()))
    }

    /// Skipped traversal entries plus failed removals.
    pub fn issues(&self) -> usize {
        self.skipped.len() + self.failed().count
    }
}

/// Overall verdict of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    CompletedWithIssues,
}

/// Running totals across every root path in a run.
///
/// Only ever added to; nothing resets between roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingResults {
    /// Root paths whose report was folded in.
    pub paths: usize,

    pub eligible: Tally,
    pub removed:  Tally,
    pub failed:   Tally,

    /// Traversal failures, removal failures and unusable root paths.
    pub issues: usize,
}

impl ProcessingResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one root path's report into the totals.
    pub fn fold(&mut self, report: &PathReport) {
        self.paths += 1;
        self.eligible.merge(report.eligible);
        self.removed.merge(report.removed());
        self.failed.merge(report.failed());
        self.issues += report.issues();
    }

    /// Record a problem that produced no report, such as a missing root or an
    /// aborted walk.
    pub fn record_issue(&mut self) {
        self.issues += 1;
    }

    pub fn status(&self) -> RunStatus {
        if self.issues == 0 {
            RunStatus::Success
        } else {
            RunStatus::CompletedWithIssues
        }
    }
}

impl fmt::Display for ProcessingResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Eligible: {}", TallyDisplay(self.eligible))?;
        writeln!(f, "Removed:  {}", TallyDisplay(self.removed))?;
        writeln!(f, "Failed:   {}", TallyDisplay(self.failed))?;
        match self.status() {
            RunStatus::Success => write!(f, "Successfully completed"),
            RunStatus::CompletedWithIssues => {
                write!(f, "Completed with issues ({})", self.issues)
            }
        }
    }
}

struct TallyDisplay(Tally);

impl fmt::Display for TallyDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.0.count == 1 { "file" } else { "files" };
        write!(
            f,
            "{} {} ({})",
            self.0.count,
            noun,
            format_size(self.0.bytes, BINARY)
        )
    }
}
