use std::fs;
use std::io;
use std::path::Path;

use crate::entry::FileRecord;
use crate::error::PruneError;

/// Whether removal runs at all, and whether a failure stops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemovalMode {
    pub enabled:       bool,
    pub ignore_errors: bool,
}

impl RemovalMode {
    pub fn new(enabled: bool, ignore_errors: bool) -> Self {
        Self {
            enabled,
            ignore_errors,
        }
    }
}

/// The result of attempting to delete one file.
#[derive(Debug)]
pub enum RemovalOutcome {
    Removed(FileRecord),
    Failed { record: FileRecord, error: PruneError },
}

impl RemovalOutcome {
    pub fn record(&self) -> &FileRecord {
        match self {
            Self::Removed(record) | Self::Failed { record, .. } => record,
        }
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(_))
    }

    pub fn error(&self) -> Option<&PruneError> {
        match self {
            Self::Removed(_) => None,
            Self::Failed { error, .. } => Some(error),
        }
    }
}

/// Delete every file in `prune` from the filesystem.
///
/// See [`remove_with`] for the ordering and failure rules.
pub fn remove(prune: Vec<FileRecord>, mode: RemovalMode) -> Vec<RemovalOutcome> {
    remove_with(prune, mode, |path| fs::remove_file(path))
}

/// Delete every file in `prune` using `delete`, in order.
///
/// - Disabled mode attempts nothing and returns no outcomes.
/// - Each attempt yields exactly one outcome; nothing is retried.
/// - Without `ignore_errors`, the first failure is recorded and the rest of
///   the set is left unattempted and unrecorded.
pub fn remove_with<F>(
    prune: Vec<FileRecord>,
    mode: RemovalMode,
    mut delete: F,
) -> Vec<RemovalOutcome>
where
    F: FnMut(&Path) -> io::Result<()>,
{
    if !mode.enabled {
        return Vec::new();
    }

    let mut outcomes = Vec::with_capacity(prune.len());
    for record in prune {
        match delete(&record.path) {
            Ok(()) => outcomes.push(RemovalOutcome::Removed(record)),
            Err(e) => {
                let error = PruneError::from_io(record.path.clone(), e);
                outcomes.push(RemovalOutcome::Failed { record, error });
                if !mode.ignore_errors {
                    break;
                }
            }
        }
    }
    outcomes
}
