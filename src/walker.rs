use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};
use tracing::{trace, warn};

use crate::entry::FileRecord;
use crate::error::PruneError;
use crate::traits::{Matcher, Source};

// ---------------------------------------------------------------------------
// ErrorPolicy
// ---------------------------------------------------------------------------

/// What a walk does with a traversal error. Chosen once per walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop the walk and propagate the first error.
    Abort,

    /// Log the error, skip the offending entry or subtree, keep going.
    Skip,
}

impl ErrorPolicy {
    pub fn from_ignore_errors(ignore_errors: bool) -> Self {
        if ignore_errors {
            Self::Skip
        } else {
            Self::Abort
        }
    }
}

// ---------------------------------------------------------------------------
// DirectorySource
// ---------------------------------------------------------------------------

/// Filesystem [`Source`] rooted at one directory.
///
/// Flat mode lists the root's direct entries; recursive mode descends depth
/// first. Both visit entries in lexical file-name order, never follow symbolic
/// links, and never yield directories or the root itself.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root:      PathBuf,
    recursive: bool,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, recursive: bool) -> Self {
        Self {
            root: root.into(),
            recursive,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn builder(&self) -> WalkBuilder {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(false)
            .same_file_system(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        if !self.recursive {
            builder.max_depth(Some(1));
        }
        builder
    }
}

impl Source for DirectorySource {
    fn walk(&self) -> Box<dyn Iterator<Item = Result<FileRecord, PruneError>> + '_> {
        let walk = self.builder().build().filter_map(|res| match res {
            Ok(entry) => to_record(entry),
            Err(e) => Some(Err(map_ignore_error(e))),
        });
        Box::new(walk)
    }
}

/// Convert a walked entry, dropping the root and directories.
fn to_record(entry: DirEntry) -> Option<Result<FileRecord, PruneError>> {
    if entry.depth() == 0 {
        return None;
    }
    if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
        return None;
    }

    let name = entry.file_name().to_string_lossy().into_owned();
    let record = entry
        .metadata()
        .map_err(map_ignore_error)
        .and_then(|md| FileRecord::from_metadata(entry.path(), name, &md));
    Some(record)
}

// ---------------------------------------------------------------------------
// collect_candidates()
// ---------------------------------------------------------------------------

/// The candidates found by one walk plus any errors skipped along the way.
#[derive(Debug, Default)]
pub struct Walk {
    /// Records that passed the matcher, in traversal order.
    pub candidates: Vec<FileRecord>,

    /// Traversal errors skipped under [`ErrorPolicy::Skip`]. Always empty
    /// under [`ErrorPolicy::Abort`].
    pub skipped: Vec<PruneError>,
}

/// Drain `source`, keeping the records `matcher` accepts.
///
/// # Errors
///
/// Under [`ErrorPolicy::Abort`] the first traversal error ends the walk and is
/// returned. Under [`ErrorPolicy::Skip`] this never fails.
pub fn collect_candidates(
    source: &dyn Source,
    matcher: &dyn Matcher,
    policy: ErrorPolicy,
) -> Result<Walk, PruneError> {
    let mut walk = Walk::default();

    for item in source.walk() {
        match item {
            Ok(record) => {
                if matcher.is_match(&record) {
                    trace!(path = %record.path.display(), "candidate");
                    walk.candidates.push(record);
                } else {
                    trace!(path = %record.path.display(), "not matched");
                }
            }
            Err(err) => match policy {
                ErrorPolicy::Abort => return Err(err),
                ErrorPolicy::Skip => {
                    warn!(error = %err, "skipping unreadable entry");
                    walk.skipped.push(err);
                }
            },
        }
    }

    Ok(walk)
}

// ---------------------------------------------------------------------------
// Map ignore::Error to PruneError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> PruneError {
    match e {
        // Real walk errors arrive as WithPath { WithDepth { Io } }.
        ignore::Error::WithPath { path, err } => match strip_depth(*err) {
            ignore::Error::Io(io_err) => PruneError::from_io(path, io_err),
            other => PruneError::Walk(format!("{}: {}", path.display(), other)),
        },
        ignore::Error::WithDepth { err, .. } => map_ignore_error(*err),
        ignore::Error::Io(io_err) => PruneError::Io {
            path: PathBuf::new(),
            source: io_err,
        },
        other => PruneError::Walk(other.to_string()),
    }
}

fn strip_depth(mut e: ignore::Error) -> ignore::Error {
    loop {
        match e {
            ignore::Error::WithDepth { err, .. } => e = *err,
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use super::map_ignore_error;
    use crate::error::PruneError;

    fn nested(kind: io::ErrorKind) -> ignore::Error {
        ignore::Error::WithPath {
            path: PathBuf::from("/data/locked"),
            err:  Box::new(ignore::Error::WithDepth {
                depth: 1,
                err:   Box::new(ignore::Error::Io(io::Error::new(kind, "walk"))),
            }),
        }
    }

    #[test]
    fn nested_permission_error_keeps_kind_and_path() {
        let err = map_ignore_error(nested(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, PruneError::PermissionDenied(_)));
        assert_eq!(err.path(), Some(&PathBuf::from("/data/locked")));
    }

    #[test]
    fn nested_not_found_keeps_kind_and_path() {
        let err = map_ignore_error(nested(io::ErrorKind::NotFound));
        assert!(matches!(err, PruneError::NotFound(_)));
        assert_eq!(err.path(), Some(&PathBuf::from("/data/locked")));
    }

    #[test]
    fn nested_other_io_error_keeps_path() {
        let err = map_ignore_error(nested(io::ErrorKind::Other));
        assert!(matches!(err, PruneError::Io { .. }));
        assert_eq!(err.path(), Some(&PathBuf::from("/data/locked")));
    }
}
