use crate::entry::FileRecord;
use crate::error::PruneError;

/// A source of file records to evaluate.
///
/// [`DirectorySource`](crate::DirectorySource) is the filesystem implementation.
/// Tests and embedders can implement it over in-memory collections.
///
/// # Error Handling
///
/// Traversal problems (permission denied, vanished entries, unreadable
/// directories) should be yielded as `Err(PruneError)` rather than panicking or
/// silently skipping. [`collect_candidates`](crate::collect_candidates) decides,
/// once per walk, whether an error aborts the walk or is recorded and skipped.
///
/// # Example
///
/// ```rust
/// use std::time::SystemTime;
/// use fprune::{FileRecord, PruneError, Source};
///
/// struct VecSource(Vec<&'static str>);
///
/// impl Source for VecSource {
///     fn walk(&self) -> Box<dyn Iterator<Item = Result<FileRecord, PruneError>> + '_> {
///         Box::new(self.0.iter().map(|name| Ok(FileRecord {
///             path:     name.into(),
///             name:     name.to_string(),
///             size:     0,
///             modified: SystemTime::UNIX_EPOCH,
///             is_dir:   false,
///         })))
///     }
/// }
/// ```
pub trait Source {
    /// Traverse the source and yield records. The sequence is finite and
    /// cannot be resumed once dropped.
    fn walk(&self) -> Box<dyn Iterator<Item = Result<FileRecord, PruneError>> + '_>;
}

/// Determines whether a record is a candidate for retention evaluation.
///
/// # Example
///
/// ```rust
/// use fprune::{FileRecord, Matcher};
///
/// struct LogMatcher;
///
/// impl Matcher for LogMatcher {
///     fn is_match(&self, record: &FileRecord) -> bool {
///         record.name.ends_with(".log")
///     }
/// }
/// ```
pub trait Matcher {
    /// Returns `true` if this record should become a candidate.
    fn is_match(&self, record: &FileRecord) -> bool;
}
