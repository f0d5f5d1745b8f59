use std::fs::Metadata;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::error::PruneError;

/// A single file produced by a [`Source`](crate::traits::Source) during traversal.
///
/// Immutable once built. The walker owns the candidate list for the duration of
/// one root path; records are dropped after the run summary has been folded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Full path to the file, joined onto the root it was found under.
    pub path: PathBuf,

    /// The file's base name.
    pub name: String,

    /// Size in bytes.
    pub size: u64,

    /// Last modification time.
    pub modified: SystemTime,

    /// Whether the entry is a directory. Walkers never hand directories to
    /// matchers, but sources other than [`DirectorySource`](crate::DirectorySource)
    /// may.
    pub is_dir: bool,
}

impl FileRecord {
    /// Build a record from already-fetched metadata.
    ///
    /// Fails only when the platform cannot report a modification time.
    pub fn from_metadata(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        metadata: &Metadata,
    ) -> Result<Self, PruneError> {
        let path = path.into();
        let modified = metadata
            .modified()
            .map_err(|e| PruneError::from_io(path.clone(), e))?;

        Ok(Self {
            path,
            name: name.into(),
            size: metadata.len(),
            modified,
            is_dir: metadata.is_dir(),
        })
    }
}
