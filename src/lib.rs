//! # fprune
//!
//! Unattended cleanup of accumulating generated files.
//!
//! fprune scans one or more root paths, picks out the files that match the
//! configured criteria (name substring, extension, minimum age), keeps a
//! configured number of them and deletes the rest.
//!
//! Each root path goes through the same sequential pipeline:
//!
//! 1. [`DirectorySource`] walks the root, flat or recursive, and
//!    [`MatchCriteria`] decides which files become candidates.
//! 2. [`retention::select`] orders the candidates by modification time and
//!    splits them into prune and keep sets.
//! 3. [`remove`] deletes the prune set, honouring the ignore-errors policy.
//! 4. [`ProcessingResults`] folds the outcome into run-wide totals.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! let results = fprune::prune()
//!     .path("/var/tmp/exports")
//!     .extension("csv")
//!     .min_age_days(7)
//!     .keep(5)
//!     .remove(true)
//!     .run()
//!     .unwrap();
//!
//! println!("{results}");
//! ```
//!
//! Without `.remove(true)` the run is a dry run: selection happens and is
//! logged, nothing is deleted.

#![forbid(unsafe_code)]

pub mod engine;
pub mod matcher;
pub mod retention;
pub mod settings;

mod builder;
mod entry;
mod error;
mod remover;
mod results;
mod traits;
mod walker;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::PruneBuilder;
pub use engine::{process_path, run, run_at};
pub use entry::FileRecord;
pub use error::PruneError;
pub use matcher::MatchCriteria;
pub use remover::{remove, remove_with, RemovalMode, RemovalOutcome};
pub use results::{PathReport, ProcessingResults, RunStatus, Tally};
pub use retention::{RetentionPolicy, Selection};
pub use settings::{LogFormat, LogSettings, Settings, SettingsLayer};
pub use traits::{Matcher, Source};
pub use walker::{collect_candidates, DirectorySource, ErrorPolicy, Walk};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`PruneBuilder`] to configure and run a cleanup.
///
/// # Example
///
/// ```rust
/// let dir = std::env::temp_dir();
/// let results = fprune::prune()
///     .path(&dir)
///     .pattern("no-such-file-fprune-doc")
///     .run()
///     .unwrap();
///
/// assert_eq!(results.eligible.count, 0);
/// assert_eq!(results.removed.count, 0);
/// ```
pub fn prune() -> PruneBuilder {
    PruneBuilder::default()
}
