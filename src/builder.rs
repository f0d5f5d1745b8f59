use std::path::PathBuf;
use std::time::SystemTime;

use crate::engine::run_at;
use crate::error::PruneError;
use crate::results::ProcessingResults;
use crate::settings::{Settings, SettingsLayer};

// ---------------------------------------------------------------------------
// PruneBuilder
// ---------------------------------------------------------------------------

/// Programmatic entry point for configuring and executing a prune run.
///
/// Created via [`fprune::prune()`](crate::prune). Chained setters fill a
/// [`SettingsLayer`] that is merged over the built-in defaults (and over a
/// [`base`](PruneBuilder::base) layer, if given) and validated on
/// [`run()`](PruneBuilder::run).
///
/// # Example
///
/// ```rust,ignore
/// let results = fprune::prune()
///     .path("/var/tmp/reports")
///     .extension("tmp")
///     .keep(3)
///     .remove(true)
///     .run()?;
/// ```
#[derive(Debug, Default)]
pub struct PruneBuilder {
    base:  SettingsLayer,
    layer: SettingsLayer,
    now:   Option<SystemTime>,
}

impl PruneBuilder {
    // ── Layers ────────────────────────────────────────────────────────────

    /// Settings the chained setters override, e.g. a loaded config file.
    pub fn base(mut self, layer: SettingsLayer) -> Self {
        self.base = layer;
        self
    }

    // ── Roots ─────────────────────────────────────────────────────────────

    /// Add a root path to scan.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.layer.paths.get_or_insert_with(Vec::new).push(path.into());
        self
    }

    /// Replace the root paths to scan.
    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.layer.paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Descend into subdirectories. Off by default.
    pub fn recursive(mut self, yes: bool) -> Self {
        self.layer.recursive = Some(yes);
        self
    }

    // ── Matching ──────────────────────────────────────────────────────────

    /// Only files whose name contains `pattern`, case-sensitively.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.layer.pattern = Some(pattern.into());
        self
    }

    /// Add an extension to the allow-list. Case and a leading dot are ignored.
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.layer.extensions.get_or_insert_with(Vec::new).push(ext.into());
        self
    }

    /// Only files modified at least `days` days ago. `0` disables the check.
    pub fn min_age_days(mut self, days: u64) -> Self {
        self.layer.age_days = Some(i64::try_from(days).unwrap_or(i64::MAX));
        self
    }

    /// Judge file age against `now` instead of the wall clock.
    pub fn now(mut self, now: SystemTime) -> Self {
        self.now = Some(now);
        self
    }

    // ── Retention ─────────────────────────────────────────────────────────

    /// How many candidates survive per root path.
    pub fn keep(mut self, n: usize) -> Self {
        self.layer.keep = Some(i64::try_from(n).unwrap_or(i64::MAX));
        self
    }

    /// Sort candidates oldest-first before selecting the prune range.
    pub fn keep_oldest(mut self, yes: bool) -> Self {
        self.layer.keep_oldest = Some(yes);
        self
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Actually delete files. Off by default, which makes the run a dry run.
    pub fn remove(mut self, yes: bool) -> Self {
        self.layer.remove = Some(yes);
        self
    }

    /// Skip unreadable entries and keep deleting after a failed removal.
    pub fn ignore_errors(mut self, yes: bool) -> Self {
        self.layer.ignore_errors = Some(yes);
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Merge and validate without running.
    ///
    /// # Errors
    ///
    /// Returns the first validation error; see [`SettingsLayer::validate`].
    pub fn build(self) -> Result<Settings, PruneError> {
        SettingsLayer::defaults()
            .merge(self.base)
            .merge(self.layer)
            .validate()
    }

    /// Execute the run and return the cumulative totals.
    ///
    /// Blocks until every root path has been processed. Per-file problems do
    /// not fail the run; check [`ProcessingResults::status`].
    ///
    /// # Errors
    ///
    /// Returns `Err` only for invalid settings (no paths, negative values).
    pub fn run(self) -> Result<ProcessingResults, PruneError> {
        let now = self.now.unwrap_or_else(SystemTime::now);
        let settings = self.build()?;
        Ok(run_at(&settings, now))
    }
}
