use std::fs;
use std::path::Path;
use std::time::SystemTime;

use tracing::{debug, error, info, info_span, warn};

use crate::error::PruneError;
use crate::remover::{remove, RemovalMode, RemovalOutcome};
use crate::results::{PathReport, ProcessingResults, Tally};
use crate::retention::{select, RetentionPolicy};
use crate::settings::Settings;
use crate::traits::Matcher;
use crate::walker::{collect_candidates, DirectorySource, ErrorPolicy};

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Everything one root path needs, derived once per run from [`Settings`].
pub(crate) struct EngineOptions<'a> {
    pub recursive: bool,
    pub matcher:   &'a dyn Matcher,
    pub policy:    ErrorPolicy,
    pub retention: RetentionPolicy,
    pub removal:   RemovalMode,
}

impl<'a> EngineOptions<'a> {
    pub fn new(settings: &Settings, matcher: &'a dyn Matcher) -> Self {
        Self {
            recursive: settings.recursive,
            matcher,
            policy:    settings.error_policy(),
            retention: settings.retention(),
            removal:   settings.removal(),
        }
    }
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Process every root path in `settings`, in order, judging file age against
/// the current time.
pub fn run(settings: &Settings) -> ProcessingResults {
    run_at(settings, SystemTime::now())
}

/// [`run`] with a pinned reference time.
///
/// Roots are handled one at a time: walk, select, remove, fold. A root that
/// cannot be processed is logged and counted as an issue; the run continues
/// with the next one.
pub fn run_at(settings: &Settings, now: SystemTime) -> ProcessingResults {
    let criteria = settings.criteria(now);
    let opts = EngineOptions::new(settings, &criteria);

    if !opts.removal.enabled {
        info!("removal disabled, running dry");
    }

    let mut results = ProcessingResults::new();
    for root in &settings.paths {
        let _span = info_span!("root", path = %root.display()).entered();
        match process_root(root, &opts) {
            Ok(report) => results.fold(&report),
            Err(err) if is_unusable_root(&err, root) => {
                warn!(error = %err, "root path skipped");
                results.record_issue();
            }
            Err(err) => {
                error!(error = %err, "walk aborted");
                results.record_issue();
            }
        }
    }

    info!(
        paths = results.paths,
        eligible = results.eligible.count,
        eligible_bytes = results.eligible.bytes,
        removed = results.removed.count,
        removed_bytes = results.removed.bytes,
        failed = results.failed.count,
        failed_bytes = results.failed.bytes,
        issues = results.issues,
        "run finished"
    );
    results
}

// ---------------------------------------------------------------------------
// process_root()
// ---------------------------------------------------------------------------

/// Process a single root path with `settings`, ignoring `settings.paths`.
///
/// Returns the full per-root report rather than folding it into run totals.
pub fn process_path(
    root: &Path,
    settings: &Settings,
    now: SystemTime,
) -> Result<PathReport, PruneError> {
    let criteria = settings.criteria(now);
    let opts = EngineOptions::new(settings, &criteria);
    process_root(root, &opts)
}

/// Walk, select and remove under one root path.
///
/// # Errors
///
/// Fails when the root is missing or not a directory, or when the walk aborts
/// under [`ErrorPolicy::Abort`]. Removal failures never surface here; they are
/// in the report's outcomes.
pub(crate) fn process_root(
    root: &Path,
    opts: &EngineOptions<'_>,
) -> Result<PathReport, PruneError> {
    let meta = fs::metadata(root).map_err(|e| PruneError::from_io(root, e))?;
    if !meta.is_dir() {
        return Err(PruneError::InvalidSource(root.to_path_buf()));
    }

    let source = DirectorySource::new(root, opts.recursive);
    let walk = collect_candidates(&source, opts.matcher, opts.policy)?;

    let eligible = Tally::of(&walk.candidates);
    info!(candidates = eligible.count, bytes = eligible.bytes, "scan complete");

    let selection = select(walk.candidates, &opts.retention);
    if selection.is_shortfall() {
        warn!(
            keep = opts.retention.keep,
            candidates = eligible.count,
            "keep count exceeds candidates, every candidate selected for pruning"
        );
    }

    let (prune, kept) = selection.into_parts();
    info!(prune = prune.len(), kept = kept.len(), "retention selected");
    for record in &kept {
        debug!(path = %record.path.display(), "keeping");
    }

    let prune_count = prune.len();
    if !opts.removal.enabled {
        for record in &prune {
            info!(path = %record.path.display(), bytes = record.size, "would remove");
        }
    }

    let outcomes = remove(prune, opts.removal);
    for outcome in &outcomes {
        log_outcome(outcome);
    }

    let halted = opts.removal.enabled && outcomes.len() < prune_count;
    if halted {
        warn!(
            unattempted = prune_count - outcomes.len(),
            "removal stopped at first failure"
        );
    }

    Ok(PathReport {
        root: root.to_path_buf(),
        eligible,
        prune_count,
        kept_count: kept.len(),
        outcomes,
        skipped: walk.skipped,
        halted,
    })
}

fn log_outcome(outcome: &RemovalOutcome) {
    let record = outcome.record();
    match outcome {
        RemovalOutcome::Removed(_) => {
            info!(path = %record.path.display(), bytes = record.size, "removed");
        }
        RemovalOutcome::Failed { error, .. } => {
            error!(
                path = %record.path.display(),
                bytes = record.size,
                error = %error,
                "removal failed"
            );
        }
    }
}

/// A root that is missing or not a directory, as opposed to a walk that broke
/// partway through.
fn is_unusable_root(err: &PruneError, root: &Path) -> bool {
    match err {
        PruneError::InvalidSource(_) => true,
        PruneError::NotFound(p) => p == root,
        _ => false,
    }
}
