//! Partitioning of a candidate list into prune and keep sets.

use std::cmp::Reverse;

use crate::entry::FileRecord;

/// How many candidates to keep, and which end of the time order the sort
/// starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetentionPolicy {
    pub keep: usize,

    /// Sort oldest-first when `true`, newest-first when `false`. The prune
    /// range always starts at index 0 of that order, so with `keep_oldest` the
    /// oldest files are pruned and the newest `keep` survive.
    pub keep_oldest: bool,
}

impl RetentionPolicy {
    pub fn new(keep: usize, keep_oldest: bool) -> Self {
        Self { keep, keep_oldest }
    }
}

/// A candidate list in decision order, split at `prune_end`.
///
/// `ordered[..prune_end]` is pruned, `ordered[prune_end..]` is kept; the two
/// together are exactly the input candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ordered:   Vec<FileRecord>,
    prune_end: usize,
    shortfall: bool,
}

impl Selection {
    pub fn prune(&self) -> &[FileRecord] {
        &self.ordered[..self.prune_end]
    }

    pub fn kept(&self) -> &[FileRecord] {
        &self.ordered[self.prune_end..]
    }

    /// All candidates, in the order the decision was made.
    pub fn ordered(&self) -> &[FileRecord] {
        &self.ordered
    }

    /// `true` when the keep count exceeded the population and the whole
    /// candidate list was handed over for pruning.
    pub fn is_shortfall(&self) -> bool {
        self.shortfall
    }

    /// Split into `(prune, kept)`.
    pub fn into_parts(mut self) -> (Vec<FileRecord>, Vec<FileRecord>) {
        let kept = self.ordered.split_off(self.prune_end);
        (self.ordered, kept)
    }
}

/// Decide which candidates to prune.
///
/// 1. `keep > total`: every candidate is pruned, in input order.
/// 2. Otherwise sort by modification time (ascending if `keep_oldest`,
///    descending if not) and prune `[0, total - keep)`.
///
/// Ties keep whatever order the unstable sort leaves them in.
pub fn select(mut candidates: Vec<FileRecord>, policy: &RetentionPolicy) -> Selection {
    let total = candidates.len();

    if policy.keep > total {
        return Selection {
            ordered:   candidates,
            prune_end: total,
            shortfall: true,
        };
    }

    if policy.keep_oldest {
        candidates.sort_unstable_by_key(|r| r.modified);
    } else {
        candidates.sort_unstable_by_key(|r| Reverse(r.modified));
    }

    Selection {
        ordered:   candidates,
        prune_end: total - policy.keep,
        shortfall: false,
    }
}
