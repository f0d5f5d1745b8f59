//! Candidate predicates.
//!
//! Each predicate is a pure function over one record. A predicate whose
//! criterion is unset always returns `true`; a record is a candidate only when
//! every predicate agrees.

use std::time::{Duration, SystemTime};

use crate::entry::FileRecord;
use crate::traits::Matcher;

const SECS_PER_DAY: u64 = 86_400;

/// Match criteria for one run.
///
/// The reference time used by the age predicate is captured when the criteria
/// are built so every record in a run is judged against the same cutoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCriteria {
    /// Lower-cased extensions without the leading dot. Empty matches all.
    pub extensions: Vec<String>,

    /// Literal, case-sensitive substring of the file name. Empty matches all.
    pub pattern: String,

    /// Minimum age in days. `0` disables the age check.
    pub min_age_days: u64,

    /// "Now" for the age predicate.
    pub now: SystemTime,
}

impl Default for MatchCriteria {
    fn default() -> Self {
        Self {
            extensions:   Vec::new(),
            pattern:      String::new(),
            min_age_days: 0,
            now:          SystemTime::now(),
        }
    }
}

impl MatchCriteria {
    /// Criteria that match every file, judged against the current time.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .filter_map(|e| normalize_extension(e.as_ref()))
            .collect();
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn min_age_days(mut self, days: u64) -> Self {
        self.min_age_days = days;
        self
    }

    /// Pin the reference time for the age predicate.
    pub fn now(mut self, now: SystemTime) -> Self {
        self.now = now;
        self
    }
}

impl Matcher for MatchCriteria {
    fn is_match(&self, record: &FileRecord) -> bool {
        matches_extension(&record.name, &self.extensions)
            && matches_pattern(&record.name, &self.pattern)
            && matches_age(record.modified, self.min_age_days, self.now)
    }
}

/// Strip a leading dot, trim and lower-case an allow-list entry. Blank entries
/// are dropped.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if bare.is_empty() {
        None
    } else {
        Some(bare.to_lowercase())
    }
}

/// The text after the final `.` of `name`, or `""` if there is none.
///
/// A leading-dot name such as `.env` yields `env`.
pub fn extension_of(name: &str) -> &str {
    name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
}

/// Case-insensitive membership of `name`'s extension in `allowed`.
/// `allowed` is expected to be normalised already.
pub fn matches_extension(name: &str, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    let ext = extension_of(name);
    allowed.iter().any(|a| a.eq_ignore_ascii_case(ext))
}

/// Literal, case-sensitive substring containment.
pub fn matches_pattern(name: &str, pattern: &str) -> bool {
    pattern.is_empty() || name.contains(pattern)
}

/// `true` when `modified` is at or before `now - days`. `days == 0` matches
/// everything.
pub fn matches_age(modified: SystemTime, days: u64, now: SystemTime) -> bool {
    if days == 0 {
        return true;
    }
    match age_cutoff(now, days) {
        Some(cutoff) => modified <= cutoff,
        // Cutoff predates the epoch clock range; nothing can be that old.
        None => false,
    }
}

/// `now - days`, or `None` when that underflows the platform clock.
pub fn age_cutoff(now: SystemTime, days: u64) -> Option<SystemTime> {
    let secs = days.checked_mul(SECS_PER_DAY)?;
    now.checked_sub(Duration::from_secs(secs))
}
