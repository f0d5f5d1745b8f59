mod common;

use std::time::{Duration, SystemTime};

use common::{days_ago, record, DAY};
use fprune::matcher::{
    age_cutoff, extension_of, matches_age, matches_extension, matches_pattern,
    normalize_extension,
};
use fprune::{MatchCriteria, Matcher};

fn allow(exts: &[&str]) -> Vec<String> {
    exts.iter().filter_map(|e| normalize_extension(e)).collect()
}

// ---------------------------------------------------------------------------
// Extension
// ---------------------------------------------------------------------------

#[test]
fn extension_is_text_after_final_dot() {
    assert_eq!(extension_of("archive.tar.gz"), "gz");
    assert_eq!(extension_of("report.TXT"), "TXT");
    assert_eq!(extension_of(".env"), "env");
    assert_eq!(extension_of("README"), "");
    assert_eq!(extension_of("trailing."), "");
}

#[test]
fn extension_match_ignores_case() {
    assert!(matches_extension("report.TXT", &allow(&["txt"])));
    assert!(matches_extension("report.txt", &allow(&["TXT"])));
    assert!(matches_extension("report.txt", &allow(&[".txt"])));
}

#[test]
fn extension_match_against_list() {
    let list = allow(&["tmp", "log"]);
    assert!(matches_extension("a.tmp", &list));
    assert!(matches_extension("b.log", &list));
    assert!(!matches_extension("c.txt", &list));
    assert!(!matches_extension("tmp", &list), "no dot means no extension");
    assert!(!matches_extension("a.tmp.bak", &list), "only the final extension counts");
}

#[test]
fn empty_extension_list_matches_all() {
    assert!(matches_extension("anything.bin", &[]));
    assert!(matches_extension("no_extension", &[]));
}

#[test]
fn normalize_drops_blank_entries() {
    assert_eq!(normalize_extension(" .Gz "), Some("gz".to_string()));
    assert_eq!(normalize_extension("."), None);
    assert_eq!(normalize_extension("   "), None);
}

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

#[test]
fn pattern_is_case_sensitive_substring() {
    assert!(!matches_pattern("Report.log", "report"));
    assert!(matches_pattern("daily-report.log", "report"));
    assert!(matches_pattern("report", "report"));
}

#[test]
fn pattern_is_literal_not_glob() {
    assert!(!matches_pattern("backup.log", "*.log"));
    assert!(matches_pattern("odd*.log", "*.log"));
    assert!(!matches_pattern("backup1.log", "backup?"));
}

#[test]
fn empty_pattern_matches_all() {
    assert!(matches_pattern("whatever", ""));
}

// ---------------------------------------------------------------------------
// Age
// ---------------------------------------------------------------------------

#[test]
fn zero_threshold_matches_any_timestamp() {
    let now = SystemTime::now();
    assert!(matches_age(now, 0, now));
    assert!(matches_age(now + DAY, 0, now), "future files match too");
    assert!(matches_age(SystemTime::UNIX_EPOCH, 0, now));
}

#[test]
fn file_exactly_at_cutoff_matches() {
    let now = SystemTime::now();
    let exactly = days_ago(now, 3);
    assert_eq!(age_cutoff(now, 3), Some(exactly));
    assert!(matches_age(exactly, 3, now));
}

#[test]
fn file_newer_than_cutoff_does_not_match() {
    let now = SystemTime::now();
    let just_newer = days_ago(now, 3) + Duration::from_secs(1);
    assert!(!matches_age(just_newer, 3, now));
    assert!(!matches_age(now, 1, now));
}

#[test]
fn file_older_than_cutoff_matches() {
    let now = SystemTime::now();
    assert!(matches_age(days_ago(now, 30), 7, now));
}

#[test]
fn unrepresentable_cutoff_matches_nothing() {
    let now = SystemTime::now();
    assert_eq!(age_cutoff(now, u64::MAX), None);
    assert!(!matches_age(SystemTime::UNIX_EPOCH, u64::MAX, now));
}

// ---------------------------------------------------------------------------
// MatchCriteria
// ---------------------------------------------------------------------------

#[test]
fn default_criteria_match_everything() {
    let now = SystemTime::now();
    let criteria = MatchCriteria::new().now(now);
    assert!(criteria.is_match(&record("x", 0, now)));
    assert!(criteria.is_match(&record("y.bin", 10, days_ago(now, 1000))));
}

#[test]
fn criteria_require_every_predicate() {
    let now = SystemTime::now();
    let criteria = MatchCriteria::new()
        .extensions(["LOG"])
        .pattern("nightly")
        .min_age_days(2)
        .now(now);

    assert!(criteria.is_match(&record("nightly-01.log", 1, days_ago(now, 5))));
    assert!(!criteria.is_match(&record("nightly-01.txt", 1, days_ago(now, 5))), "extension");
    assert!(!criteria.is_match(&record("weekly-01.log", 1, days_ago(now, 5))), "pattern");
    assert!(!criteria.is_match(&record("nightly-01.log", 1, days_ago(now, 1))), "age");
}

#[test]
fn criteria_builder_normalizes_extensions() {
    let criteria = MatchCriteria::new().extensions([".TMP", "", "Log"]);
    assert_eq!(criteria.extensions, vec!["tmp".to_string(), "log".to_string()]);
}
