mod common;

use std::collections::HashSet;
use std::time::SystemTime;

use common::{days_ago, names, record};
use fprune::retention::select;
use fprune::{FileRecord, RetentionPolicy};

/// Five records, one per day, deliberately out of time order.
fn candidates(now: SystemTime) -> Vec<FileRecord> {
    vec![
        record("d3", 1, days_ago(now, 3)),
        record("d1", 1, days_ago(now, 1)),
        record("d5", 1, days_ago(now, 5)),
        record("d2", 1, days_ago(now, 2)),
        record("d4", 1, days_ago(now, 4)),
    ]
}

fn name_set(records: &[FileRecord]) -> HashSet<String> {
    records.iter().map(|r| r.name.clone()).collect()
}

#[test]
fn keep_above_population_prunes_everything_in_input_order() {
    let now = SystemTime::now();
    let selection = select(candidates(now), &RetentionPolicy::new(6, false));

    assert!(selection.is_shortfall());
    assert_eq!(names(selection.prune()), vec!["d3", "d1", "d5", "d2", "d4"]);
    assert!(selection.kept().is_empty());
}

#[test]
fn keep_equal_to_population_prunes_nothing() {
    let now = SystemTime::now();
    let selection = select(candidates(now), &RetentionPolicy::new(5, true));

    assert!(!selection.is_shortfall());
    assert!(selection.prune().is_empty());
    assert_eq!(selection.kept().len(), 5);
}

#[test]
fn keep_oldest_sorts_ascending_and_prunes_the_front() {
    let now = SystemTime::now();
    let selection = select(candidates(now), &RetentionPolicy::new(2, true));

    assert_eq!(selection.prune().len(), 3);
    assert_eq!(names(selection.prune()), vec!["d5", "d4", "d3"]);
    assert_eq!(names(selection.kept()), vec!["d2", "d1"]);

    for pruned in selection.prune() {
        for kept in selection.kept() {
            assert!(pruned.modified <= kept.modified);
        }
    }
}

#[test]
fn keep_newest_sorts_descending_and_prunes_the_front() {
    let now = SystemTime::now();
    let selection = select(candidates(now), &RetentionPolicy::new(2, false));

    assert_eq!(names(selection.prune()), vec!["d1", "d2", "d3"]);
    assert_eq!(names(selection.kept()), vec!["d4", "d5"]);
}

#[test]
fn keep_zero_prunes_all_sorted() {
    let now = SystemTime::now();
    let selection = select(candidates(now), &RetentionPolicy::new(0, true));

    assert!(!selection.is_shortfall());
    assert_eq!(names(selection.prune()), vec!["d5", "d4", "d3", "d2", "d1"]);
}

#[test]
fn empty_candidate_list() {
    let selection = select(Vec::new(), &RetentionPolicy::new(0, false));
    assert!(selection.prune().is_empty());
    assert!(selection.kept().is_empty());

    let selection = select(Vec::new(), &RetentionPolicy::new(1, false));
    assert!(selection.is_shortfall());
    assert!(selection.prune().is_empty());
}

#[test]
fn prune_and_kept_partition_the_candidates() {
    let now = SystemTime::now();
    for keep in 0..=7 {
        for keep_oldest in [false, true] {
            let input = candidates(now);
            let expected = name_set(&input);
            let policy = RetentionPolicy::new(keep, keep_oldest);
            let (prune, kept) = select(input, &policy).into_parts();

            assert_eq!(prune.len() + kept.len(), 5, "keep={keep}");
            let mut union = name_set(&prune);
            union.extend(name_set(&kept));
            assert_eq!(union, expected, "keep={keep}");
        }
    }
}

#[test]
fn ties_are_all_accounted_for() {
    let now = SystemTime::now();
    let same = days_ago(now, 1);
    let input = vec![
        record("a", 1, same),
        record("b", 1, same),
        record("c", 1, same),
    ];
    let selection = select(input, &RetentionPolicy::new(1, false));
    assert_eq!(selection.prune().len(), 2);
    assert_eq!(selection.kept().len(), 1);
    assert_eq!(selection.ordered().len(), 3);
}
