// Rust guideline compliant 2026-02-06

//! Property-based tests for the graph fetcher.
//!
//! Random link graphs, cycles included, must be walked to completion with
//! every reachable key fetched exactly once.

use jbsync_core::{GraphFetcher, IssueType, Link, LinkType, MemorySource, RawRecord, RecordRef};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet, VecDeque};

fn key(n: usize) -> String {
    format!("K-{}", n)
}

/// Generates a node count and, per node, its outgoing neighbours and
/// whether it has an epic parent.
fn arb_graph() -> impl Strategy<Value = (usize, Vec<(Vec<usize>, bool)>)> {
    (1usize..12).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec(
                (prop::collection::vec(0..n, 0..4), any::<bool>()),
                n,
            ),
        )
    })
}

fn build_records(adjacency: &[(Vec<usize>, bool)]) -> Vec<RawRecord> {
    adjacency
        .iter()
        .enumerate()
        .map(|(idx, (neighbours, epic_parent))| {
            let mut record = RawRecord::new(key(idx), "Node", IssueType::named("Task"));
            for (i, &target) in neighbours.iter().enumerate() {
                let target_ref = RecordRef::new(key(target), IssueType::named("Task"));
                let (inward, outward) = if i % 2 == 0 {
                    (None, Some(target_ref))
                } else {
                    (Some(target_ref), None)
                };
                record.links.push(Link {
                    link_type: LinkType::default(),
                    inward,
                    outward,
                });
            }
            if *epic_parent {
                record.parent = Some(RecordRef::new(format!("EPIC-{}", idx), IssueType::named("Epic")));
            }
            record
        })
        .collect()
}

fn reachable(adjacency: &[(Vec<usize>, bool)], start: usize) -> BTreeSet<String> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        if seen.insert(node) {
            queue.extend(adjacency[node].0.iter().copied());
        }
    }
    seen.into_iter().map(key).collect()
}

proptest! {
    /// Every reachable key appears exactly once and nothing else is fetched,
    /// epic parents in particular.
    #[test]
    fn prop_fetch_visits_reachable_keys_once((_n, adjacency) in arb_graph()) {
        let source = MemorySource::new(build_records(&adjacency));
        let records = GraphFetcher::new(&source).fetch_issue(&key(0)).expect("fetch succeeds");

        let returned: Vec<String> = records.iter().map(|r| r.key.clone()).collect();
        let unique: BTreeSet<String> = returned.iter().cloned().collect();
        prop_assert_eq!(unique.len(), returned.len(), "duplicate record in result");
        prop_assert_eq!(&unique, &reachable(&adjacency, 0));

        let fetched = source.fetched();
        prop_assert_eq!(fetched.len(), returned.len(), "a key was fetched twice");
        prop_assert!(fetched.iter().all(|k| !k.starts_with("EPIC-")));
        prop_assert_eq!(returned.first().map(String::as_str), Some("K-0"));
    }

    /// Seeding with every key at once fetches each node once.
    #[test]
    fn prop_all_seeds_fetch_each_node_once((n, adjacency) in arb_graph()) {
        let source = MemorySource::new(build_records(&adjacency));
        let seeds: Vec<String> = (0..n).map(key).collect();
        let records = GraphFetcher::new(&source).fetch_from(&seeds).expect("fetch succeeds");

        prop_assert_eq!(records.len(), n);
        prop_assert_eq!(source.fetched().len(), n);
    }
}
