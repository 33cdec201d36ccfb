// Rust guideline compliant 2026-02-06

//! Property-based tests for the schema converter.

use jbsync_core::{
    convert, map_priority, to_id, IssueType, Link, LinkType, Priority, RawRecord, RecordRef,
};
use proptest::prelude::*;
use std::collections::HashSet;

/// Priority names that contain none of the recognised fragments.
fn arb_unknown_priority() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z ]{0,16}")
        .unwrap()
        .prop_filter("must not contain a known fragment", |name| {
            let lower = name.to_lowercase();
            !["critical", "highest", "high", "medium", "low"]
                .iter()
                .any(|fragment| lower.contains(fragment))
        })
}

/// A batch of `n` stories with random "depends on" and "is blocked by" links.
fn arb_linked_batch() -> impl Strategy<Value = Vec<RawRecord>> {
    (1usize..10).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec((0..n, any::<bool>()), 0..6), n).prop_map(
            move |links| {
                links
                    .into_iter()
                    .enumerate()
                    .map(|(idx, targets)| {
                        let mut record =
                            RawRecord::new(format!("PROJ-{}", idx), "Story", IssueType::named("Story"));
                        for (target, blocked) in targets {
                            let target = RecordRef::new(format!("PROJ-{}", target), IssueType::named("Story"));
                            record.links.push(if blocked {
                                Link {
                                    link_type: LinkType {
                                        name: "Blocks".to_string(),
                                        inward: "is blocked by".to_string(),
                                        outward: "blocks".to_string(),
                                    },
                                    inward: Some(target),
                                    outward: None,
                                }
                            } else {
                                Link {
                                    link_type: LinkType {
                                        name: "Dependency".to_string(),
                                        inward: "is depended on by".to_string(),
                                        outward: "depends on".to_string(),
                                    },
                                    inward: None,
                                    outward: Some(target),
                                }
                            });
                        }
                        record
                    })
                    .collect()
            },
        )
    })
}

proptest! {
    #[test]
    fn prop_unknown_priority_maps_to_p2(name in arb_unknown_priority()) {
        prop_assert_eq!(map_priority(&name), Priority::P2);
    }

    #[test]
    fn prop_ids_are_case_folded_keys(key in "[A-Za-z]{1,6}-[0-9]{1,5}") {
        let id = to_id(&key);
        prop_assert_eq!(&id, &key.to_lowercase());
        prop_assert_eq!(to_id(&id), id.clone());
    }

    /// Dependency lists never repeat an id, never point at the issue itself
    /// and only reference converted issues.
    #[test]
    fn prop_dependencies_are_unique_and_resolved(records in arb_linked_batch()) {
        let export = convert(&records).expect("conversion succeeds");
        let ids: HashSet<&str> = export.issues.iter().map(|i| i.id.as_str()).collect();

        for issue in &export.issues {
            let unique: HashSet<&String> = issue.depends_on.iter().collect();
            prop_assert_eq!(unique.len(), issue.depends_on.len());
            prop_assert!(!issue.depends_on.contains(&issue.id));
            prop_assert!(issue.depends_on.iter().all(|d| ids.contains(d.as_str())));
        }

        let again = convert(&records).expect("conversion succeeds");
        prop_assert_eq!(export, again);
    }
}
