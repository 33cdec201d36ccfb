// Rust guideline compliant 2026-02-06

//! Unit tests for the graph fetcher.
//!
//! These tests cover traversal order, cycle termination, epic parents,
//! search entry points and failure handling.

use jbsync_core::{
    Error, FetchAdvisory, GraphFetcher, IssueType, Link, LinkType, MemorySource, RawRecord,
    RecordRef, TruncationPolicy,
};

fn story(key: &str) -> RawRecord {
    RawRecord::new(key, format!("Story {}", key), IssueType::named("Story"))
}

fn subtask(key: &str, parent: &str) -> RawRecord {
    let mut record = RawRecord::new(key, format!("Subtask {}", key), IssueType::subtask("Sub-task"));
    record.parent = Some(RecordRef::new(parent, IssueType::named("Story")));
    record
}

fn outward(phrase: &str, key: &str) -> Link {
    Link {
        link_type: LinkType {
            name: "Dependency".to_string(),
            inward: "is depended on by".to_string(),
            outward: phrase.to_string(),
        },
        inward: None,
        outward: Some(RecordRef::new(key, IssueType::named("Story"))),
    }
}

fn inward(phrase: &str, key: &str) -> Link {
    Link {
        link_type: LinkType {
            name: "Blocks".to_string(),
            inward: phrase.to_string(),
            outward: "blocks".to_string(),
        },
        inward: Some(RecordRef::new(key, IssueType::named("Story"))),
        outward: None,
    }
}

fn keys(records: &[RawRecord]) -> Vec<&str> {
    records.iter().map(|r| r.key.as_str()).collect()
}

#[test]
fn test_story_with_subtask_and_dependency() {
    let mut a = story("A");
    a.subtasks = vec!["B".to_string()];
    a.links.push(outward("depends on", "C"));

    let source = MemorySource::new(vec![a, subtask("B", "A"), story("C")]);
    let fetcher = GraphFetcher::new(&source);

    let records = fetcher.fetch_issue("A").expect("fetch should succeed");
    assert_eq!(keys(&records), vec!["A", "B", "C"]);
    assert_eq!(source.fetched(), vec!["A", "B", "C"]);
}

#[test]
fn test_subtask_pulls_in_parent() {
    let source = MemorySource::new(vec![subtask("S", "P"), story("P")]);
    let records = GraphFetcher::new(&source).fetch_issue("S").unwrap();
    assert_eq!(keys(&records), vec!["S", "P"]);
}

#[test]
fn test_epic_parent_is_not_fetched() {
    let mut s2 = story("S2");
    s2.parent = Some(RecordRef::new("E1", IssueType::named("Epic")));

    // E1 is deliberately absent: fetching it would fail with SourceNotFound.
    let source = MemorySource::new(vec![s2]);
    let records = GraphFetcher::new(&source).fetch_issue("S2").unwrap();

    assert_eq!(keys(&records), vec!["S2"]);
    assert_eq!(source.fetched(), vec!["S2"]);
}

#[test]
fn test_link_cycle_terminates() {
    let mut a = story("A");
    a.links.push(outward("relates to", "B"));
    let mut b = story("B");
    b.links.push(inward("relates to", "A"));

    let source = MemorySource::new(vec![a, b]);
    let records = GraphFetcher::new(&source).fetch_issue("A").unwrap();

    assert_eq!(keys(&records), vec!["A", "B"]);
    assert_eq!(source.fetched(), vec!["A", "B"]);
}

#[test]
fn test_self_link_fetched_once() {
    let mut a = story("A");
    a.links.push(outward("relates to", "A"));
    let source = MemorySource::new(vec![a]);

    let records = GraphFetcher::new(&source).fetch_issue("A").unwrap();
    assert_eq!(keys(&records), vec!["A"]);
    assert_eq!(source.fetched().len(), 1);
}

#[test]
fn test_depth_first_order() {
    let mut a = story("A");
    a.subtasks = vec!["B".to_string(), "D".to_string()];
    let mut b = subtask("B", "A");
    b.links.push(outward("relates to", "C"));

    let source = MemorySource::new(vec![a, b, story("C"), subtask("D", "A")]);
    let records = GraphFetcher::new(&source).fetch_issue("A").unwrap();
    assert_eq!(keys(&records), vec!["A", "B", "C", "D"]);
}

#[test]
fn test_shared_neighbour_fetched_once_across_seeds() {
    let mut a = story("A");
    a.links.push(outward("relates to", "C"));
    let mut b = story("B");
    b.links.push(outward("relates to", "C"));

    let source = MemorySource::new(vec![a, b, story("C")]);
    let records = GraphFetcher::new(&source).fetch_from(["A", "B"]).unwrap();

    assert_eq!(keys(&records), vec!["A", "C", "B"]);
    assert_eq!(source.fetched(), vec!["A", "C", "B"]);
}

#[test]
fn test_blank_seeds_rejected() {
    let source = MemorySource::default();
    let result = GraphFetcher::new(&source).fetch_from(["", "  "]);
    assert!(matches!(result, Err(Error::EmptyResultSet(_))));
    assert!(source.fetched().is_empty());
}

#[test]
fn test_failure_aborts_traversal() {
    let mut a = story("A");
    a.subtasks = vec!["B".to_string(), "C".to_string()];

    let source = MemorySource::new(vec![a, subtask("B", "A"), subtask("C", "A")])
        .with_failure("B", "connection reset");
    let result = GraphFetcher::new(&source).fetch_issue("A");

    match result {
        Err(Error::SourceUnavailable { key, message }) => {
            assert_eq!(key, "B");
            assert_eq!(message, "connection reset");
        }
        other => panic!("expected SourceUnavailable, got {:?}", other),
    }
    assert_eq!(source.fetched(), vec!["A", "B"], "C must not be fetched after the failure");
}

#[test]
fn test_missing_linked_record_is_an_error() {
    let mut a = story("A");
    a.links.push(outward("depends on", "GONE-1"));
    let source = MemorySource::new(vec![a]);

    let err = GraphFetcher::new(&source).fetch_issue("A").unwrap_err();
    assert!(matches!(err, Error::SourceNotFound(ref key) if key == "GONE-1"));
    assert!(err.is_source_error());
}

#[test]
fn test_invalid_record_fails_validation() {
    let source = MemorySource::new(vec![RawRecord::new("A", "", IssueType::named("Story"))]);
    let err = GraphFetcher::new(&source).fetch_issue("A").unwrap_err();
    assert!(matches!(err, Error::ValidationFailure { ref key, .. } if key == "A"));
}

#[test]
fn test_zero_match_query_is_distinct_error() {
    let source = MemorySource::new(vec![story("A")]).with_query("project = X", &[], 0);
    let result = GraphFetcher::new(&source).fetch_by_query("project = X");
    assert!(matches!(result, Err(Error::EmptyResultSet(_))));
}

#[test]
fn test_label_search_seeds_traversal() {
    let mut a = story("A");
    a.subtasks = vec!["A1".to_string()];
    let source = MemorySource::new(vec![a, subtask("A1", "A"), story("B")])
        .with_query(r#"labels = "sprint-23""#, &["A", "B"], 2);

    let outcome = GraphFetcher::new(&source).fetch_by_label("sprint-23").unwrap();
    assert_eq!(outcome.seeds, vec!["A", "B"]);
    assert_eq!(keys(&outcome.records), vec!["A", "A1", "B"]);
    assert!(outcome.advisories.is_empty());
}

#[test]
fn test_truncated_search_warns_by_default() {
    let source = MemorySource::new(vec![story("A"), story("B")]).with_query("q", &["A", "B"], 5);

    let outcome = GraphFetcher::new(&source).fetch_by_query("q").unwrap();
    assert_eq!(keys(&outcome.records), vec!["A", "B"]);
    assert_eq!(
        outcome.advisories,
        vec![FetchAdvisory::Truncated {
            query: "q".to_string(),
            returned: 2,
            total: 5,
        }]
    );
    assert_eq!(
        outcome.advisories[0].to_string(),
        "retrieved 2 of 5 total issues (pagination limit)"
    );
}

#[test]
fn test_truncated_search_errors_when_configured() {
    let source = MemorySource::new(vec![story("A")]).with_query("q", &["A"], 3);

    let result = GraphFetcher::new(&source)
        .with_truncation_policy(TruncationPolicy::Error)
        .fetch_by_query("q");

    assert!(matches!(
        result,
        Err(Error::TruncatedSearch { returned: 1, total: 3, .. })
    ));
    assert!(source.fetched().is_empty(), "nothing is fetched after a fatal truncation");
}
