// Rust guideline compliant 2026-02-06

//! The issue source capability consumed by the graph fetcher.

use crate::{Error, RawRecord, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Keys returned, in source order.
    pub keys: Vec<String>,
    /// Total number of matches reported by the source.
    pub total: usize,
}

impl SearchPage {
    /// Returns true if the source matched more keys than it returned.
    pub fn is_truncated(&self) -> bool {
        self.keys.len() < self.total
    }
}

/// A source of raw records.
///
/// Calls block until the source answers. Implementations must map their
/// failures onto `SourceNotFound`, `SourceUnauthorized`,
/// `SourceUnavailable` and `MalformedSourceResponse`.
pub trait IssueSource {
    /// Fetches one record by key.
    ///
    /// # Errors
    ///
    /// Returns a source error if the record cannot be retrieved.
    fn fetch_by_key(&self, key: &str) -> Result<RawRecord>;

    /// Runs a query and returns the matching keys.
    ///
    /// # Errors
    ///
    /// Returns a source error if the search cannot be performed.
    fn search_by_query(&self, query: &str) -> Result<SearchPage>;
}

impl<S: IssueSource + ?Sized> IssueSource for &S {
    fn fetch_by_key(&self, key: &str) -> Result<RawRecord> {
        (**self).fetch_by_key(key)
    }

    fn search_by_query(&self, query: &str) -> Result<SearchPage> {
        (**self).search_by_query(query)
    }
}

/// In-memory issue source backed by a fixed set of records.
///
/// Queries are registered explicitly with [`MemorySource::with_query`].
/// Every fetch is recorded so callers can inspect traversal order.
#[derive(Debug, Default)]
pub struct MemorySource {
    records: HashMap<String, RawRecord>,
    queries: HashMap<String, SearchPage>,
    failing: HashMap<String, String>,
    fetched: RefCell<Vec<String>>,
}

impl MemorySource {
    /// Creates a source serving the given records.
    pub fn new(records: impl IntoIterator<Item = RawRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.key.clone(), r)).collect(),
            ..Self::default()
        }
    }

    /// Registers the result of a query.
    pub fn with_query(mut self, query: &str, keys: &[&str], total: usize) -> Self {
        self.queries.insert(
            query.to_string(),
            SearchPage {
                keys: keys.iter().map(|k| k.to_string()).collect(),
                total,
            },
        );
        self
    }

    /// Makes fetching `key` fail with a transport error.
    pub fn with_failure(mut self, key: &str, message: &str) -> Self {
        self.failing.insert(key.to_string(), message.to_string());
        self
    }

    /// Keys fetched so far, in call order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl IssueSource for MemorySource {
    fn fetch_by_key(&self, key: &str) -> Result<RawRecord> {
        self.fetched.borrow_mut().push(key.to_string());

        if let Some(message) = self.failing.get(key) {
            return Err(Error::SourceUnavailable {
                key: key.to_string(),
                message: message.clone(),
            });
        }

        self.records
            .get(key)
            .cloned()
            .ok_or_else(|| Error::SourceNotFound(key.to_string()))
    }

    fn search_by_query(&self, query: &str) -> Result<SearchPage> {
        Ok(self.queries.get(query).cloned().unwrap_or_default())
    }
}
