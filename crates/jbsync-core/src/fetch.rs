// Rust guideline compliant 2026-02-06

//! Graph fetcher: discovers every record reachable from a set of seed keys.
//!
//! The walk follows subtasks, both sides of every link, and the parent when
//! the parent is not an epic. Each key is fetched at most once, so cyclic
//! link graphs terminate. An explicit stack replaces recursion; neighbours
//! are pushed in reverse so records come out in depth-first pre-order.

use crate::config::TruncationPolicy;
use crate::{Error, IssueSource, RawRecord, Result};
use serde::Serialize;
use std::collections::HashSet;

/// Non-fatal condition observed during a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchAdvisory {
    /// A search matched more keys than it returned.
    Truncated {
        /// The search query.
        query: String,
        /// Keys actually returned.
        returned: usize,
        /// Total matches reported by the source.
        total: usize,
    },
}

impl std::fmt::Display for FetchAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchAdvisory::Truncated {
                returned, total, ..
            } => write!(
                f,
                "retrieved {} of {} total issues (pagination limit)",
                returned, total
            ),
        }
    }
}

/// Records gathered by a search-seeded fetch plus any advisories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Deduplicated records in visiting order.
    pub records: Vec<RawRecord>,
    /// Seed keys returned by the search.
    pub seeds: Vec<String>,
    /// Non-fatal conditions.
    pub advisories: Vec<FetchAdvisory>,
}

/// Builds the query selecting every record carrying `label`.
pub fn label_query(label: &str) -> String {
    format!("labels = \"{}\"", label.replace('"', "\\\""))
}

/// Keys to visit after `record`, in visiting order.
pub fn related_keys(record: &RawRecord) -> Vec<&str> {
    let mut keys: Vec<&str> = record.subtasks.iter().map(String::as_str).collect();
    keys.extend(record.links.iter().flat_map(|link| link.keys()));
    if let Some(parent) = record.structural_parent() {
        keys.push(&parent.key);
    }
    keys
}

/// Drives an [`IssueSource`] across the record graph.
pub struct GraphFetcher<S> {
    source: S,
    truncation_policy: TruncationPolicy,
}

impl<S: IssueSource> GraphFetcher<S> {
    /// Creates a fetcher over `source` that warns on truncated searches.
    pub fn new(source: S) -> Self {
        Self {
            source,
            truncation_policy: TruncationPolicy::default(),
        }
    }

    /// Sets the behaviour for truncated searches.
    pub fn with_truncation_policy(mut self, policy: TruncationPolicy) -> Self {
        self.truncation_policy = policy;
        self
    }

    /// Fetches one record and everything reachable from it.
    ///
    /// # Errors
    ///
    /// See [`GraphFetcher::fetch_from`].
    pub fn fetch_issue(&self, key: &str) -> Result<Vec<RawRecord>> {
        self.fetch_from([key])
    }

    /// Fetches every record reachable from `seeds`.
    ///
    /// # Returns
    ///
    /// The records in visiting order, each key exactly once.
    ///
    /// # Errors
    ///
    /// Returns `EmptyResultSet` when no seed is given, otherwise the first
    /// error raised by the source or by record validation. Nothing fetched
    /// before the failure is returned.
    pub fn fetch_from<I, K>(&self, seeds: I) -> Result<Vec<RawRecord>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let seeds: Vec<String> = seeds
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        if seeds.is_empty() {
            return Err(Error::EmptyResultSet("no seed keys given".to_string()));
        }

        let mut visited: HashSet<String> = HashSet::new();
        let mut records = Vec::new();

        for seed in seeds {
            let mut stack = vec![seed];

            while let Some(key) = stack.pop() {
                if !visited.insert(key.clone()) {
                    continue;
                }

                tracing::info!(key = %key, "Fetching");
                let record = self.source.fetch_by_key(&key)?;
                record.validate(records.len())?;

                // A moved issue answers under its new key.
                if record.key != key && !visited.insert(record.key.clone()) {
                    tracing::debug!(requested = %key, key = %record.key, "Already fetched under another key");
                    continue;
                }

                for next in related_keys(&record).into_iter().rev() {
                    if !visited.contains(next) {
                        stack.push(next.to_string());
                    }
                }

                records.push(record);
            }
        }

        tracing::debug!(count = records.len(), "Fetch complete");
        Ok(records)
    }

    /// Runs `query` and fetches everything reachable from its results.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `EmptyResultSet` if the query matches nothing
    /// - `TruncatedSearch` if results were cut off and the policy is `Error`
    /// - any error from [`GraphFetcher::fetch_from`]
    pub fn fetch_by_query(&self, query: &str) -> Result<FetchOutcome> {
        tracing::info!(query = %query, "Searching");
        let page = self.source.search_by_query(query)?;

        if page.keys.is_empty() {
            return Err(Error::EmptyResultSet(format!(
                "no issues match query: {}",
                query
            )));
        }

        let mut advisories = Vec::new();
        if page.is_truncated() {
            match self.truncation_policy {
                TruncationPolicy::Error => {
                    return Err(Error::TruncatedSearch {
                        query: query.to_string(),
                        returned: page.keys.len(),
                        total: page.total,
                    })
                }
                TruncationPolicy::Warn => {
                    let advisory = FetchAdvisory::Truncated {
                        query: query.to_string(),
                        returned: page.keys.len(),
                        total: page.total,
                    };
                    tracing::warn!(query = %query, "{}", advisory);
                    advisories.push(advisory);
                }
            }
        }

        tracing::info!(count = page.keys.len(), "Found seed issues");
        let records = self.fetch_from(&page.keys)?;

        Ok(FetchOutcome {
            records,
            seeds: page.keys,
            advisories,
        })
    }

    /// Fetches every record labelled `label` and everything reachable from them.
    ///
    /// # Errors
    ///
    /// See [`GraphFetcher::fetch_by_query`].
    pub fn fetch_by_label(&self, label: &str) -> Result<FetchOutcome> {
        self.fetch_by_query(&label_query(label))
    }
}
