// Rust guideline compliant 2026-02-06

//! Blocking Jira REST v2 client.
//!
//! Each call blocks until Jira answers or the configured timeout elapses.
//! Searches follow `startAt` pagination until every match has been
//! collected or the configured result ceiling is reached.

use crate::adapter::to_raw_record;
use crate::wire::{JiraIssue, SearchResponse};
use crate::{Error, Result};
use jbsync_core::config::JiraConfig;
use jbsync_core::{IssueSource, RawRecord, SearchPage};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: usize = 100;
const DEFAULT_MAX_RESULTS: usize = 1000;

/// The authenticated user, as returned by `/rest/api/2/myself`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub active: bool,
}

/// Jira REST client using basic authentication.
pub struct JiraClient {
    base_url: String,
    username: String,
    api_token: String,
    http: Client,
    page_size: usize,
    max_results: usize,
}

impl JiraClient {
    /// Creates a client with default timeout and search limits.
    ///
    /// # Errors
    ///
    /// Returns `Client` if the HTTP client cannot be built.
    pub fn new(base_url: &str, username: &str, api_token: &str) -> Result<Self> {
        Self::build(
            base_url,
            username,
            api_token,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Creates a client from the `[jira]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns `Client` if the HTTP client cannot be built.
    pub fn from_config(config: &JiraConfig) -> Result<Self> {
        let client = Self::build(
            &config.base_url,
            &config.username,
            &config.api_token,
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(client
            .with_page_size(config.page_size)
            .with_max_results(config.max_search_results))
    }

    fn build(base_url: &str, username: &str, api_token: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            api_token: api_token.to_string(),
            http,
            page_size: DEFAULT_PAGE_SIZE,
            max_results: DEFAULT_MAX_RESULTS,
        })
    }

    /// Sets how many keys are requested per search page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the maximum number of keys a search collects.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        key: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "GET");

        let mut request = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.api_token))
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().map_err(|source| Error::Transport {
            key: key.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Status {
                key: key.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().map_err(|source| Error::Transport {
            key: key.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| Error::Malformed {
            key: key.to_string(),
            source,
        })
    }

    /// Fetches one issue payload.
    ///
    /// # Errors
    ///
    /// Returns `Transport`, `Status` or `Malformed`.
    pub fn fetch_issue(&self, key: &str) -> Result<JiraIssue> {
        self.get_json(key, &format!("/rest/api/2/issue/{}", key), &[])
    }

    /// Runs a JQL search and collects matching keys across pages.
    ///
    /// # Errors
    ///
    /// Returns `Transport`, `Status` or `Malformed` for the first failing page.
    pub fn search(&self, jql: &str) -> Result<SearchPage> {
        let mut keys: Vec<String> = Vec::new();
        let mut total = 0;

        loop {
            let remaining = self.max_results - keys.len();
            let query = [
                ("jql", jql.to_string()),
                ("fields", "key".to_string()),
                ("startAt", keys.len().to_string()),
                ("maxResults", self.page_size.min(remaining).to_string()),
            ];
            let page: SearchResponse = self.get_json(jql, "/rest/api/2/search", &query)?;

            total = page.total;
            let returned = page.issues.len();
            keys.extend(page.issues.into_iter().map(|hit| hit.key));
            tracing::debug!(start_at = page.start_at, returned, total, "Search page");

            if returned == 0 || keys.len() >= total || keys.len() >= self.max_results {
                break;
            }
        }

        Ok(SearchPage { keys, total })
    }

    /// Returns the authenticated user. Used to check credentials.
    ///
    /// # Errors
    ///
    /// Returns `Status` with 401 when the credentials are rejected.
    pub fn myself(&self) -> Result<UserInfo> {
        self.get_json("myself", "/rest/api/2/myself", &[])
    }
}

impl IssueSource for JiraClient {
    fn fetch_by_key(&self, key: &str) -> jbsync_core::Result<RawRecord> {
        Ok(to_raw_record(self.fetch_issue(key)?))
    }

    fn search_by_query(&self, query: &str) -> jbsync_core::Result<SearchPage> {
        Ok(self.search(query)?)
    }
}
