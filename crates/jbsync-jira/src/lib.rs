// Rust guideline compliant 2026-02-06

//! Jira integration for jira-beads-sync.
//!
//! Provides the REST client that implements [`jbsync_core::IssueSource`],
//! the serde types for Jira's JSON payloads and the adapter that turns them
//! into [`jbsync_core::RawRecord`] values.

pub mod adapter;
pub mod client;
pub mod error;
pub mod url;
pub mod wire;

pub use adapter::{parse_export, parse_export_file, to_raw_record};
pub use client::{JiraClient, UserInfo};
pub use error::{Error, Result};
pub use url::{base_url_from_issue_url, is_issue_key, parse_issue_key_from_url};
