// Rust guideline compliant 2026-02-06

//! Serde types for Jira REST v2 payloads and export files.
//!
//! Every field has a default so that a payload missing a required value is
//! rejected by record validation with a precise reason instead of a generic
//! parse error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp layout used by Jira, e.g. `2024-01-15T10:30:00.000+0000`.
pub const JIRA_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Parses a Jira timestamp. Empty strings are treated as absent.
///
/// # Errors
///
/// Returns the chrono parse error if the value matches neither the Jira
/// layout nor RFC 3339.
pub fn parse_jira_time(value: &str) -> Result<Option<DateTime<Utc>>, chrono::ParseError> {
    if value.is_empty() {
        return Ok(None);
    }

    DateTime::parse_from_str(value, JIRA_TIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|t| Some(t.with_timezone(&Utc)))
}

fn jira_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(value) => parse_jira_time(&value).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// An export file: `{"issues": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportFile {
    /// Exported issues.
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
}

/// A full issue payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JiraIssue {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default, rename = "self")]
    pub self_url: String,
    #[serde(default)]
    pub fields: Fields,
}

/// Fields of a full issue payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fields {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "issuetype")]
    pub issue_type: IssueType,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default)]
    pub reporter: Option<User>,
    #[serde(default, deserialize_with = "jira_time")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "jira_time")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, rename = "issuelinks")]
    pub issue_links: Vec<IssueLink>,
    #[serde(default)]
    pub parent: Option<LinkedIssue>,
    #[serde(default)]
    pub epic: Option<Epic>,
    #[serde(default)]
    pub subtasks: Vec<LinkedIssue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueType {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subtask: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "statusCategory")]
    pub status_category: StatusCategory,
}

/// Closed-vocabulary status category (`new`, `indeterminate`, `done`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusCategory {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Priority {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email_address: String,
}

/// A link between two issues. One side is the issue holding the link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLink {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub link_type: IssueLinkType,
    #[serde(default)]
    pub inward_issue: Option<LinkedIssue>,
    #[serde(default)]
    pub outward_issue: Option<LinkedIssue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueLinkType {
    #[serde(default)]
    pub name: String,
    /// e.g. "is blocked by"
    #[serde(default)]
    pub inward: String,
    /// e.g. "blocks"
    #[serde(default)]
    pub outward: String,
}

/// Abbreviated issue used for links, parents and subtasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkedIssue {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default, rename = "self")]
    pub self_url: String,
    #[serde(default)]
    pub fields: LinkedFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkedFields {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, rename = "issuetype")]
    pub issue_type: IssueType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Epic {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default, rename = "self")]
    pub self_url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub done: bool,
}

/// Response of `/rest/api/2/search`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub start_at: usize,
    #[serde(default)]
    pub max_results: usize,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub issues: Vec<SearchHit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHit {
    pub key: String,
}
