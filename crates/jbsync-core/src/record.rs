// Rust guideline compliant 2026-02-06

//! Raw records as returned by the issue source.
//!
//! These mirror the source tracker's hierarchical schema closely enough for
//! traversal and conversion, and nothing more. They are produced once per
//! fetch and only ever read afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue type name that marks a record as an epic.
pub const EPIC_TYPE: &str = "Epic";

/// Issue type of a record or of a referenced record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueType {
    /// Display name such as "Story", "Sub-task" or "Epic".
    pub name: String,
    /// Whether the source treats this type as a subtask.
    #[serde(default)]
    pub subtask: bool,
}

impl IssueType {
    /// Creates a non-subtask issue type.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subtask: false,
        }
    }

    /// Creates a subtask issue type.
    pub fn subtask(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subtask: true,
        }
    }

    /// Returns true if this is the epic type.
    pub fn is_epic(&self) -> bool {
        self.name == EPIC_TYPE
    }
}

/// Status of a raw record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusInfo {
    /// Tracker-configurable display name.
    pub name: String,
    /// Closed-vocabulary category key (`new`, `indeterminate`, `done`).
    #[serde(default)]
    pub category_key: String,
}

/// Assignee of a raw record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account identifier.
    #[serde(default)]
    pub account_id: String,
    /// Human readable name.
    #[serde(default)]
    pub display_name: String,
    /// E-mail address, often hidden by the tracker.
    #[serde(default)]
    pub email_address: String,
}

/// A reference to another record: its key and type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    /// Key of the referenced record.
    pub key: String,
    /// Issue type of the referenced record.
    #[serde(default)]
    pub issue_type: IssueType,
}

impl RecordRef {
    /// Creates a reference to `key` of the given type.
    pub fn new(key: impl Into<String>, issue_type: IssueType) -> Self {
        Self {
            key: key.into(),
            issue_type,
        }
    }
}

/// Relation phrases of a link type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkType {
    /// Link type name, e.g. "Blocks".
    pub name: String,
    /// Phrase read from the inward side, e.g. "is blocked by".
    pub inward: String,
    /// Phrase read from the outward side, e.g. "blocks".
    pub outward: String,
}

/// A typed link to another record.
///
/// Exactly one of `inward` or `outward` is normally set, depending on which
/// side of the link this record sits on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Relation phrases.
    pub link_type: LinkType,
    /// The record on the inward side.
    #[serde(default)]
    pub inward: Option<RecordRef>,
    /// The record on the outward side.
    #[serde(default)]
    pub outward: Option<RecordRef>,
}

impl Link {
    /// Keys referenced by this link, inward first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inward
            .iter()
            .chain(self.outward.iter())
            .map(|r| r.key.as_str())
    }
}

/// Epic reference carried by some trackers next to the parent field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpicRef {
    /// Key of the epic.
    pub key: String,
    /// Epic name.
    #[serde(default)]
    pub name: String,
    /// Whether the epic is done.
    #[serde(default)]
    pub done: bool,
}

/// A hierarchical work item as returned by the issue source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Human readable key, e.g. `PROJ-123`.
    pub key: String,
    /// Source internal identifier.
    #[serde(default)]
    pub id: String,
    /// One-line summary.
    pub summary: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Issue type.
    pub issue_type: IssueType,
    /// Status.
    #[serde(default)]
    pub status: StatusInfo,
    /// Priority display name.
    #[serde(default)]
    pub priority: String,
    /// Assignee, if any.
    #[serde(default)]
    pub assignee: Option<User>,
    /// Labels.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Creation time.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    /// Typed links to other records.
    #[serde(default)]
    pub links: Vec<Link>,
    /// Parent reference.
    #[serde(default)]
    pub parent: Option<RecordRef>,
    /// Epic reference.
    #[serde(default)]
    pub epic: Option<EpicRef>,
    /// Subtask keys.
    #[serde(default)]
    pub subtasks: Vec<String>,
}

impl RawRecord {
    /// Creates a record with the given key, summary and type and empty
    /// everything else.
    pub fn new(key: impl Into<String>, summary: impl Into<String>, issue_type: IssueType) -> Self {
        Self {
            key: key.into(),
            id: String::new(),
            summary: summary.into(),
            description: String::new(),
            issue_type,
            status: StatusInfo::default(),
            priority: String::new(),
            assignee: None,
            labels: Vec::new(),
            created: None,
            updated: None,
            links: Vec::new(),
            parent: None,
            epic: None,
            subtasks: Vec::new(),
        }
    }

    /// Returns true if this record is an epic.
    pub fn is_epic(&self) -> bool {
        self.issue_type.is_epic()
    }

    /// Returns the parent reference when the parent is an epic.
    pub fn epic_parent(&self) -> Option<&RecordRef> {
        self.parent.as_ref().filter(|p| p.issue_type.is_epic())
    }

    /// Returns the parent reference when the parent is not an epic.
    pub fn structural_parent(&self) -> Option<&RecordRef> {
        self.parent.as_ref().filter(|p| !p.issue_type.is_epic())
    }

    /// Checks the fields every record must carry.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` if the key, summary or issue type is empty,
    /// or if the key could escape the output directory once used as a file
    /// name. `position` is used in place of the key when the key itself is
    /// missing.
    pub fn validate(&self, position: usize) -> crate::Result<()> {
        if self.key.trim().is_empty() {
            return Err(crate::Error::ValidationFailure {
                key: format!("record #{}", position),
                reason: "missing key".to_string(),
            });
        }

        if !crate::ids::is_file_safe(&self.key) {
            return Err(crate::Error::ValidationFailure {
                key: self.key.clone(),
                reason: "key contains a path separator or '..'".to_string(),
            });
        }

        if self.summary.trim().is_empty() {
            return Err(crate::Error::ValidationFailure {
                key: self.key.clone(),
                reason: "missing summary".to_string(),
            });
        }

        if self.issue_type.name.trim().is_empty() {
            return Err(crate::Error::ValidationFailure {
                key: self.key.clone(),
                reason: "missing issue type".to_string(),
            });
        }

        Ok(())
    }
}
