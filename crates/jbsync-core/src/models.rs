// Rust guideline compliant 2026-02-06

//! Target data models: flat, dependency-linked beads issues and epics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Status of a target issue or epic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not started.
    Open,
    /// Currently being worked on.
    InProgress,
    /// Cannot progress.
    Blocked,
    /// Complete.
    Closed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Blocked => "blocked",
            Status::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Priority of a target issue (p0 = most urgent, p4 = least).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Critical.
    P0,
    /// High.
    P1,
    /// Medium.
    P2,
    /// Low.
    P3,
    /// Very low.
    P4,
}

impl Priority {
    /// Numeric rank, 0 for p0.
    pub fn rank(self) -> u8 {
        match self {
            Priority::P0 => 0,
            Priority::P1 => 1,
            Priority::P2 => 2,
            Priority::P3 => 3,
            Priority::P4 => 4,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::P2
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.rank())
    }
}

/// Traceability metadata linking a target entity back to its source record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Source key, e.g. `PROJ-123`.
    #[serde(rename = "jiraKey", default, skip_serializing_if = "String::is_empty")]
    pub source_key: String,
    /// Source internal id.
    #[serde(rename = "jiraId", default, skip_serializing_if = "String::is_empty")]
    pub source_id: String,
    /// Source issue type name.
    #[serde(
        rename = "jiraIssueType",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub source_type: String,
    /// Additional string metadata such as repository annotations.
    #[serde(flatten)]
    pub custom: BTreeMap<String, String>,
}

/// Metadata key holding comma-separated repository annotations.
pub const REPOSITORIES_KEY: &str = "repositories";

impl Metadata {
    /// Returns the repositories recorded on this entity.
    pub fn repositories(&self) -> Vec<&str> {
        self.custom
            .get(REPOSITORIES_KEY)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Records a repository annotation.
    ///
    /// # Returns
    ///
    /// False if the repository was already present, true otherwise.
    pub fn add_repository(&mut self, repository: &str) -> bool {
        if self.repositories().contains(&repository) {
            return false;
        }
        let value = match self.custom.get(REPOSITORIES_KEY) {
            Some(existing) if !existing.is_empty() => format!("{},{}", existing, repository),
            _ => repository.to_string(),
        };
        self.custom.insert(REPOSITORIES_KEY.to_string(), value);
        true
    }
}

/// A flat target issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Identifier derived from the source key.
    pub id: String,
    /// One-line summary.
    pub title: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Current status.
    pub status: Status,
    /// Priority.
    #[serde(default)]
    pub priority: Priority,
    /// Id of the epic this issue belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
    /// Assignee e-mail or display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Ids this issue depends on, in insertion order, without duplicates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    /// Traceability metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Issue {
    /// Creates an open, p2 issue with the given id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status: Status::Open,
            priority: Priority::default(),
            epic: None,
            assignee: None,
            labels: Vec::new(),
            depends_on: Vec::new(),
            created: None,
            updated: None,
            metadata: Metadata::default(),
        }
    }

    /// Adds a dependency unless it is already present.
    ///
    /// # Returns
    ///
    /// True if the dependency was added.
    pub fn add_dependency(&mut self, id: &str) -> bool {
        if self.depends_on.iter().any(|dep| dep == id) {
            return false;
        }
        self.depends_on.push(id.to_string());
        true
    }

    /// Validates the issue before it is persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the id or title is empty, or a dependency repeats.
    pub fn validate(&self) -> crate::Result<()> {
        validate_common(&self.id, &self.title, &self.metadata)?;
        for (idx, dep) in self.depends_on.iter().enumerate() {
            if self.depends_on[..idx].contains(dep) {
                return Err(crate::Error::ValidationFailure {
                    key: self.metadata.source_key.clone(),
                    reason: format!("duplicate dependency {}", dep),
                });
            }
        }
        Ok(())
    }
}

/// A target epic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epic {
    /// Identifier derived from the source key.
    pub id: String,
    /// Epic name (source summary).
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Current status.
    pub status: Status,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    /// Traceability metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Epic {
    /// Validates the epic before it is persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the id or name is empty.
    pub fn validate(&self) -> crate::Result<()> {
        validate_common(&self.id, &self.name, &self.metadata)
    }
}

fn validate_common(id: &str, title: &str, metadata: &Metadata) -> crate::Result<()> {
    let key = if metadata.source_key.is_empty() {
        id.to_string()
    } else {
        metadata.source_key.clone()
    };

    if id.trim().is_empty() {
        return Err(crate::Error::ValidationFailure {
            key,
            reason: "empty id".to_string(),
        });
    }

    if !crate::ids::is_file_safe(id) {
        return Err(crate::Error::ValidationFailure {
            key,
            reason: format!("id {} contains a path separator or '..'", id),
        });
    }

    if title.trim().is_empty() {
        return Err(crate::Error::ValidationFailure {
            key,
            reason: "empty title".to_string(),
        });
    }

    Ok(())
}

/// A target entity handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    /// A flat issue.
    Issue(Issue),
    /// An epic.
    Epic(Epic),
}

impl Entity {
    /// Id of the wrapped entity.
    pub fn id(&self) -> &str {
        match self {
            Entity::Issue(issue) => &issue.id,
            Entity::Epic(epic) => &epic.id,
        }
    }

    /// Validates the wrapped entity.
    ///
    /// # Errors
    ///
    /// See [`Issue::validate`] and [`Epic::validate`].
    pub fn validate(&self) -> crate::Result<()> {
        match self {
            Entity::Issue(issue) => issue.validate(),
            Entity::Epic(epic) => epic.validate(),
        }
    }
}

/// Result of one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Export {
    /// Converted issues, in input order.
    pub issues: Vec<Issue>,
    /// Converted epics, in input order.
    pub epics: Vec<Epic>,
}

impl Export {
    /// Looks up an issue by id.
    pub fn issue(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    /// Looks up an epic by id.
    pub fn epic(&self, id: &str) -> Option<&Epic> {
        self.epics.iter().find(|epic| epic.id == id)
    }

    /// All entities, epics first.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.epics
            .iter()
            .cloned()
            .map(Entity::Epic)
            .chain(self.issues.iter().cloned().map(Entity::Issue))
    }
}
