// Rust guideline compliant 2026-02-06

//! Schema converter: raw source records to beads issues and epics.
//!
//! A run has three passes over the batch:
//! 1. epics are converted and registered,
//! 2. every other record becomes an issue, resolving its epic through the
//!    registry and depending on its parent when it is a subtask,
//! 3. link phrases contribute further dependency edges, with link targets
//!    looked up in the registry.

use crate::ids::{to_id, Registry};
use crate::record::StatusInfo;
use crate::{Epic, Error, Export, Issue, Metadata, Priority, RawRecord, Result, Status};
use serde::{Deserialize, Serialize};

/// Link relation phrases that produce dependency edges.
///
/// Phrases are compared exactly. Anything else ("relates to",
/// "duplicates", ...) carries no dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRules {
    /// Inward phrases: this record depends on the inward record.
    #[serde(default = "default_blocked_by")]
    pub blocked_by: Vec<String>,
    /// Outward phrases: this record depends on the outward record.
    #[serde(default = "default_depends_on")]
    pub depends_on: Vec<String>,
}

fn default_blocked_by() -> Vec<String> {
    vec!["is blocked by".to_string()]
}

fn default_depends_on() -> Vec<String> {
    vec!["depends on".to_string()]
}

impl Default for DependencyRules {
    fn default() -> Self {
        Self {
            blocked_by: default_blocked_by(),
            depends_on: default_depends_on(),
        }
    }
}

impl DependencyRules {
    /// Keys `record` depends on according to its links, in link order.
    pub fn dependency_keys<'r>(&self, record: &'r RawRecord) -> Vec<&'r str> {
        let mut keys = Vec::new();
        for link in &record.links {
            if let Some(inward) = &link.inward {
                if self.blocked_by.iter().any(|p| *p == link.link_type.inward) {
                    keys.push(inward.key.as_str());
                }
            }
            if let Some(outward) = &link.outward {
                if self.depends_on.iter().any(|p| *p == link.link_type.outward) {
                    keys.push(outward.key.as_str());
                }
            }
        }
        keys
    }
}

/// Maps a source status to a target status.
///
/// The category key decides when it is one of `new`, `indeterminate` or
/// `done`; otherwise the status name is matched case-insensitively.
pub fn map_status(status: &StatusInfo) -> Status {
    match status.category_key.as_str() {
        "new" => Status::Open,
        "indeterminate" => Status::InProgress,
        "done" => Status::Closed,
        _ => {
            let name = status.name.to_lowercase();
            if name.contains("block") {
                Status::Blocked
            } else if name.contains("progress") || name.contains("doing") {
                Status::InProgress
            } else if name.contains("done") || name.contains("closed") {
                Status::Closed
            } else {
                Status::Open
            }
        }
    }
}

/// Maps a source priority name to a target priority. Unknown names map to p2.
pub fn map_priority(name: &str) -> Priority {
    let name = name.to_lowercase();
    // "lowest" must be checked before "low".
    if name.contains("critical") || name.contains("highest") {
        Priority::P0
    } else if name.contains("high") {
        Priority::P1
    } else if name.contains("medium") {
        Priority::P2
    } else if name.contains("lowest") {
        Priority::P4
    } else if name.contains("low") {
        Priority::P3
    } else {
        Priority::P2
    }
}

fn metadata_for(record: &RawRecord) -> Metadata {
    Metadata {
        source_key: record.key.clone(),
        source_id: record.id.clone(),
        source_type: record.issue_type.name.clone(),
        custom: Default::default(),
    }
}

/// Converts raw records into target entities.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    rules: DependencyRules,
}

impl Converter {
    /// Creates a converter with the default link phrases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a converter with custom link phrases.
    pub fn with_rules(rules: DependencyRules) -> Self {
        Self { rules }
    }

    /// Converts a batch of raw records.
    ///
    /// # Returns
    ///
    /// Issues and epics, each in input order.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `NilInput` if `records` is empty
    /// - `ValidationFailure` if a record lacks a key, summary or type, or a key repeats
    /// - `IdCollision` if two keys differ only by case
    pub fn convert(&self, records: &[RawRecord]) -> Result<Export> {
        if records.is_empty() {
            return Err(Error::NilInput);
        }

        let mut registry = Registry::build(records)?;
        let mut export = Export::default();

        for record in records.iter().filter(|r| r.is_epic()) {
            let epic = self.convert_epic(record);
            registry.register_epic(&record.key, epic.id.clone());
            export.epics.push(epic);
        }

        for record in records.iter().filter(|r| !r.is_epic()) {
            export.issues.push(self.convert_issue(record, &registry));
        }

        self.add_link_dependencies(records, &registry, &mut export);

        tracing::debug!(
            issues = export.issues.len(),
            epics = export.epics.len(),
            "Conversion complete"
        );
        Ok(export)
    }

    fn convert_epic(&self, record: &RawRecord) -> Epic {
        Epic {
            id: to_id(&record.key),
            name: record.summary.clone(),
            description: record.description.clone(),
            status: map_status(&record.status),
            created: record.created,
            updated: record.updated,
            metadata: metadata_for(record),
        }
    }

    fn convert_issue(&self, record: &RawRecord, registry: &Registry<'_>) -> Issue {
        let mut issue = Issue::new(to_id(&record.key), record.summary.clone());
        issue.description = record.description.clone();
        issue.status = map_status(&record.status);
        issue.priority = map_priority(&record.priority);
        issue.labels = record.labels.clone();
        issue.created = record.created;
        issue.updated = record.updated;
        issue.metadata = metadata_for(record);

        issue.assignee = record.assignee.as_ref().and_then(|user| {
            [&user.email_address, &user.display_name]
                .into_iter()
                .find(|v| !v.is_empty())
                .cloned()
        });

        if let Some(parent) = record.epic_parent() {
            match registry.epic_id(&parent.key) {
                Some(epic_id) => issue.epic = Some(epic_id.to_string()),
                None => {
                    tracing::debug!(key = %record.key, epic = %parent.key, "Epic not in batch")
                }
            }
        }

        if record.issue_type.subtask {
            if let Some(parent) = record.structural_parent() {
                issue.add_dependency(&to_id(&parent.key));
            }
        }

        issue
    }

    fn add_link_dependencies(
        &self,
        records: &[RawRecord],
        registry: &Registry<'_>,
        export: &mut Export,
    ) {
        let sources = records.iter().filter(|r| !r.is_epic());

        for (record, issue) in sources.zip(export.issues.iter_mut()) {
            for key in self.rules.dependency_keys(record) {
                match registry.record(key) {
                    Some(target) if !target.is_epic() => {
                        let dep_id = to_id(&target.key);
                        if dep_id != issue.id {
                            issue.add_dependency(&dep_id);
                        }
                    }
                    _ => {
                        tracing::debug!(
                            key = %record.key,
                            target = %key,
                            "Skipping link to record outside issue set"
                        );
                    }
                }
            }
        }
    }
}

/// Converts `records` with the default link phrases.
///
/// # Errors
///
/// See [`Converter::convert`].
pub fn convert(records: &[RawRecord]) -> Result<Export> {
    Converter::new().convert(records)
}
