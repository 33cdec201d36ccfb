// Rust guideline compliant 2026-02-06

//! Adapter from Jira wire types to core raw records.

use crate::wire::{self, ExportFile, JiraIssue};
use jbsync_core::{
    EpicRef, Error, IssueType, Link, LinkType, RawRecord, RecordRef, Result, StatusInfo, User,
};
use std::path::Path;

fn issue_type(t: &wire::IssueType) -> IssueType {
    IssueType {
        name: t.name.clone(),
        subtask: t.subtask,
    }
}

fn record_ref(linked: &wire::LinkedIssue) -> RecordRef {
    RecordRef::new(linked.key.clone(), issue_type(&linked.fields.issue_type))
}

fn user(u: wire::User) -> User {
    User {
        account_id: u.account_id,
        display_name: u.display_name,
        email_address: u.email_address,
    }
}

/// Converts a Jira issue payload into a raw record.
///
/// No validation happens here; see [`RawRecord::validate`].
pub fn to_raw_record(issue: JiraIssue) -> RawRecord {
    let fields = issue.fields;

    let links = fields
        .issue_links
        .iter()
        .map(|link| Link {
            link_type: LinkType {
                name: link.link_type.name.clone(),
                inward: link.link_type.inward.clone(),
                outward: link.link_type.outward.clone(),
            },
            inward: link.inward_issue.as_ref().map(record_ref),
            outward: link.outward_issue.as_ref().map(record_ref),
        })
        .collect();

    RawRecord {
        key: issue.key,
        id: issue.id,
        summary: fields.summary,
        description: fields.description.unwrap_or_default(),
        issue_type: issue_type(&fields.issue_type),
        status: StatusInfo {
            name: fields.status.name,
            category_key: fields.status.status_category.key,
        },
        priority: fields.priority.map(|p| p.name).unwrap_or_default(),
        assignee: fields.assignee.map(user),
        labels: fields.labels,
        created: fields.created,
        updated: fields.updated,
        links,
        parent: fields.parent.as_ref().map(record_ref),
        epic: fields.epic.map(|e| EpicRef {
            key: e.key,
            name: e.name,
            done: e.done,
        }),
        subtasks: fields.subtasks.into_iter().map(|s| s.key).collect(),
    }
}

/// Parses and validates an export file body.
///
/// # Errors
///
/// Returns:
/// - `MalformedSourceResponse` if the body is not an export file
/// - `EmptyResultSet` if the export holds no issues
/// - `ValidationFailure` for the first issue lacking a key, summary or type
pub fn parse_export(data: &[u8]) -> Result<Vec<RawRecord>> {
    let export: ExportFile =
        serde_json::from_slice(data).map_err(|e| Error::MalformedSourceResponse {
            key: "export".to_string(),
            message: e.to_string(),
        })?;

    if export.issues.is_empty() {
        return Err(Error::EmptyResultSet("export contains no issues".to_string()));
    }

    let records: Vec<RawRecord> = export.issues.into_iter().map(to_raw_record).collect();
    for (position, record) in records.iter().enumerate() {
        record.validate(position)?;
    }

    tracing::debug!(count = records.len(), "Parsed export");
    Ok(records)
}

/// Reads and parses an export file.
///
/// # Errors
///
/// Returns an IO error if the file cannot be read, otherwise see
/// [`parse_export`].
pub fn parse_export_file(path: &Path) -> Result<Vec<RawRecord>> {
    let data = std::fs::read(path)?;
    parse_export(&data).map_err(|e| match e {
        Error::MalformedSourceResponse { message, .. } => Error::MalformedSourceResponse {
            key: path.display().to_string(),
            message,
        },
        other => other,
    })
}
