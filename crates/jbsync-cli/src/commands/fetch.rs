// Rust guideline compliant 2026-02-06

//! Implementation of the `fetch`, `fetch-by-label` and `fetch-by-query` commands.
//!
//! Each command walks the Jira issue graph from its seeds, converts the
//! records and writes them under `.beads/`.

use crate::Context;
use anyhow::{Context as _, Result};
use jbsync_core::ImportReport;
use jbsync_jira::{base_url_from_issue_url, is_issue_key, parse_issue_key_from_url};

/// Splits a command argument into an issue key and, for URLs, the base URL
/// of the Jira instance it points at.
///
/// # Errors
///
/// Returns an error if the argument is neither an issue URL nor an issue key.
pub fn resolve_target(target: &str) -> Result<(String, Option<String>)> {
    let target = target.trim();

    if target.starts_with("http://") || target.starts_with("https://") {
        let key = parse_issue_key_from_url(target)?;
        let base_url = base_url_from_issue_url(target)?;
        tracing::info!(key = %key, base_url = %base_url, "Parsed issue URL");
        return Ok((key, Some(base_url)));
    }

    if is_issue_key(target) {
        return Ok((target.to_string(), None));
    }

    anyhow::bail!("'{}' is neither an issue key nor an issue URL", target)
}

/// Fetches one issue and everything reachable from it.
///
/// # Errors
///
/// Returns an error if:
/// - The argument names no issue
/// - Jira credentials are missing
/// - Any fetch fails
/// - Conversion or rendering fails
pub fn fetch(ctx: &Context, target: &str) -> Result<ImportReport> {
    let (key, base_url) = resolve_target(target)?;
    let client = ctx.client(base_url.as_deref())?;

    let records = ctx
        .fetcher(&client)
        .fetch_issue(&key)
        .with_context(|| format!("Failed to fetch {} and its dependencies", key))?;

    ctx.import_records(&records)
}

/// Fetches every issue carrying `label` and everything reachable from them.
///
/// # Errors
///
/// Returns an error if the search matches nothing, a fetch fails, or the
/// result cannot be converted.
pub fn fetch_by_label(ctx: &Context, label: &str) -> Result<ImportReport> {
    let client = ctx.client(None)?;

    let outcome = ctx
        .fetcher(&client)
        .fetch_by_label(label)
        .with_context(|| format!("Failed to fetch issues with label {}", label))?;

    ctx.import_outcome(&outcome)
}

/// Runs a JQL query and fetches everything reachable from its results.
///
/// # Errors
///
/// Returns an error if the query matches nothing, a fetch fails, or the
/// result cannot be converted.
pub fn fetch_by_query(ctx: &Context, jql: &str) -> Result<ImportReport> {
    let client = ctx.client(None)?;

    let outcome = ctx
        .fetcher(&client)
        .fetch_by_query(jql)
        .with_context(|| format!("Failed to fetch issues for query: {}", jql))?;

    ctx.import_outcome(&outcome)
}
