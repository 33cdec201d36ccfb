// Rust guideline compliant 2026-02-06

//! Implementation of the `convert` command.
//!
//! Converts a Jira JSON export file without talking to Jira.

use crate::Context;
use anyhow::{Context as _, Result};
use jbsync_core::ImportReport;
use std::path::Path;

/// Converts the export file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if conversion
/// or rendering fails.
pub fn convert_file(ctx: &Context, path: &Path) -> Result<ImportReport> {
    if !path.exists() {
        anyhow::bail!("Export file not found: {}", path.display());
    }

    let records = jbsync_jira::parse_export_file(path)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!(count = records.len(), path = %path.display(), "Parsed export");

    ctx.import_records(&records)
}
