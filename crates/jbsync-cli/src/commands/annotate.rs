// Rust guideline compliant 2026-02-06

//! Implementation of the `annotate` command.

use crate::Context;
use anyhow::{Context as _, Result};
use jbsync_core::to_id;

/// Records `repository` on a rendered issue.
///
/// Accepts either the beads id or the Jira key of the issue.
///
/// # Returns
///
/// The beads id that was annotated.
///
/// # Errors
///
/// Returns an error if the repository is blank, the issue has not been
/// rendered, or the repository is already recorded.
pub fn annotate(ctx: &Context, issue: &str, repository: &str) -> Result<String> {
    let repository = repository.trim();
    if repository.is_empty() {
        anyhow::bail!("Repository cannot be empty");
    }

    let id = to_id(issue.trim());
    ctx.renderer()
        .annotate_repository(&id, repository)
        .with_context(|| format!("Failed to annotate issue {}", id))?;

    Ok(id)
}
