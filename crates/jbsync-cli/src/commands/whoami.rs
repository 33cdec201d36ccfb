// Rust guideline compliant 2026-02-06

//! Implementation of the `whoami` command.

use crate::Context;
use anyhow::{Context as _, Result};
use jbsync_jira::UserInfo;

/// Checks the configured credentials against Jira.
///
/// # Returns
///
/// The authenticated user and the base URL that was queried.
///
/// # Errors
///
/// Returns an error if credentials are missing or rejected, or Jira is unreachable.
pub fn whoami(ctx: &Context) -> Result<(UserInfo, String)> {
    let client = ctx.client(None)?;
    let user = client
        .myself()
        .with_context(|| format!("Failed to authenticate with {}", client.base_url()))?;
    Ok((user, client.base_url().to_string()))
}
