// Rust guideline compliant 2026-02-06

//! Implementation of the `configure` command.
//!
//! Prompts for the Jira connection settings and stores them in the
//! configuration file. Pressing enter keeps the current value.

use crate::Context;
use anyhow::{Context as _, Result};
use jbsync_core::Config;
use jbsync_jira::base_url_from_issue_url;
use std::io::{BufRead, Write};
use std::path::PathBuf;

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    current: &str,
    secret: bool,
) -> Result<String> {
    if current.is_empty() {
        write!(output, "{}: ", label)?;
    } else if secret {
        write!(output, "{} [keep existing]: ", label)?;
    } else {
        write!(output, "{} [{}]: ", label, current)?;
    }
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .with_context(|| format!("Failed to read {}", label))?;

    let answer = line.trim();
    if answer.is_empty() {
        Ok(current.to_string())
    } else {
        Ok(answer.to_string())
    }
}

/// Asks for the base URL, username and API token, starting from `current`.
///
/// An issue URL entered as the base URL is reduced to its scheme and host.
///
/// # Errors
///
/// Returns an error if reading the answers fails or a required value is
/// still missing afterwards.
pub fn prompt_config<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    current: &Config,
) -> Result<Config> {
    let mut config = current.clone();

    let base_url = prompt(input, output, "Jira base URL", &current.jira.base_url, false)?;
    config.jira.base_url = match base_url_from_issue_url(&base_url) {
        Ok(base) => base,
        Err(_) => base_url.trim_end_matches('/').to_string(),
    };
    config.jira.username = prompt(input, output, "Username (email)", &current.jira.username, false)?;
    config.jira.api_token = prompt(input, output, "API token", &current.jira.api_token, true)?;

    config.validate_credentials()?;
    Ok(config)
}

/// Prompts on `input`/`output`, starting from the configuration file, and
/// saves the answers.
///
/// Environment overrides are not persisted. Settings that would fail
/// validation are reset to their defaults.
///
/// # Returns
///
/// The path the configuration was written to.
///
/// # Errors
///
/// Returns an error if the file is unreadable, the prompt fails or the file
/// cannot be written.
pub fn configure_with<R: BufRead, W: Write>(
    ctx: &Context,
    input: &mut R,
    output: &mut W,
) -> Result<PathBuf> {
    let mut current = Config::from_file(&ctx.config_path)
        .with_context(|| format!("Failed to read {}", ctx.config_path.display()))?;
    for setting in current.reset_invalid() {
        tracing::warn!(setting, "Invalid setting reset to its default");
    }

    let config = prompt_config(input, output, &current)?;
    config
        .save(&ctx.config_path)
        .with_context(|| format!("Failed to write {}", ctx.config_path.display()))?;
    tracing::info!(path = %ctx.config_path.display(), "Saved configuration");

    Ok(ctx.config_path.clone())
}

/// Runs [`configure_with`] on stdin, prompting on stderr.
///
/// # Errors
///
/// See [`configure_with`].
pub fn configure(ctx: &Context) -> Result<PathBuf> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stderr();
    configure_with(ctx, &mut input, &mut output)
}
