// Rust guideline compliant 2026-02-06

//! Output formatting module for the jira-beads-sync CLI.
//!
//! Commands produce one result value; the formatter turns it into either a
//! human summary or a JSON document for scripts.

use jbsync_core::{ImportReport, OutputFormat};
use jbsync_jira::UserInfo;
use serde_json::json;
use std::path::Path;

/// Output formatter trait.
pub trait OutputFormatter {
    /// Formats the result of an import run.
    fn format_report(&self, report: &ImportReport, output_dir: &Path, format: OutputFormat)
        -> String;

    /// Formats the authenticated user.
    fn format_user(&self, user: &UserInfo, base_url: &str) -> String;

    /// Formats the result of a repository annotation.
    fn format_annotation(&self, id: &str, repository: &str) -> String;

    /// Formats an error message.
    fn format_error(&self, error: &str) -> String;
}

fn layout(format: OutputFormat) -> (&'static str, &'static str) {
    match format {
        OutputFormat::Yaml => (".beads/issues/", ".beads/epics/"),
        OutputFormat::Jsonl => (".beads/issues.jsonl", ".beads/epics.jsonl"),
    }
}

/// JSON output formatter.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_report(
        &self,
        report: &ImportReport,
        output_dir: &Path,
        format: OutputFormat,
    ) -> String {
        let output = json!({
            "output_dir": output_dir.display().to_string(),
            "format": format,
            "fetched": report.fetched,
            "issues": report.written.issues,
            "epics": report.written.epics,
            "fetch_advisories": report.fetch_advisories,
            "graph_advisories": report.graph_advisories,
        });
        serde_json::to_string_pretty(&output)
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize report" }).to_string())
    }

    fn format_user(&self, user: &UserInfo, base_url: &str) -> String {
        let output = json!({ "base_url": base_url, "user": user });
        serde_json::to_string_pretty(&output)
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize user" }).to_string())
    }

    fn format_annotation(&self, id: &str, repository: &str) -> String {
        json!({ "id": id, "repository": repository }).to_string()
    }

    fn format_error(&self, error: &str) -> String {
        json!({ "error": error }).to_string()
    }
}

/// Plain text output formatter.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_report(
        &self,
        report: &ImportReport,
        output_dir: &Path,
        format: OutputFormat,
    ) -> String {
        let (issues_at, epics_at) = layout(format);
        let mut output = String::new();

        output.push_str(&format!("Fetched {} issue(s)\n", report.fetched));
        output.push_str(&format!(
            "  {} epic(s) written to {}/{}\n",
            report.written.epics,
            output_dir.display(),
            epics_at
        ));
        output.push_str(&format!(
            "  {} issue(s) written to {}/{}\n",
            report.written.issues,
            output_dir.display(),
            issues_at
        ));

        let warnings = report.warnings();
        if !warnings.is_empty() {
            output.push_str(&format!("{} warning(s):\n", warnings.len()));
            for warning in warnings {
                output.push_str(&format!("  - {}\n", warning));
            }
        }

        output
    }

    fn format_user(&self, user: &UserInfo, base_url: &str) -> String {
        let mut output = format!("Authenticated to {} as {}", base_url, user.display_name);
        if !user.email_address.is_empty() {
            output.push_str(&format!(" <{}>", user.email_address));
        }
        if !user.active {
            output.push_str(" (inactive)");
        }
        output
    }

    fn format_annotation(&self, id: &str, repository: &str) -> String {
        format!("Added repository '{}' to issue {}", repository, id)
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }
}

/// Creates the formatter for the `--json` flag.
pub fn create_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(PlainFormatter)
    }
}
