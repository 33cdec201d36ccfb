// Rust guideline compliant 2026-02-06

//! Command implementations for the jira-beads-sync CLI.

pub mod annotate;
pub mod configure;
pub mod convert;
pub mod fetch;
pub mod whoami;
