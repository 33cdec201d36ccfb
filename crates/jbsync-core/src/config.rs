// Rust guideline compliant 2026-02-06

//! Configuration management for jira-beads-sync.

use crate::convert::DependencyRules;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Directory name used under the user's configuration directory.
const APP_DIR: &str = "jira-beads-sync";

/// Output format for rendered target entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One YAML file per issue and per epic.
    #[default]
    Yaml,
    /// One JSONL file for issues and one for epics.
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "jsonl" => Ok(OutputFormat::Jsonl),
            other => Err(Error::InvalidConfig(format!(
                "output format must be yaml or jsonl, got {}",
                other
            ))),
        }
    }
}

/// What to do when a search matches more keys than were returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TruncationPolicy {
    /// Continue with the returned keys and report an advisory.
    #[default]
    Warn,
    /// Abort the fetch with `TruncatedSearch`.
    Error,
}

impl std::str::FromStr for TruncationPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "warn" => Ok(TruncationPolicy::Warn),
            "error" => Ok(TruncationPolicy::Error),
            other => Err(Error::InvalidConfig(format!(
                "truncation policy must be warn or error, got {}",
                other
            ))),
        }
    }
}

/// Connection settings for the Jira issue source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Base URL of the Jira instance, e.g. `https://jira.example.com`.
    #[serde(default)]
    pub base_url: String,

    /// Username or account e-mail.
    #[serde(default)]
    pub username: String,

    /// API token.
    #[serde(default)]
    pub api_token: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on keys collected by one search across all pages.
    #[serde(default = "default_max_search_results")]
    pub max_search_results: usize,

    /// Keys requested per search page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Behaviour when a search is cut off by `max_search_results`.
    #[serde(default)]
    pub truncation_policy: TruncationPolicy,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            api_token: String::new(),
            timeout_secs: default_timeout_secs(),
            max_search_results: default_max_search_results(),
            page_size: default_page_size(),
            truncation_policy: TruncationPolicy::default(),
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format for rendered entities.
    #[serde(default)]
    pub format: OutputFormat,
}

/// Configuration for jira-beads-sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Jira connection settings.
    #[serde(default)]
    pub jira: JiraConfig,

    /// Rendering settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Link phrases that produce dependency edges.
    #[serde(default)]
    pub links: DependencyRules,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_search_results() -> usize {
    1000
}

fn default_page_size() -> usize {
    100
}

impl Config {
    /// Returns the default configuration file location.
    ///
    /// `$XDG_CONFIG_HOME/jira-beads-sync/config.toml` when set, otherwise the
    /// platform configuration directory, otherwise a dotfile in the working
    /// directory.
    pub fn default_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            return PathBuf::from(xdg).join(APP_DIR).join("config.toml");
        }

        match dirs::config_dir() {
            Some(dir) => dir.join(APP_DIR).join("config.toml"),
            None => PathBuf::from(".jira-beads-sync.toml"),
        }
    }

    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `path`, if it exists
    /// 3. Environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration file without applying the environment.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            Error::InvalidConfig(format!("invalid config file {}: {}", path.display(), e))
        })
    }

    /// Applies overrides looked up by variable name.
    ///
    /// Supported variables:
    /// - `JIRA_BASE_URL`, `JIRA_USERNAME`, `JIRA_API_TOKEN` (ignored when empty)
    /// - `JBSYNC_OUTPUT_FORMAT` - yaml or jsonl
    /// - `JBSYNC_TRUNCATION_POLICY` - warn or error
    /// - `JBSYNC_MAX_SEARCH_RESULTS` - positive number
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(val) = non_empty("JIRA_BASE_URL") {
            self.jira.base_url = val;
        }

        if let Some(val) = non_empty("JIRA_USERNAME") {
            self.jira.username = val;
        }

        if let Some(val) = non_empty("JIRA_API_TOKEN") {
            self.jira.api_token = val;
        }

        if let Some(val) = non_empty("JBSYNC_OUTPUT_FORMAT") {
            self.output.format = val.parse()?;
        }

        if let Some(val) = non_empty("JBSYNC_TRUNCATION_POLICY") {
            self.jira.truncation_policy = val.parse()?;
        }

        if let Some(val) = non_empty("JBSYNC_MAX_SEARCH_RESULTS") {
            self.jira.max_search_results = val.parse().map_err(|_| {
                Error::InvalidConfig(
                    "JBSYNC_MAX_SEARCH_RESULTS must be a positive number".to_string(),
                )
            })?;
        }

        Ok(())
    }

    /// Validates values that must hold for every command.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - timeout_secs is zero
    /// - page_size or max_search_results is zero
    /// - a link phrase is blank
    pub fn validate(&self) -> Result<()> {
        if self.jira.timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.jira.page_size == 0 {
            return Err(Error::InvalidConfig(
                "page_size must be greater than 0".to_string(),
            ));
        }

        if self.jira.max_search_results == 0 {
            return Err(Error::InvalidConfig(
                "max_search_results must be greater than 0".to_string(),
            ));
        }

        let phrases = self.links.blocked_by.iter().chain(&self.links.depends_on);
        if phrases.into_iter().any(|p| p.trim().is_empty()) {
            return Err(Error::InvalidConfig(
                "link phrases cannot be blank".to_string(),
            ));
        }

        Ok(())
    }

    /// Replaces values that fail [`Config::validate`] with their defaults.
    ///
    /// # Returns
    ///
    /// The names of the settings that were reset.
    pub fn reset_invalid(&mut self) -> Vec<&'static str> {
        let defaults = Self::default();
        let mut reset = Vec::new();

        if self.jira.timeout_secs == 0 {
            self.jira.timeout_secs = defaults.jira.timeout_secs;
            reset.push("timeout_secs");
        }

        if self.jira.page_size == 0 {
            self.jira.page_size = defaults.jira.page_size;
            reset.push("page_size");
        }

        if self.jira.max_search_results == 0 {
            self.jira.max_search_results = defaults.jira.max_search_results;
            reset.push("max_search_results");
        }

        let phrases = self.links.blocked_by.iter().chain(&self.links.depends_on);
        if phrases.into_iter().any(|p| p.trim().is_empty()) {
            self.links = defaults.links;
            reset.push("links");
        }

        reset
    }

    /// Validates the credentials needed to talk to Jira.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing value.
    pub fn validate_credentials(&self) -> Result<()> {
        if self.jira.base_url.trim().is_empty() {
            return Err(Error::InvalidConfig("jira base URL is required".to_string()));
        }

        if self.jira.username.trim().is_empty() {
            return Err(Error::InvalidConfig("jira username is required".to_string()));
        }

        if self.jira.api_token.trim().is_empty() {
            return Err(Error::InvalidConfig("jira API token is required".to_string()));
        }

        Ok(())
    }

    /// Saves the configuration as TOML, creating parent directories.
    ///
    /// On Unix the file is created readable by the owner only, and an
    /// existing file is narrowed to owner-only before the API token is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory or file cannot be created or written
    /// - Serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("failed to serialize config: {}", e)))?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path)?;

        // The mode above only applies to new files.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(content.as_bytes())?;
        file.sync_all()?;

        Ok(())
    }
}
