// Rust guideline compliant 2026-02-06

//! Per-invocation state shared by the commands.

use anyhow::{Context as _, Result};
use jbsync_core::render::renderer_for;
use jbsync_core::{
    Config, Converter, FetchOutcome, GraphFetcher, ImportReport, OutputFormat, Pipeline,
    RawRecord, Renderer,
};
use jbsync_jira::JiraClient;
use std::path::{Path, PathBuf};

/// Resolved configuration, output location and format for one run.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration with env overrides applied.
    pub config: Config,
    /// Where the configuration was read from and is saved to.
    pub config_path: PathBuf,
    /// Directory that receives `.beads/`.
    pub output_dir: PathBuf,
    /// Output layout.
    pub format: OutputFormat,
}

impl Context {
    /// Loads configuration and resolves defaults for the output location.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the current
    /// directory cannot be determined.
    pub fn load(
        config_path: Option<PathBuf>,
        output_dir: Option<PathBuf>,
        format: Option<OutputFormat>,
    ) -> Result<Self> {
        let config_path = config_path.unwrap_or_else(Config::default_path);
        let config = Config::load(&config_path).with_context(|| {
            format!("Failed to load configuration from {}", config_path.display())
        })?;

        let output_dir = match output_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };

        let format = format.unwrap_or(config.output.format);
        Ok(Self {
            config,
            config_path,
            output_dir,
            format,
        })
    }

    /// Loads the configuration file alone, skipping env overrides and
    /// validation, so `configure` can repair a broken file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_unchecked(
        config_path: Option<PathBuf>,
        output_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let config_path = config_path.unwrap_or_else(Config::default_path);
        let config = Config::from_file(&config_path).with_context(|| {
            format!("Failed to read configuration from {}", config_path.display())
        })?;

        let output_dir = match output_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };

        Ok(Self::new(config, &config_path, &output_dir))
    }

    /// Returns true if no configuration file exists and the loaded
    /// configuration lacks Jira credentials.
    pub fn needs_setup(&self) -> bool {
        !self.config_path.exists() && self.config.validate_credentials().is_err()
    }

    /// Builds a context from already resolved parts.
    pub fn new(config: Config, config_path: &Path, output_dir: &Path) -> Self {
        let format = config.output.format;
        Self {
            config,
            config_path: config_path.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            format,
        }
    }

    /// Creates a Jira client, optionally against a different base URL than
    /// the configured one.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or the client cannot be built.
    pub fn client(&self, base_url: Option<&str>) -> Result<JiraClient> {
        let mut config = self.config.clone();
        if let Some(base_url) = base_url {
            config.jira.base_url = base_url.to_string();
        }

        config
            .validate_credentials()
            .context("Jira is not configured. Run 'jira-beads-sync configure' to set it up")?;

        JiraClient::from_config(&config.jira).context("Failed to create Jira client")
    }

    /// Creates a graph fetcher over `client` honouring the truncation policy.
    pub fn fetcher<'c>(&self, client: &'c JiraClient) -> GraphFetcher<&'c JiraClient> {
        GraphFetcher::new(client).with_truncation_policy(self.config.jira.truncation_policy)
    }

    /// Creates the renderer for the selected format.
    pub fn renderer(&self) -> Box<dyn Renderer> {
        renderer_for(self.format, &self.output_dir)
    }

    /// Creates a converter using the configured link phrases.
    pub fn converter(&self) -> Converter {
        Converter::with_rules(self.config.links.clone())
    }

    /// Converts and renders `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if conversion or rendering fails.
    pub fn import_records(&self, records: &[RawRecord]) -> Result<ImportReport> {
        let mut renderer = self.renderer();
        Pipeline::new(self.converter(), renderer.as_mut())
            .import_records(records)
            .context("Failed to convert issues")
    }

    /// Converts and renders the records of a search-seeded fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if conversion or rendering fails.
    pub fn import_outcome(&self, outcome: &FetchOutcome) -> Result<ImportReport> {
        let mut renderer = self.renderer();
        Pipeline::new(self.converter(), renderer.as_mut())
            .import_outcome(outcome)
            .context("Failed to convert issues")
    }
}
