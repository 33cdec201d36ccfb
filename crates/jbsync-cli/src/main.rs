// Rust guideline compliant 2026-02-06

//! jira-beads-sync CLI
//!
//! Imports Jira issues, their linked issues and their epics into a beads
//! `.beads/` directory.

use clap::Parser;
use jbsync_cli::commands;
use jbsync_cli::logging::init_tracing;
use jbsync_cli::terminal::{print_error, print_success, print_warning, stdin_is_interactive};
use jbsync_cli::{create_formatter, Context, OutputFormatter};
use jbsync_core::{ImportReport, OutputFormat};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "jira-beads-sync",
    version,
    about = "Import Jira issues and their dependency graph into beads",
    long_about = "Fetches a Jira issue (or every issue matching a label or JQL query), follows its links and subtasks, and writes the result as beads issues and epics under .beads/.",
    after_help = "Examples:\n  jira-beads-sync configure\n  jira-beads-sync fetch https://company.atlassian.net/browse/PROJ-123\n  jira-beads-sync fetch-by-label sprint-23 --format jsonl\n  jira-beads-sync fetch-by-query 'project = PROJ AND status != Done'\n  jira-beads-sync convert export.json --output-dir ./repo\n  jira-beads-sync annotate PROJ-123 git@github.com:org/service.git\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Output layout (yaml or jsonl)
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    /// Custom config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory that receives .beads/ (defaults to the current directory)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Fetch an issue and everything it links to
    #[command(visible_alias = "quickstart")]
    Fetch {
        /// Issue URL or key (e.g. PROJ-123)
        target: String,
    },

    /// Fetch every issue with a label and everything they link to
    #[command(visible_alias = "label")]
    FetchByLabel {
        /// Jira label
        label: String,
    },

    /// Fetch every issue matching a JQL query and everything they link to
    FetchByQuery {
        /// JQL query
        jql: String,
    },

    /// Convert a Jira JSON export file
    Convert {
        /// Path to the export file
        file: PathBuf,
    },

    /// Record a repository on an imported issue
    Annotate {
        /// Beads id or Jira key of the issue
        id: String,

        /// Repository URL or path
        repository: String,
    },

    /// Set up the Jira connection
    Configure,

    /// Check the configured credentials
    Whoami,
}

fn print_report(ctx: &Context, formatter: &dyn OutputFormatter, json: bool, report: &ImportReport) {
    println!(
        "{}",
        formatter
            .format_report(report, &ctx.output_dir, ctx.format)
            .trim_end()
    );

    if !json {
        let warnings = report.warnings();
        if warnings.is_empty() {
            print_success("Import complete");
        } else {
            print_warning(&format!("Import complete with {} warning(s)", warnings.len()));
        }
    }
}

fn run(cli: Cli, formatter: &dyn OutputFormatter) -> anyhow::Result<()> {
    let command = match cli.command {
        Commands::Configure => {
            let ctx = Context::load_unchecked(cli.config, cli.output_dir)?;
            let path = commands::configure::configure(&ctx)?;
            if !cli.json {
                print_success(&format!("Configuration saved to {}", path.display()));
            }
            return Ok(());
        }
        command => command,
    };

    let mut ctx = Context::load(cli.config.clone(), cli.output_dir.clone(), cli.format)?;

    match command {
        Commands::Fetch { target } => {
            if ctx.needs_setup() && stdin_is_interactive() {
                print_warning("Jira is not configured yet, starting setup");
                commands::configure::configure(&ctx)?;
                ctx = Context::load(cli.config, cli.output_dir, cli.format)?;
            }
            let report = commands::fetch::fetch(&ctx, &target)?;
            print_report(&ctx, formatter, cli.json, &report);
        }
        Commands::FetchByLabel { label } => {
            let report = commands::fetch::fetch_by_label(&ctx, &label)?;
            print_report(&ctx, formatter, cli.json, &report);
        }
        Commands::FetchByQuery { jql } => {
            let report = commands::fetch::fetch_by_query(&ctx, &jql)?;
            print_report(&ctx, formatter, cli.json, &report);
        }
        Commands::Convert { file } => {
            let report = commands::convert::convert_file(&ctx, &file)?;
            print_report(&ctx, formatter, cli.json, &report);
        }
        Commands::Annotate { id, repository } => {
            let id = commands::annotate::annotate(&ctx, &id, &repository)?;
            println!("{}", formatter.format_annotation(&id, repository.trim()));
        }
        Commands::Whoami => {
            let (user, base_url) = commands::whoami::whoami(&ctx)?;
            println!("{}", formatter.format_user(&user, &base_url));
        }
        Commands::Configure => {}
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    let formatter = create_formatter(json);
    if let Err(err) = run(cli, formatter.as_ref()) {
        let message = format!("{:#}", err);
        if json {
            eprintln!("{}", formatter.format_error(&message));
        } else {
            print_error(&message);
        }
        std::process::exit(1);
    }
}
