//! fixver CLI - attach released tickets to a tracker fix version.

mod config;
mod git;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fixver_core::{NextRelease, PluginConfig, ReleaseContext};
use fixver_release::{
    bare_metadata, verify_conditions, verify_project, ReleaseEngine, ReleasePlan,
};
use fixver_tracker::JiraClient;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = ".fixver.json";

#[derive(Parser)]
#[command(name = "fixver")]
#[command(about = "Tag released tickets with a tracker fix version", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Tracker base URL
    #[arg(long, global = true)]
    host: Option<String>,

    /// Project key
    #[arg(long, global = true)]
    project: Option<String>,

    /// Ticket prefix (repeatable)
    #[arg(long = "prefix", global = true)]
    prefixes: Vec<String>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check configuration, credentials, and project access
    Verify,
    /// Link the tickets of a release to its fix version
    Success {
        /// Semantic version being released
        #[arg(long)]
        next_version: String,
        /// Git tag of the release
        #[arg(long)]
        tag: Option<String>,
        /// Previous release revision; commits up to it are excluded
        #[arg(long)]
        from: Option<String>,
        /// Last revision of the release
        #[arg(long, default_value = "HEAD")]
        to: String,
        /// Repository path
        #[arg(long, default_value = ".")]
        repo: PathBuf,
        /// Print the plan without contacting the tracker
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let explicit = cli.config.is_some();
    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = config::load(
        &config_path,
        explicit,
        config::Overrides {
            host: cli.host,
            project: cli.project,
            prefixes: cli.prefixes,
        },
    )?;
    let env: HashMap<String, String> = std::env::vars().collect();

    match cli.command {
        Commands::Verify => {
            let credentials = verify_conditions(&config, &env)?;
            let client = JiraClient::new(config.host(), credentials)?;
            let project_id = verify_project(&client, &config).await?;
            println!("Project {} OK (id {})", config.project, project_id);
        }
        Commands::Success {
            next_version,
            tag,
            from,
            to,
            repo,
            dry_run,
        } => {
            let commits = git::collect_commits(&repo, from.as_deref(), &to)?;
            let next_release = NextRelease {
                version: next_version,
                git_tag: tag,
            };
            let context = ReleaseContext::new(next_release, commits).with_env(env);

            if dry_run {
                config.validate()?;
                print_plan(&config, &context)?;
                return Ok(());
            }

            let credentials = verify_conditions(&config, &context.env)?;
            let client = JiraClient::new(config.host(), credentials)?;
            let engine = ReleaseEngine::new(Arc::new(client), config);
            let report = engine
                .run(&context)
                .await
                .context("Release automation failed")?;

            info!("Release {} ({})", report.version.name, report.version.id);
            println!("Version: {} (id {})", report.version.name, report.version.id);
            println!("Linked ({})", report.linked.len());
            for key in &report.linked {
                println!("  {}", key);
            }
            if !report.skipped.is_empty() {
                println!("Skipped ({})", report.skipped.len());
                for (key, status) in &report.skipped {
                    println!("  {} (status {})", key, status);
                }
            }
        }
    }

    Ok(())
}

fn print_plan(config: &PluginConfig, context: &ReleaseContext) -> Result<()> {
    let plan = ReleasePlan::build(config, context)?;

    println!("Version: {}", plan.version_name);
    println!("Commits: {}", context.commits.len());
    println!("Tickets ({})", plan.tickets.len());
    for key in &plan.tickets {
        println!("  {}", key);
    }
    println!();
    println!("{}", plan.description(&bare_metadata(config.host(), &plan.tickets)));
    Ok(())
}
