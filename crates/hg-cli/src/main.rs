mod client;
mod commands;
mod config;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::analyze::AnalyzeArgs;
use commands::config::ConfigAction;
use hg_core::GateCatalog;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "hardgates",
    version,
    about = "Hard gate assessment CLI: score a GitHub repository against 15 production-readiness gates"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Assessment service base URL
    #[arg(long, global = true, env = "HARDGATES_API_URL")]
    api_url: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a repository and wait for its report
    Analyze(AnalyzeArgs),

    /// Fetch the current state of an assessment
    Status {
        /// Assessment ID returned by `analyze`
        id: String,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
        /// Only show rows containing this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },

    /// List assessments known to the service
    List {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an assessment from the service
    Delete {
        /// Assessment ID
        id: String,
    },

    /// Check the assessment service
    Health,

    /// List the hard gates every report is scored against
    Gates,

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "hardgates=debug,hg_client=debug,hg_core=debug"
    } else {
        "hardgates=warn,hg_client=warn,hg_core=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }
    init_tracing(cli.verbose);

    GateCatalog::canonical()
        .validate()
        .context("built-in gate catalog is inconsistent")?;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(cli.api_url, args),
        Commands::Status { id, json, filter } => commands::status::run(cli.api_url, id, json, filter),
        Commands::List { json } => commands::assessments::list(cli.api_url, json),
        Commands::Delete { id } => commands::assessments::delete(cli.api_url, id),
        Commands::Health => commands::health::run(cli.api_url),
        Commands::Gates => commands::gates::run(),
        Commands::Config { action } => commands::config::run(action),
    }
}
