//! Reel CLI - Command-driven video player
//!
//! Features:
//! - Interactive shell over the video catalog
//! - Playlist management and video flagging
//! - Title/tag search with result selection
//! - Non-interactive command scripts
//! - Text or JSON output

use anyhow::Context;
use clap::{Parser, Subcommand};
use reel_core::{PlayerConfig, PlayerSession};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::Shell;
use output::OutputFormat;

/// Reel CLI - Command-driven video player
#[derive(Parser)]
#[command(name = "reel")]
#[command(version)]
#[command(
    about = "Command-driven video player with playlists, search and flagging",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog file (`title | id | tags` per line), overrides the config
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Seed for PLAY_RANDOM, overrides the config
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,

    /// Run shell commands from a file, one per line
    Run {
        /// Script file
        script: PathBuf,
    },

    /// List the catalog and exit
    Videos,
}

fn load_config(cli: &Cli) -> anyhow::Result<PlayerConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => PlayerConfig::default(),
    };

    if let Some(catalog) = &cli.catalog {
        config.catalog_path = Some(catalog.clone());
    }
    if let Some(seed) = cli.seed {
        config.random_seed = Some(seed);
    }

    Ok(config)
}

fn read_config(path: &Path) -> anyhow::Result<PlayerConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = PlayerConfig::from_json(&json)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so they never mix with command output
    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    reel_core::init();

    let config = load_config(&cli)?;
    let session = PlayerSession::new(config).context("Failed to start player session")?;
    let format = OutputFormat::from(cli.format.as_str());
    let mut shell = Shell::new(session, format);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let interactive = format == OutputFormat::Text;
            if interactive {
                writeln!(out, "{}", output::WELCOME)?;
            }
            let input = BufReader::new(tokio::io::stdin());
            commands::run_shell(&mut shell, input, &mut out, interactive).await?;
        }
        Commands::Run { script } => {
            let file = tokio::fs::File::open(&script)
                .await
                .with_context(|| format!("Failed to open script {}", script.display()))?;
            commands::run_shell(&mut shell, BufReader::new(file), &mut out, false).await?;
        }
        Commands::Videos => {
            for line in shell.handle_line("SHOW_ALL_VIDEOS").lines {
                writeln!(out, "{line}")?;
            }
        }
    }

    tracing::debug!(session_id = %shell.session().id(), "Session finished");
    Ok(())
}
