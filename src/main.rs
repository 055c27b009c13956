//! stokemeet - Framework-driven summaries for recorded meetings
//!
//! Entry point for the stokemeet CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stokemeet::cli::{Cli, Commands};
use stokemeet::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        stokemeet::cli::completions::print(shell);
        return Ok(());
    }

    // Load configuration only for runtime commands.
    let settings = Settings::load()?;
    init_logging(&settings, cli.verbose, matches!(cli.command, Commands::Tui))?;

    // Execute command
    match cli.command {
        Commands::Meetings { cursor, json } => {
            stokemeet::cli::commands::list_meetings(&settings, cursor, json).await?;
        }
        Commands::Show { recording } => {
            stokemeet::cli::commands::show_meeting(&settings, recording).await?;
        }
        Commands::Summarize {
            recording,
            summary_type,
        } => {
            stokemeet::cli::commands::summarize_meeting(&settings, recording, summary_type)
                .await?;
        }
        Commands::Ask {
            recording,
            question,
        } => {
            stokemeet::cli::commands::ask_question(&settings, recording, &question).await?;
        }
        Commands::Email {
            recording,
            summary_type,
        } => {
            stokemeet::cli::commands::draft_follow_up(&settings, recording, summary_type).await?;
        }
        Commands::Types => {
            stokemeet::cli::commands::list_types(&settings)?;
        }
        Commands::Profiles(profiles_cmd) => {
            stokemeet::cli::commands::profiles_command(&settings, profiles_cmd)?;
        }
        Commands::Cache(cache_cmd) => {
            stokemeet::cli::commands::cache_command(&settings, cache_cmd)?;
        }
        Commands::Auth(auth_cmd) => {
            stokemeet::cli::commands::auth_command(&settings, auth_cmd).await?;
        }
        Commands::Tui => {
            stokemeet::tui::run(&settings).await?;
        }
        Commands::Config(config_cmd) => {
            stokemeet::cli::commands::config_command(&settings, config_cmd)?;
        }
        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}

/// Logs go to stderr, or to a file while the TUI owns the terminal.
fn init_logging(settings: &Settings, verbose: bool, tui: bool) -> Result<()> {
    let default_level = if verbose {
        "debug"
    } else {
        settings.general.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if tui {
        settings.ensure_dirs()?;
        let path = settings.log_path();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
