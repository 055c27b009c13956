//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// stokemeet - Framework-driven summaries for recorded meetings
#[derive(Parser, Debug)]
#[command(name = "stokemeet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List recorded meetings from the recording platform
    Meetings {
        /// Page cursor returned by a previous listing
        #[arg(short, long)]
        cursor: Option<String>,

        /// Print the raw page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a meeting's details, platform summary, and transcript
    Show {
        /// Recording ID
        recording: u64,
    },

    /// Show or generate a summary for a meeting
    Summarize {
        /// Recording ID
        recording: u64,

        /// Summary type or custom profile id (defaults to the default profile)
        #[arg(short = 't', long = "type")]
        summary_type: Option<String>,
    },

    /// Ask a question about a meeting's transcript
    Ask {
        /// Recording ID
        recording: u64,

        /// Question to answer from the transcript
        question: String,
    },

    /// Draft a follow-up email from a summary's action items
    Email {
        /// Recording ID
        recording: u64,

        /// Summary type whose action items are used
        #[arg(short = 't', long = "type")]
        summary_type: Option<String>,
    },

    /// List available summary types
    Types,

    /// Custom summary profile management
    #[command(subcommand)]
    Profiles(ProfilesCommand),

    /// Summary cache management
    #[command(subcommand)]
    Cache(CacheCommand),

    /// Sign in to the remote summary store
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Launch the interactive TUI
    Tui,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfilesCommand {
    /// List custom profiles
    List,

    /// Show a profile (custom or built-in)
    Show {
        /// Profile id
        id: String,
    },

    /// Create a custom profile
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Framework instructions sent to the model
        #[arg(short, long)]
        prompt: String,

        /// Short description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Update fields of a custom profile
    Update {
        /// Profile id
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        prompt: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a custom profile
    Delete {
        /// Profile id
        id: String,
    },

    /// Show or set the default summary type
    Default {
        /// Profile id to make the default
        id: Option<String>,
    },

    /// Export custom profiles as JSON
    Export {
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace custom profiles with a JSON export
    Import {
        /// File produced by `profiles export`
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// List locally cached summaries
    List {
        /// Only show entries for this recording ID
        meeting: Option<String>,
    },

    /// Remove the locally cached summary for a meeting and type
    Clear {
        /// Recording ID
        meeting: String,

        /// Summary type or custom profile id
        summary_type: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Verify an access token and remember the session
    Login {
        /// Access token issued by the auth provider
        #[arg(long)]
        token: String,
    },

    /// Forget the current session
    Logout,

    /// Show the current session
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn summarize_accepts_type_flag() {
        let cli = Cli::parse_from(["stokemeet", "summarize", "42", "--type", "Sales - BANT"]);
        match cli.command {
            Commands::Summarize {
                recording,
                summary_type,
            } => {
                assert_eq!(recording, 42);
                assert_eq!(summary_type.as_deref(), Some("Sales - BANT"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
