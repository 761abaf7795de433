//! Command-line interface
//!
//! Defines the clap command tree and dispatches each command against a
//! [`LinkStore`] opened from the static configuration.

pub mod commands;

use std::fmt;

use clap::{Parser, Subcommand};

use crate::storage::{LinkStore, StorageFactory};
use commands::{
    check_expiry, config_generate, render_embed, resolve_link, show_metadata, shorten_link,
    update_link,
};

/// Embedlinker - short links with social-preview redirect pages
#[derive(Parser)]
#[command(name = "embedlinker")]
#[command(version)]
#[command(about = "Short links with social-preview redirect pages", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create a short link
    Shorten {
        /// Destination URL (stored as-is)
        url: String,

        /// Metadata entry as key=value, repeatable (e.g. --meta title=Hello)
        #[arg(long = "meta", value_name = "KEY=VALUE")]
        meta: Vec<String>,
    },

    /// Print the destination of a short link
    Resolve {
        /// Short code
        id: String,
    },

    /// Print the metadata of a short link as JSON
    Metadata {
        /// Short code
        id: String,
    },

    /// Point a short link at a new destination
    Update {
        /// Short code
        id: String,

        /// New destination URL
        url: String,
    },

    /// Render the social-preview redirect page of a short link
    Embed {
        /// Short code
        id: String,
    },

    /// Check whether an Instagram CDN URL has expired
    CheckExpiry {
        /// URL to check
        url: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::EmbedlinkerError> for CliError {
    fn from(err: crate::errors::EmbedlinkerError) -> Self {
        CliError::StorageError(err.to_string())
    }
}

/// Run a CLI command from clap-parsed input
pub fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    // Commands that never touch the store
    match cmd {
        Commands::CheckExpiry { url } => return check_expiry(&url),
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => return config_generate(output_path, force),
        _ => {}
    }

    let mut store = StorageFactory::create();
    let result = run_store_command(&mut store, cmd);
    store.close();
    result
}

fn run_store_command(store: &mut LinkStore, cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Shorten { url, meta } => shorten_link(store, &url, &meta),
        Commands::Resolve { id } => resolve_link(store, &id),
        Commands::Metadata { id } => show_metadata(store, &id),
        Commands::Update { id, url } => update_link(store, &id, &url),
        Commands::Embed { id } => render_embed(store, &id),
        Commands::CheckExpiry { .. } | Commands::Config { .. } => {
            unreachable!("handled before opening the store")
        }
    }
}
