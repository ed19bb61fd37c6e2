//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Leafex using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Leafex - Layered document leaf exporter
#[derive(Parser, Debug)]
#[command(name = "leafex")]
#[command(version, about, long_about = None)]
#[command(author = "Leafex Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "leafex.toml", env = "LEAFEX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LEAFEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Level to initialize logging with
    ///
    /// `--log-level` wins, then `export --verbose`, then the configured level.
    pub fn log_level_or(&self, configured: &str) -> String {
        if let Some(level) = &self.log_level {
            return level.clone();
        }
        match &self.command {
            Commands::Export(args) if args.verbose => "debug".to_string(),
            _ => configured.to_string(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export every leaf layer of a document to its own image
    Export(commands::export::ExportArgs),

    /// Show where leaves and captions would be written
    Inspect(commands::inspect::InspectArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
