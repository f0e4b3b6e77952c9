//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for dataexport using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Exit code: every requested resource type was exported
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code: at least one resource type failed
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code: configuration could not be loaded or is invalid
pub const EXIT_CONFIG: i32 = 2;
/// Exit code: clients could not be created
pub const EXIT_CONNECTION: i32 = 4;
/// Exit code: anything else
pub const EXIT_FATAL: i32 = 5;

/// dataexport - commercetools to CSV export tool
#[derive(Parser, Debug)]
#[command(name = "dataexport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "dataexport.toml", env = "DATAEXPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DATAEXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the configured resource types as CSV files
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
