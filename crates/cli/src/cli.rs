//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Bus Writer - buffering publisher between producers and a message bus
#[derive(Parser, Debug)]
#[command(
    name = "bus-writer",
    author,
    version,
    about = "Buffering bus message writer",
    long_about = "A concurrency-safe buffering publisher.\n\n\
                  Batches small messages from concurrent producers into fewer,\n\
                  larger transport calls, and drains unsent data on shutdown."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "BUS_WRITER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "BUS_WRITER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drive concurrent producers through the writer
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "config.toml", env = "BUS_WRITER_CONFIG")]
    pub config: PathBuf,

    /// Override flush threshold (bytes) from configuration
    #[arg(long, env = "BUS_WRITER_THRESHOLD")]
    pub threshold: Option<usize>,

    /// Number of concurrent producer tasks
    #[arg(long, default_value = "4", env = "BUS_WRITER_PRODUCERS")]
    pub producers: usize,

    /// Messages per producer
    #[arg(long, default_value = "1000", env = "BUS_WRITER_MESSAGES")]
    pub messages: usize,

    /// Message size in bytes
    #[arg(long, default_value = "64", env = "BUS_WRITER_MESSAGE_SIZE")]
    pub message_size: usize,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "BUS_WRITER_METRICS_PORT")]
    pub metrics_port: u16,

    /// Validate configuration and exit without running
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "config.toml", env = "BUS_WRITER_CONFIG")]
    pub config: PathBuf,
}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "config.toml", env = "BUS_WRITER_CONFIG")]
    pub config: PathBuf,

    /// Print as JSON instead of TOML
    #[arg(long)]
    pub json: bool,
}

/// Log output format choices
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum LogFormat {
    /// JSON structured logs
    Json,
    /// Human-readable format
    Pretty,
    /// Compact single-line format
    Compact,
}
