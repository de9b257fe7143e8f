// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `jobcast`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jobcast",
    version,
    about = "Run a pre-approved host command as an observable job and stream its log.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the command catalog (TOML).
    ///
    /// Default: `Jobcast.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Jobcast.toml")]
    pub config: String,

    /// Name of the catalog command to submit.
    #[arg(value_name = "COMMAND", required_unless_present = "dry_run")]
    pub command: Option<String>,

    /// Extra flags appended to the command's argument vector.
    ///
    /// Only accepted for catalog entries with `allow_extra_args = true`.
    #[arg(value_name = "ARG", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `JOBCAST_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate the catalog, print it, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
