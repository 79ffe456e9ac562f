// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `winsvc`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "winsvc",
    version,
    about = "Start and stop Windows services through scheduled tasks.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a config file (TOML).
    ///
    /// Default: `Winsvc.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WINSVC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Suppress log messages.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the START-<name> task and wait until the services are running.
    Start(ServiceArgs),
    /// Run the STOP-<name> task and wait until the services are stopped.
    Stop(ServiceArgs),
    /// Create the START-<name> and STOP-<name> tasks (run as administrator).
    Setup(SetupArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServiceArgs {
    /// Name of the service (may contain `*`, `?`, `[...]` wildcards).
    pub service_name: String,

    /// Wait this many seconds for the service to be started/stopped.
    #[arg(short, long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub wait: Option<u64>,
}

#[derive(Debug, Clone, Args)]
pub struct SetupArgs {
    /// Logical name; the tasks are called START-<name> and STOP-<name>.
    pub name: String,

    /// Service pattern handed to the scripts. Repeatable; defaults to <name>.
    #[arg(long = "service", value_name = "PATTERN")]
    pub services: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
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
