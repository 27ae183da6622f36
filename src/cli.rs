// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `esqlate-startup`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "esqlate-startup",
    version,
    about = "Fetch, build and run the eSQLate server and front-end at pinned versions.",
    long_about = None
)]
pub struct CliArgs {
    /// Command to run (server, front, build-server, ...).
    ///
    /// Only the last one given is used.
    #[arg(value_name = "COMMAND")]
    pub commands: Vec<String>,

    /// Directory the dependencies are cloned into and run from.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Path to a config file (TOML).
    ///
    /// Default: `esqlate-startup.toml` in the root directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ESQLATE_STARTUP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl CliArgs {
    /// The selected command, or `""` when none was given.
    pub fn command(&self) -> &str {
        self.commands.last().map(String::as_str).unwrap_or("")
    }
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

/// Parse the process arguments, leaving error reporting to the caller.
pub fn try_parse() -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse()
}
