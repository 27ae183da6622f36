// src/logging.rs

//! Diagnostics go to stderr through a `tracing` fmt subscriber. Stdout is
//! left to the children and the line filters.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "ESQLATE_STARTUP_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let from_env = std::env::var(LOG_ENV_VAR).ok();
    let level = resolve_level(cli_level, from_env.as_deref());

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}

/// `--log-level` wins, then a recognised `ESQLATE_STARTUP_LOG`, then `info`.
fn resolve_level(cli_level: Option<LogLevel>, from_env: Option<&str>) -> Level {
    cli_level
        .map(Level::from)
        .or_else(|| from_env.and_then(parse_level))
        .unwrap_or(Level::INFO)
}

fn parse_level(s: &str) -> Option<Level> {
    let level = match s.trim().to_ascii_lowercase().as_str() {
        "error" => LogLevel::Error,
        "warn" | "warning" => LogLevel::Warn,
        "info" => LogLevel::Info,
        "debug" => LogLevel::Debug,
        "trace" => LogLevel::Trace,
        _ => return None,
    };
    Some(level.into())
}

impl From<LogLevel> for Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
