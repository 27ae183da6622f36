// src/lib.rs

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod exec;
pub mod fetch;
pub mod filters;
pub mod fs;
pub mod logging;
pub mod pipeline;
pub mod steps;
pub mod workspace;

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::dispatch::Dispatcher;
use crate::pipeline::Registry;
use crate::workspace::Workspace;

/// High-level entry point used by `main.rs`.
///
/// Resolves configuration, builds the workspace and the command registry,
/// and dispatches the selected command. Returns the exit code the process
/// should end with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let cfg = config::resolve(args.config.as_deref(), &args.root)?;
    debug!(tools = ?cfg.tools, root = ?args.root, "configuration resolved");

    let workspace = Workspace::real(&args.root, cfg.tools);
    let dispatcher = Dispatcher::new(Registry::standard(), workspace);

    let mut stderr = std::io::stderr();
    Ok(dispatcher.dispatch(args.command(), &mut stderr).await)
}
