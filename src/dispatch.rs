// src/dispatch.rs

//! Maps a command name to a pipeline, runs it, and turns the outcome into a
//! process exit code. This is the only place that decides how the process
//! ends.

use std::io::Write;

use tracing::{error, warn};

use crate::errors::StartupError;
use crate::pipeline::Registry;
use crate::workspace::Workspace;

#[derive(Debug)]
pub struct Dispatcher {
    registry: Registry,
    workspace: Workspace,
}

impl Dispatcher {
    pub fn new(registry: Registry, workspace: Workspace) -> Self {
        Self {
            registry,
            workspace,
        }
    }

    /// Run the pipeline registered as `name` and return the exit code.
    ///
    /// Diagnostics for the user go to `err_out`:
    /// - unknown name: the list of valid names, exit `1`, nothing runs;
    /// - setup failure: the full diagnostic block, exit with the child's code;
    /// - any other error: the error, exit `1`;
    /// - a long-running process that ended badly: its status and message.
    pub async fn dispatch(&self, name: &str, err_out: &mut dyn Write) -> i32 {
        let Some(pipeline) = self.registry.lookup(name) else {
            warn!(command = name, "unknown command");
            let _ = self.write_usage(name, err_out);
            return 1;
        };

        match pipeline.run(&self.workspace).await {
            Ok(result) if result.is_success() => 0,
            Ok(result) => {
                let _ = writeln!(err_out, "Exit Status: {}", result.exit_code);
                let _ = writeln!(err_out);
                if let Some(message) = result.message {
                    let _ = writeln!(err_out, "{message}");
                }
                result.exit_code
            }
            Err(StartupError::Setup(failure)) => {
                error!(
                    pipeline = %pipeline,
                    program = %failure.command.program,
                    exit_code = ?failure.exit_code,
                    "setup command failed"
                );
                let _ = writeln!(err_out, "{failure}");
                failure.exit_code()
            }
            Err(err) => {
                error!(pipeline = %pipeline, error = %err, "pipeline failed");
                let _ = writeln!(err_out, "{err}");
                err.exit_code()
            }
        }
    }

    fn write_usage(&self, name: &str, out: &mut dyn Write) -> std::io::Result<()> {
        if name.is_empty() {
            writeln!(out, "You must specify a command, one of:")?;
        } else {
            writeln!(out, "Unknown command \"{name}\", expected one of:")?;
        }
        write_command_list(&self.registry, out)
    }
}

/// Report a command line that could not be parsed the way an unknown command
/// is reported: the parser's message, then every valid name. Always exit `1`.
pub fn reject_arguments(
    err: &clap::Error,
    registry: &Registry,
    err_out: &mut dyn Write,
) -> i32 {
    warn!(kind = ?err.kind(), "unusable command line");
    let _ = write!(err_out, "{}", err.render());
    let _ = writeln!(err_out, "Expected a command, one of:");
    let _ = write_command_list(registry, err_out);
    1
}

fn write_command_list(registry: &Registry, out: &mut dyn Write) -> std::io::Result<()> {
    for valid in registry.names() {
        writeln!(out, "  {valid}")?;
    }
    Ok(())
}
