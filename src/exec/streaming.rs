// src/exec/streaming.rs

//! Long-running execution with live stdio pass-through.

use std::process::Stdio;

use tokio::process::Command;
use tracing::info;

use crate::errors::{Result, StartupError};
use crate::exec::command::{CommandSpec, ExecutionResult};

/// Run `spec` with the child's stdin, stdout and stderr connected to ours,
/// resolving when it terminates.
///
/// A non-zero exit is not an error here: it resolves to
/// `ExecutionResult { exit_code: 1, message }` and the dispatcher decides what
/// to do with it. Only a failure to start or wait on the child is an `Err`.
///
/// The child is killed if this future is dropped before it exits.
pub async fn run_streaming(spec: &CommandSpec) -> Result<ExecutionResult> {
    info!(
        program = %spec.program,
        args = ?spec.args,
        cwd = ?spec.cwd,
        "starting long-running process"
    );

    let mut child = {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .envs(&spec.env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(ref dir) = spec.cwd {
            cmd.current_dir(dir);
        }
        cmd.spawn().map_err(|source| StartupError::Spawn {
            program: spec.program.clone(),
            source,
        })?
    };

    let status = child.wait().await?;
    let code = status.code();

    info!(
        program = %spec.program,
        exit_code = ?code,
        success = status.success(),
        "long-running process exited"
    );

    Ok(match code {
        Some(0) => ExecutionResult::success(),
        Some(code) => {
            ExecutionResult::failed(format!("{spec} exited with status {code}"))
        }
        None => ExecutionResult::failed(format!("{spec} was terminated by a signal")),
    })
}
