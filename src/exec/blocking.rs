// src/exec/blocking.rs

//! Fail-fast synchronous execution for setup commands.

use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::command::{CommandSpec, ExecutionResult, SetupFailure};

/// Run `spec` to completion, capturing stdout/stderr.
///
/// Blocks the calling thread. A non-zero exit, a signal, or a failure to
/// spawn becomes `StartupError::Setup` carrying the captured output; the
/// caller is expected to propagate it with `?` so no later step runs.
pub fn run_blocking(spec: &CommandSpec) -> Result<ExecutionResult> {
    info!(
        program = %spec.program,
        args = ?spec.args,
        cwd = ?spec.cwd,
        "running setup command"
    );

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .envs(&spec.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(ref dir) = spec.cwd {
        cmd.current_dir(dir);
    }

    let output = match cmd.output() {
        Ok(output) => output,
        Err(e) => {
            warn!(program = %spec.program, error = %e, "could not start setup command");
            return Err(SetupFailure {
                command: spec.clone(),
                exit_code: None,
                stdout: String::new(),
                stderr: String::new(),
                spawn_error: Some(e.to_string()),
            }
            .into());
        }
    };

    let code = output.status.code();
    debug!(program = %spec.program, exit_code = ?code, "setup command exited");

    if output.status.success() {
        return Ok(ExecutionResult::success());
    }

    Err(SetupFailure {
        command: spec.clone(),
        exit_code: code,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        spawn_error: None,
    }
    .into())
}
