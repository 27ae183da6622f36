// src/exec/command.rs

//! Immutable description of an external command and the shapes its outcome
//! can take.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A program invocation: what to run, where, and with which extra environment.
///
/// Everything not listed in `env` is inherited from the current process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// The program followed by its arguments, e.g. `["git", "clone", ...]`.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

/// Renders as `program ["arg1", "arg2"]`.
impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.program, self.args)
    }
}

/// Outcome of running a command to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub message: Option<String>,
}

impl ExecutionResult {
    pub fn success() -> Self {
        Self {
            exit_code: 0,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            exit_code: 1,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Everything known about a setup command that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupFailure {
    pub command: CommandSpec,
    /// `None` when the process never started or was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub spawn_error: Option<String>,
}

impl SetupFailure {
    pub fn exit_code(&self) -> i32 {
        match self.exit_code {
            Some(code) if code != 0 => code,
            _ => 1,
        }
    }
}

impl fmt::Display for SetupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error running {}", self.command)?;
        if let Some(ref cwd) = self.command.cwd {
            writeln!(f, "in directory: {}", cwd.display())?;
        }
        match self.exit_code {
            Some(code) => writeln!(f, "exit code: {code}")?,
            None => writeln!(f, "exit code: none")?,
        }
        if let Some(ref err) = self.spawn_error {
            writeln!(f, "spawn error: {err}")?;
        }
        writeln!(f)?;
        writeln!(f, "STDOUT: ")?;
        writeln!(f, "{}", self.stdout)?;
        writeln!(f)?;
        writeln!(f, "STDERR: ")?;
        write!(f, "{}", self.stderr)
    }
}
