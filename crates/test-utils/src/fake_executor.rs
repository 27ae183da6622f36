use std::sync::{Arc, Mutex};

use esqlate_startup::errors::Result;
use esqlate_startup::exec::{
    CommandSpec, ExecutionResult, ProcessExecutor, SetupFailure, StreamingFuture,
};

/// Which contract a recorded command was run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Blocking,
    Streaming,
}

type Matcher = Box<dyn Fn(&CommandSpec) -> bool + Send + Sync>;
type Effect = Box<dyn Fn(&CommandSpec) + Send + Sync>;

/// A fake executor that:
/// - records every command it is asked to run, with its mode
/// - applies registered side effects (e.g. "clone creates a directory")
/// - exits 0 unless a scripted exit code matches the command.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    calls: Arc<Mutex<Vec<(Mode, CommandSpec)>>>,
    effects: Arc<Mutex<Vec<(Matcher, Effect)>>>,
    exit_codes: Arc<Mutex<Vec<(Matcher, i32)>>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `effect` whenever a command matching `matcher` succeeds.
    pub fn on<M, E>(self, matcher: M, effect: E) -> Self
    where
        M: Fn(&CommandSpec) -> bool + Send + Sync + 'static,
        E: Fn(&CommandSpec) + Send + Sync + 'static,
    {
        self.effects
            .lock()
            .unwrap()
            .push((Box::new(matcher), Box::new(effect)));
        self
    }

    /// Make commands matching `matcher` exit with `code`.
    pub fn exit_with<M>(self, matcher: M, code: i32) -> Self
    where
        M: Fn(&CommandSpec) -> bool + Send + Sync + 'static,
    {
        self.exit_codes.lock().unwrap().push((Box::new(matcher), code));
        self
    }

    pub fn calls(&self) -> Vec<(Mode, CommandSpec)> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded commands as argv strings, e.g. `"git clone <url> dep"`.
    pub fn argv_lines(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|(_, spec)| spec.argv().join(" "))
            .collect()
    }

    fn execute(&self, mode: Mode, spec: &CommandSpec) -> i32 {
        self.calls.lock().unwrap().push((mode, spec.clone()));

        let code = self
            .exit_codes
            .lock()
            .unwrap()
            .iter()
            .find(|(m, _)| m(spec))
            .map(|(_, code)| *code)
            .unwrap_or(0);

        if code == 0 {
            for (matcher, effect) in self.effects.lock().unwrap().iter() {
                if matcher(spec) {
                    effect(spec);
                }
            }
        }
        code
    }
}

impl ProcessExecutor for FakeExecutor {
    fn run_blocking(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        match self.execute(Mode::Blocking, spec) {
            0 => Ok(ExecutionResult::success()),
            code => Err(SetupFailure {
                command: spec.clone(),
                exit_code: Some(code),
                stdout: String::new(),
                stderr: format!("fake failure of {}", spec.program),
                spawn_error: None,
            }
            .into()),
        }
    }

    fn run_streaming<'a>(&'a self, spec: &'a CommandSpec) -> StreamingFuture<'a> {
        Box::pin(async move {
            Ok(match self.execute(Mode::Streaming, spec) {
                0 => ExecutionResult::success(),
                code => ExecutionResult::failed(format!("{spec} exited with status {code}")),
            })
        })
    }
}

/// Matches commands whose argv starts with `prefix`.
pub fn argv_starts_with(
    prefix: &'static [&'static str],
) -> impl Fn(&CommandSpec) -> bool + Send + Sync + 'static {
    move |spec| spec.argv().starts_with(prefix)
}
