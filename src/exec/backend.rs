// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! Pipelines talk to a `ProcessExecutor` instead of spawning processes
//! directly. Production code uses [`RealProcessExecutor`]; tests can provide
//! an implementation that records commands and simulates their effects.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

use super::blocking::run_blocking;
use super::command::{CommandSpec, ExecutionResult};
use super::streaming::run_streaming;

pub type StreamingFuture<'a> = Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + 'a>>;

/// The two execution contracts.
pub trait ProcessExecutor: Send + Sync {
    /// Fail-fast synchronous execution; see [`run_blocking`].
    fn run_blocking(&self, spec: &CommandSpec) -> Result<ExecutionResult>;

    /// Streaming execution with stdio pass-through; see [`run_streaming`].
    fn run_streaming<'a>(&'a self, spec: &'a CommandSpec) -> StreamingFuture<'a>;
}

/// Executor that spawns real OS processes.
#[derive(Debug, Clone, Default)]
pub struct RealProcessExecutor;

impl ProcessExecutor for RealProcessExecutor {
    fn run_blocking(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        run_blocking(spec)
    }

    fn run_streaming<'a>(&'a self, spec: &'a CommandSpec) -> StreamingFuture<'a> {
        Box::pin(run_streaming(spec))
    }
}
