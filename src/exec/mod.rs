// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] holds `CommandSpec`, `ExecutionResult` and `SetupFailure`.
//! - [`blocking`] runs setup commands (clone, install, build) to completion
//!   and turns any failure into a typed error with captured output.
//! - [`streaming`] runs the final long-lived process with inherited stdio.
//! - [`backend`] provides the `ProcessExecutor` trait and the
//!   `RealProcessExecutor` used in production, which tests replace with a
//!   fake.

pub mod backend;
pub mod blocking;
pub mod command;
pub mod streaming;

pub use backend::{ProcessExecutor, RealProcessExecutor, StreamingFuture};
pub use command::{CommandSpec, ExecutionResult, SetupFailure};
