// src/steps/mod.rs

//! Idempotent building blocks shared by the pipelines.
//!
//! Each step probes the filesystem first and only shells out when its
//! output is missing. Setup failures propagate as `StartupError::Setup`, so
//! with `?` nothing after a failed step runs.

pub mod acquire;
pub mod build;
pub mod definitions;
pub mod download;

pub use acquire::{Repository, acquire};
pub use build::{ensure_built, ensure_installed};
pub use definitions::copy_definitions;
pub use download::ensure_downloaded;
