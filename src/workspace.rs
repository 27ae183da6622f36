// src/workspace.rs

//! The explicit root directory plus the collaborators every step needs.
//!
//! Steps never change the process working directory. Every path they touch
//! is `root.join(..)`, and every command carries its own working directory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Tools;
use crate::exec::{CommandSpec, ProcessExecutor, RealProcessExecutor};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::fs::{FileSystem, RealFileSystem};

pub struct Workspace {
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
    executor: Arc<dyn ProcessExecutor>,
    fetcher: Arc<dyn Fetcher>,
    tools: Tools,
}

impl fmt::Debug for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workspace")
            .field("root", &self.root)
            .field("fs", &self.fs)
            .field("tools", &self.tools)
            .finish_non_exhaustive()
    }
}

impl Workspace {
    pub fn new(
        root: impl Into<PathBuf>,
        fs: Arc<dyn FileSystem>,
        executor: Arc<dyn ProcessExecutor>,
        fetcher: Arc<dyn Fetcher>,
        tools: Tools,
    ) -> Self {
        Self {
            root: root.into(),
            fs,
            executor,
            fetcher,
            tools,
        }
    }

    /// Workspace backed by the real filesystem, real processes and HTTP.
    pub fn real(root: impl Into<PathBuf>, tools: Tools) -> Self {
        Self::new(
            root,
            Arc::new(RealFileSystem),
            Arc::new(RealProcessExecutor),
            Arc::new(HttpFetcher::new()),
            tools,
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a workspace-relative path.
    pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root.join(rel)
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn executor(&self) -> &dyn ProcessExecutor {
        self.executor.as_ref()
    }

    pub fn fetcher(&self) -> &dyn Fetcher {
        self.fetcher.as_ref()
    }

    pub fn tools(&self) -> &Tools {
        &self.tools
    }

    /// A command for `program` that runs in the workspace-relative `dir`.
    pub fn command_in(&self, program: &str, dir: impl AsRef<Path>) -> CommandSpec {
        CommandSpec::new(program).current_dir(self.path(dir))
    }
}
