#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use esqlate_startup::config::Tools;
use esqlate_startup::exec::CommandSpec;
use esqlate_startup::fs::mock::MockFileSystem;
use esqlate_startup::workspace::Workspace;

use crate::fake_executor::FakeExecutor;
use crate::fake_fetcher::FakeFetcher;

/// Root used for mock workspaces.
pub const ROOT: &str = "/work";

/// Builder for a `Workspace` backed by fakes, keeping handles to the fakes so
/// tests can inspect them afterwards.
pub struct WorkspaceBuilder {
    fs: MockFileSystem,
    executor: FakeExecutor,
    fetcher: FakeFetcher,
    tools: Tools,
}

/// The pieces of a built fake workspace.
pub struct FakeWorkspace {
    pub workspace: Workspace,
    pub fs: MockFileSystem,
    pub executor: FakeExecutor,
    pub fetcher: FakeFetcher,
}

impl WorkspaceBuilder {
    pub fn new() -> Self {
        Self {
            fs: MockFileSystem::new(),
            executor: FakeExecutor::new(),
            fetcher: FakeFetcher::new(),
            tools: Tools::default(),
        }
    }

    pub fn with_file(self, rel: &str, content: &str) -> Self {
        self.fs.add_file(root_path(rel), content.as_bytes().to_vec());
        self
    }

    pub fn with_dir(self, rel: &str) -> Self {
        self.fs.add_dir(root_path(rel));
        self
    }

    pub fn with_executor(mut self, f: impl FnOnce(FakeExecutor) -> FakeExecutor) -> Self {
        self.executor = f(self.executor);
        self
    }

    pub fn with_fetcher(mut self, fetcher: FakeFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_tools(mut self, tools: Tools) -> Self {
        self.tools = tools;
        self
    }

    /// Make git/npm behave like the real tools as far as the probes can
    /// tell: a clone creates the destination (and, for the server, its
    /// example definitions), an install creates `node_modules`, and a build
    /// creates the marker for the directory it runs in.
    pub fn with_simulated_toolchain(mut self) -> Self {
        let fs = self.fs.clone();
        let on_clone = move |spec: &CommandSpec| {
            let dest = cwd_of(spec).join(&spec.args[2]);
            fs.add_dir(&dest);
            if spec.args[2] == "dep-esqlate-server" {
                fs.add_file(dest.join("example_definition/a.json"), b"{\"a\":1}".to_vec());
                fs.add_file(dest.join("example_definition/b.json"), b"{\"b\":2}".to_vec());
            }
        };

        let fs = self.fs.clone();
        let on_install = move |spec: &CommandSpec| {
            fs.add_dir(cwd_of(spec).join("node_modules"));
        };

        let fs = self.fs.clone();
        let on_build = move |spec: &CommandSpec| {
            let cwd = cwd_of(spec);
            let marker = if cwd.ends_with("dep-esqlate-server") {
                "dist/cmd.js"
            } else {
                "dist/index.html"
            };
            fs.add_file(cwd.join(marker), b"built".to_vec());
        };

        self.executor = self
            .executor
            .on(invokes("git", "clone"), on_clone)
            .on(invokes("npm", "install"), on_install)
            .on(invokes("npm", "run-script"), on_build);
        self
    }

    pub fn build(self) -> FakeWorkspace {
        let workspace = Workspace::new(
            ROOT,
            Arc::new(self.fs.clone()),
            Arc::new(self.executor.clone()),
            Arc::new(self.fetcher.clone()),
            self.tools,
        );
        FakeWorkspace {
            workspace,
            fs: self.fs,
            executor: self.executor,
            fetcher: self.fetcher,
        }
    }
}

impl Default for WorkspaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn root_path(rel: &str) -> PathBuf {
    Path::new(ROOT).join(rel)
}

fn invokes(
    program: &'static str,
    subcommand: &'static str,
) -> impl Fn(&CommandSpec) -> bool + Send + Sync + 'static {
    move |spec| spec.program == program && spec.args.first().map(String::as_str) == Some(subcommand)
}

fn cwd_of(spec: &CommandSpec) -> PathBuf {
    spec.cwd.clone().unwrap_or_else(|| PathBuf::from(ROOT))
}
