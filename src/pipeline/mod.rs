// src/pipeline/mod.rs

//! The named pipelines.
//!
//! Each pipeline is a straight-line sequence of steps. The only decisions
//! made are the idempotency probes inside the steps themselves; a failing
//! setup step ends the pipeline through `?`.

pub mod pins;
pub mod registry;

use std::fmt;
use std::path::Path;

use tokio::io::{BufReader, BufWriter};
use tracing::info;

use crate::errors::Result;
use crate::exec::{CommandSpec, ExecutionResult};
use crate::filters::{self, FRONT_PREFIX, SERVER_PREFIX};
use crate::steps::{acquire, copy_definitions, ensure_built, ensure_downloaded, ensure_installed};
use crate::workspace::Workspace;

pub use registry::Registry;

use pins::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pipeline {
    Server,
    Front,
    CheckoutFront,
    CheckoutServer,
    NpmFront,
    NpmServer,
    DownloadFront,
    BuildFront,
    BuildServer,
    SillyGrep,
    SillySedServer,
    SillySedFront,
}

impl Pipeline {
    /// Every pipeline, in the order they are listed to the user.
    pub const ALL: [Pipeline; 12] = [
        Pipeline::Server,
        Pipeline::Front,
        Pipeline::CheckoutFront,
        Pipeline::CheckoutServer,
        Pipeline::NpmFront,
        Pipeline::NpmServer,
        Pipeline::DownloadFront,
        Pipeline::BuildFront,
        Pipeline::BuildServer,
        Pipeline::SillyGrep,
        Pipeline::SillySedServer,
        Pipeline::SillySedFront,
    ];

    /// Command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Pipeline::Server => "server",
            Pipeline::Front => "front",
            Pipeline::CheckoutFront => "checkout-front",
            Pipeline::CheckoutServer => "checkout-server",
            Pipeline::NpmFront => "npm-front",
            Pipeline::NpmServer => "npm-server",
            Pipeline::DownloadFront => "download-front",
            Pipeline::BuildFront => "build-front",
            Pipeline::BuildServer => "build-server",
            Pipeline::SillyGrep => "silly-grep",
            Pipeline::SillySedServer => "silly-sed-server",
            Pipeline::SillySedFront => "silly-sed-front",
        }
    }

    pub async fn run(self, ws: &Workspace) -> Result<ExecutionResult> {
        info!(pipeline = self.name(), root = ?ws.root(), "running pipeline");

        match self {
            Pipeline::Server => server(ws).await,
            Pipeline::Front => front(ws).await,
            Pipeline::CheckoutFront => {
                acquire(ws, &FRONT_REPO)?;
                Ok(ExecutionResult::success())
            }
            Pipeline::CheckoutServer => {
                acquire(ws, &SERVER_REPO)?;
                Ok(ExecutionResult::success())
            }
            Pipeline::NpmFront => {
                ensure_installed(ws, FRONT_REPO.dir)?;
                Ok(ExecutionResult::success())
            }
            Pipeline::NpmServer => {
                ensure_installed(ws, SERVER_REPO.dir)?;
                Ok(ExecutionResult::success())
            }
            Pipeline::DownloadFront => {
                ensure_downloaded(ws, FRONT_ASSET_URL, FRONT_ASSET).await?;
                Ok(ExecutionResult::success())
            }
            Pipeline::BuildFront => {
                build_front(ws)?;
                Ok(ExecutionResult::success())
            }
            Pipeline::BuildServer => {
                build_server(ws)?;
                Ok(ExecutionResult::success())
            }
            Pipeline::SillyGrep => {
                let input = BufReader::new(tokio::io::stdin());
                let mut output = BufWriter::new(tokio::io::stdout());
                filters::filter_lines(input, &mut output, filters::is_traffic_line).await?;
                Ok(ExecutionResult::success())
            }
            Pipeline::SillySedServer => prefix_stdin(SERVER_PREFIX).await,
            Pipeline::SillySedFront => prefix_stdin(FRONT_PREFIX).await,
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Clone, copy example definitions, install, build.
pub fn build_server(ws: &Workspace) -> Result<()> {
    acquire(ws, &SERVER_REPO)?;
    copy_definitions(ws, EXAMPLE_DEFINITIONS, DEFINITION_DIR)?;
    ensure_installed(ws, SERVER_REPO.dir)?;
    ensure_built(ws, SERVER_REPO.dir, SERVER_MARKER)
}

/// Clone, install, build, then publish the built HTML as the front asset.
pub fn build_front(ws: &Workspace) -> Result<()> {
    acquire(ws, &FRONT_REPO)?;
    ensure_installed(ws, FRONT_REPO.dir)?;
    ensure_built(ws, FRONT_REPO.dir, FRONT_MARKER)?;

    let built = ws.path(Path::new(FRONT_REPO.dir).join(FRONT_MARKER));
    ws.fs().copy(&built, &ws.path(FRONT_ASSET))?;
    info!(asset = FRONT_ASSET, "published built front-end");
    Ok(())
}

async fn server(ws: &Workspace) -> Result<ExecutionResult> {
    build_server(ws)?;

    let (key, value) = DEFINITION_ENV;
    let run = ws
        .command_in(&ws.tools().node, SERVER_REPO.dir)
        .args([SERVER_MARKER, "serve"])
        .env(key, value);
    ws.executor().run_streaming(&run).await
}

async fn front(ws: &Workspace) -> Result<ExecutionResult> {
    ensure_downloaded(ws, FRONT_ASSET_URL, FRONT_ASSET).await?;

    let run = CommandSpec::new(&ws.tools().webview)
        .args(["-t", WEBVIEW_TITLE, "-c", FRONT_ASSET, "-s", WEBVIEW_STREAMS])
        .current_dir(ws.root());
    ws.executor().run_streaming(&run).await
}

async fn prefix_stdin(prefix: &str) -> Result<ExecutionResult> {
    let input = BufReader::new(tokio::io::stdin());
    let mut output = BufWriter::new(tokio::io::stdout());
    filters::prefix_lines(input, &mut output, prefix).await?;
    Ok(ExecutionResult::success())
}
