// src/steps/acquire.rs

//! Clone-if-absent, then check out a pinned revision.

use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::CommandSpec;
use crate::fs::{PathKind, is_expected_type};
use crate::workspace::Workspace;

/// A repository to acquire into the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repository {
    pub url: &'static str,
    /// Destination, relative to the workspace root.
    pub dir: &'static str,
    pub revision: Option<&'static str>,
}

/// Make sure `repo` is cloned into its directory and sitting on its pinned
/// revision.
///
/// The clone is skipped whenever the destination already is a directory. An
/// existing clone is trusted as-is: its remote is never compared against
/// `repo.url`. The checkout always runs, so a clone left on another revision
/// is moved back to the pin.
pub fn acquire(ws: &Workspace, repo: &Repository) -> Result<()> {
    let dest = ws.path(repo.dir);
    let git = &ws.tools().git;

    if is_expected_type(ws.fs(), &dest, PathKind::Directory) {
        debug!(path = ?dest, "repository already present; skipping clone");
    } else {
        info!(url = repo.url, path = ?dest, "cloning repository");
        let clone = CommandSpec::new(git)
            .args(["clone", repo.url, repo.dir])
            .current_dir(ws.root());
        ws.executor().run_blocking(&clone)?;
    }

    if let Some(revision) = repo.revision {
        info!(revision, path = ?dest, "checking out pinned revision");
        let checkout = ws.command_in(git, repo.dir).args(["checkout", revision]);
        ws.executor().run_blocking(&checkout)?;
    }

    Ok(())
}
