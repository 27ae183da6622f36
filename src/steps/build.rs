// src/steps/build.rs

//! Install-if-absent and build-if-marker-missing.

use std::path::Path;

use tracing::{debug, info};

use crate::errors::Result;
use crate::fs::{PathKind, is_expected_type};
use crate::workspace::Workspace;

/// Folder whose presence means the package manager has already installed.
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Package-manager script that produces the build output.
pub const BUILD_SCRIPT: &str = "build";

/// Run `npm install` in `dir` unless `dir/node_modules` is a directory.
pub fn ensure_installed(ws: &Workspace, dir: &str) -> Result<()> {
    let deps = ws.path(Path::new(dir).join(DEPENDENCY_DIR));
    if is_expected_type(ws.fs(), &deps, PathKind::Directory) {
        debug!(path = ?deps, "dependencies already installed; skipping install");
        return Ok(());
    }

    info!(dir, "installing dependencies");
    let install = ws.command_in(&ws.tools().npm, dir).arg("install");
    ws.executor().run_blocking(&install)?;
    Ok(())
}

/// Run the build script in `dir` unless `marker` (relative to `dir`) is a
/// file.
pub fn ensure_built(ws: &Workspace, dir: &str, marker: &str) -> Result<()> {
    let marker_path = ws.path(Path::new(dir).join(marker));
    if is_expected_type(ws.fs(), &marker_path, PathKind::File) {
        debug!(path = ?marker_path, "build output present; skipping build");
        return Ok(());
    }

    info!(dir, marker, "building");
    let build = ws
        .command_in(&ws.tools().npm, dir)
        .args(["run-script", BUILD_SCRIPT]);
    ws.executor().run_blocking(&build)?;
    Ok(())
}
