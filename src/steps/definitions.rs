// src/steps/definitions.rs

use std::path::Path;

use tracing::{debug, info};

use crate::errors::Result;
use crate::fs::{PathKind, is_expected_type};
use crate::workspace::Workspace;

/// Copy every regular file in `source_dir` into `target_dir`, creating the
/// target if needed. Existing files of the same name are overwritten;
/// sub-directories of the source are skipped.
///
/// Returns the number of files copied.
pub fn copy_definitions(ws: &Workspace, source_dir: &str, target_dir: &str) -> Result<usize> {
    let target = ws.path(target_dir);
    if !is_expected_type(ws.fs(), &target, PathKind::Directory) {
        debug!(path = ?target, "creating definition directory");
        ws.fs().create_dir_all(&target)?;
    }

    let mut copied = 0;
    for entry in ws.fs().read_dir(&ws.path(source_dir))? {
        if !is_expected_type(ws.fs(), &entry, PathKind::File) {
            debug!(path = ?entry, "not a regular file; skipping");
            continue;
        }
        let Some(name) = entry.file_name() else {
            continue;
        };
        ws.fs().copy(&entry, &target.join(Path::new(name)))?;
        copied += 1;
    }

    info!(from = source_dir, to = target_dir, copied, "copied example definitions");
    Ok(copied)
}
