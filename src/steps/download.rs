// src/steps/download.rs

use tracing::{debug, info};

use crate::errors::Result;
use crate::fs::{PathKind, is_expected_type};
use crate::workspace::Workspace;

/// Fetch `url` into the workspace-relative `dest` unless `dest` is already a
/// file. The body is written byte-for-byte, replacing anything at `dest`.
///
/// Returns `true` when a download happened.
pub async fn ensure_downloaded(ws: &Workspace, url: &str, dest: &str) -> Result<bool> {
    let path = ws.path(dest);
    if is_expected_type(ws.fs(), &path, PathKind::File) {
        debug!(path = ?path, "asset already present; skipping download");
        return Ok(false);
    }

    let body = ws.fetcher().fetch(url).await?;
    ws.fs().write(&path, &body)?;
    info!(url, path = ?path, bytes = body.len(), "asset downloaded");
    Ok(true)
}
