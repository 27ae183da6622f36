// src/fs/mod.rs

//! Filesystem access and the state probe that every idempotency decision
//! rests on.
//!
//! Probing never fails: a missing path is [`PathState::Absent`], and any other
//! error from the metadata lookup (permission denied, broken mount, ...) is
//! folded into [`PathState::Indeterminate`]. Callers that only ask
//! [`PathState::is_expected`] treat both the same way, which means an
//! unreadable path is re-created rather than reported.

use std::fmt::Debug;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::errors::Result;

pub mod mock;

/// The kind of an existing filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
    Other,
}

/// Result of probing a path. Always derived fresh; never cache it, because
/// git and npm mutate the tree between probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Absent,
    Present(PathKind),
    /// The lookup failed for a reason other than "not found".
    Indeterminate(io::ErrorKind),
}

impl PathState {
    pub fn exists(&self) -> bool {
        matches!(self, PathState::Present(_))
    }

    pub fn kind(&self) -> Option<PathKind> {
        match self {
            PathState::Present(kind) => Some(*kind),
            _ => None,
        }
    }

    /// True only when the path exists and is exactly `kind`.
    ///
    /// A path of the wrong kind is treated like an absent one.
    pub fn is_expected(&self, kind: PathKind) -> bool {
        self.kind() == Some(kind)
    }

    /// Fold an `io::Result<fs::Metadata>` into a state.
    pub fn from_metadata(meta: io::Result<fs::Metadata>) -> Self {
        match meta {
            Ok(meta) => {
                let ft = meta.file_type();
                let kind = if ft.is_file() {
                    PathKind::File
                } else if ft.is_dir() {
                    PathKind::Directory
                } else {
                    PathKind::Other
                };
                PathState::Present(kind)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => PathState::Absent,
            Err(e) => PathState::Indeterminate(e.kind()),
        }
    }
}

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn probe(&self, path: &Path) -> PathState;
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Write `contents` to `path`, replacing whatever was there.
    ///
    /// Readers never observe a partly written file: `path` either keeps its
    /// old state or holds all of `contents`.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Copy a regular file, overwriting the destination.
    fn copy(&self, from: &Path, to: &Path) -> Result<()>;

    /// Return a list of entries in a directory.
    /// Returns full paths.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// Convenience: probe and compare in one call.
pub fn is_expected_type(fs: &dyn FileSystem, path: &Path, kind: PathKind) -> bool {
    let state = fs.probe(path);
    if let PathState::Indeterminate(err) = state {
        debug!(path = ?path, error = ?err, "probe could not determine path state; treating as absent");
    }
    state.is_expected(kind)
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn probe(&self, path: &Path) -> PathState {
        PathState::from_metadata(fs::metadata(path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("creating dir {:?}", path))?;
        Ok(())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;

        // Same directory, so the final rename stays on one filesystem.
        let mut staged = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("staging write in {:?}", parent))?;
        staged
            .write_all(contents)
            .with_context(|| format!("writing file {:?}", staged.path()))?;
        staged
            .persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("replacing file {:?}", path))?;
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        fs::copy(from, to).with_context(|| format!("copying {:?} to {:?}", from, to))?;
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            let entry = entry?;
            entries.push(entry.path());
        }
        entries.sort();
        Ok(entries)
    }
}
