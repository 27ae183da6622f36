// src/fs/mock.rs

use super::{FileSystem, PathKind, PathState};
use crate::errors::{Result, StartupError};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir,
    /// Simulates a path whose metadata cannot be read.
    Unreadable,
}

/// In-memory filesystem keyed by normalised paths.
///
/// Cloning shares the underlying storage, so a test can hand one clone to the
/// code under test and inspect another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
}

fn not_found(path: &Path) -> StartupError {
    StartupError::Io(io::Error::new(
        io::ErrorKind::NotFound,
        format!("not found: {:?}", path),
    ))
}

/// Strip `.` components so `./a/b` and `a/b` are the same key.
fn normalise(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, MockEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = normalise(path.as_ref());
        let mut entries = self.lock();
        if let Some(parent) = path.parent() {
            Self::ensure_dirs(&mut entries, parent);
        }
        entries.insert(path, MockEntry::File(content.into()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = normalise(path.as_ref());
        let mut entries = self.lock();
        Self::ensure_dirs(&mut entries, &path);
    }

    pub fn add_unreadable(&self, path: impl AsRef<Path>) {
        self.lock()
            .insert(normalise(path.as_ref()), MockEntry::Unreadable);
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.lock().get(&normalise(path.as_ref())) {
            Some(MockEntry::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    fn ensure_dirs(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            entries
                .entry(ancestor.to_path_buf())
                .or_insert(MockEntry::Dir);
        }
    }
}

impl FileSystem for MockFileSystem {
    fn probe(&self, path: &Path) -> PathState {
        match self.lock().get(&normalise(path)) {
            Some(MockEntry::File(_)) => PathState::Present(PathKind::File),
            Some(MockEntry::Dir) => PathState::Present(PathKind::Directory),
            Some(MockEntry::Unreadable) => {
                PathState::Indeterminate(io::ErrorKind::PermissionDenied)
            }
            None => PathState::Absent,
        }
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.add_dir(path);
        Ok(())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.add_file(path, contents);
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        let content = self.read(from).ok_or_else(|| not_found(from))?;
        self.add_file(to, content);
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let dir = normalise(path);
        let entries = self.lock();
        if !matches!(entries.get(&dir), Some(MockEntry::Dir)) {
            return Err(not_found(path));
        }
        let mut children: Vec<PathBuf> = entries
            .keys()
            .filter(|p| p.parent() == Some(dir.as_path()))
            .cloned()
            .collect();
        children.sort();
        Ok(children)
    }
}
