//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use postgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{PostgenError, PostgenResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same storage, so a test can keep a handle after moving
/// one into a service.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dir_all(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_dir_all(parent);
            }
            inner.files.insert(path.to_path_buf(), content.to_string());
        }
        self
    }

    /// Seed a directory and its parents.
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.add_dir_all(path.as_ref());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> PostgenResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> PostgenResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> PostgenResult<String> {
        self.read()?.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> PostgenResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn rename(&self, from: &Path, to: &Path) -> PostgenResult<()> {
        let mut inner = self.write()?;

        if inner.files.contains_key(to) || inner.directories.contains(to) {
            return Err(ApplicationError::FilesystemError {
                path: to.to_path_buf(),
                reason: "Destination already exists".into(),
            }
            .into());
        }

        if let Some(content) = inner.files.remove(from) {
            inner.files.insert(to.to_path_buf(), content);
            return Ok(());
        }

        if !inner.directories.contains(from) {
            return Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "No such file or directory".into(),
            }
            .into());
        }

        let moved = |p: &Path| {
            p.strip_prefix(from).ok().map(|rest| {
                if rest.as_os_str().is_empty() {
                    to.to_path_buf()
                } else {
                    to.join(rest)
                }
            })
        };

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for dir in dirs {
            inner.directories.remove(&dir);
            if let Some(new) = moved(&dir) {
                inner.directories.insert(new);
            }
        }

        let files: Vec<PathBuf> = inner
            .files
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for file in files {
            if let (Some(content), Some(new)) = (inner.files.remove(&file), moved(&file)) {
                inner.files.insert(new, content);
            }
        }

        Ok(())
    }
}

fn poisoned() -> PostgenError {
    PostgenError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}
