//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use postgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{PostgenError, PostgenResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> PostgenResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> PostgenResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn rename(&self, from: &Path, to: &Path) -> PostgenResult<()> {
        // the caller reports the rename itself; keep only the OS reason
        std::fs::rename(from, to).map_err(|e| {
            ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> PostgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.gradle");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, "include 'core'").unwrap();
        assert!(fs.is_file(&path));
        assert!(!fs.is_dir(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "include 'core'");
    }

    #[test]
    fn read_missing_file_maps_to_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFilesystem::new()
            .read_to_string(&dir.path().join("nope"))
            .unwrap_err();
        assert!(matches!(
            err,
            PostgenError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn non_utf8_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(LocalFilesystem::new().read_to_string(&path).is_err());
    }

    #[test]
    fn renames_directory() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("github");
        std::fs::create_dir(&from).unwrap();
        let to = dir.path().join(".github");

        LocalFilesystem::new().rename(&from, &to).unwrap();
        assert!(!from.exists());
        assert!(to.is_dir());
    }

    #[test]
    fn rename_onto_non_empty_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("github");
        let to = dir.path().join(".github");
        std::fs::create_dir(&from).unwrap();
        std::fs::create_dir(&to).unwrap();
        std::fs::write(to.join("ci.yml"), "on: push\n").unwrap();

        let err = LocalFilesystem::new().rename(&from, &to).unwrap_err();
        assert!(matches!(
            err,
            PostgenError::Application(ApplicationError::FilesystemError { ref reason, .. })
                if !reason.starts_with("Failed to rename")
        ));
        assert!(from.is_dir());
    }
}
