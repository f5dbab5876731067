//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use hexdef_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{HexError, HexResult},
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
    fn create_dir_all(&self, path: &Path) -> HexResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> HexResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> HexResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list_dir(&self, path: &Path) -> HexResult<Vec<PathBuf>> {
        let read_dir =
            std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            entries.push(entry.path());
        }
        entries.sort();
        Ok(entries)
    }

    fn walk_dirs(&self, root: &Path, max_depth: usize) -> HexResult<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name();

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_dir() => dirs.push(entry.into_path()),
                Ok(_) => {}
                // Unreadable subtrees are skipped, not fatal.
                Err(e) => debug!(root = %root.display(), error = %e, "Skipping unreadable entry"),
            }
        }
        Ok(dirs)
    }

    fn remove_dir_all(&self, path: &Path) -> HexResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> HexError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
