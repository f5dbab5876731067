//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `hexdef-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{ProjectTemplate, Variables};
use crate::error::HexResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `hexdef_adapters::filesystem::LocalFilesystem` (production)
/// - `hexdef_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Listing methods return full paths, sorted, so traversal order (and every
/// "first match wins" rule built on it) is deterministic.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> HexResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> HexResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> HexResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Immediate children of a directory.
    fn list_dir(&self, path: &Path) -> HexResult<Vec<PathBuf>>;

    /// All directories below `root` (excluding `root`) up to `max_depth`
    /// levels deep.
    fn walk_dirs(&self, root: &Path, max_depth: usize) -> HexResult<Vec<PathBuf>>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> HexResult<()>;
}

/// Port for reading template documents.
///
/// Implemented by `hexdef_adapters::JsonTemplateLoader`.
pub trait TemplateLoader: Send + Sync {
    /// Load the template at `path`, inlining `contentFile` references.
    ///
    /// `variables` resolve tokens inside `contentFile` values.
    fn load(&self, path: &Path, variables: &Variables) -> HexResult<ProjectTemplate>;
}

/// Captured result of running an external command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Port for running external tools (`make`).
///
/// Implemented by `hexdef_adapters::CommandRunner`.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    /// Run `program args…` in `cwd`, blocking until it exits.
    ///
    /// A non-zero exit is *not* an error at this level; only failing to
    /// start the process is.
    fn run(&self, cwd: &Path, program: &str, args: &[String]) -> HexResult<ProcessOutput>;
}
