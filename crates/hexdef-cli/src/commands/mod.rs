//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into service calls and print the
//! outcome. No business logic lives here.

use std::path::{Path, PathBuf};

use crate::error::{CliResult, IntoCli};

pub mod adapter;
pub mod build;
pub mod completions;
pub mod config;
pub mod datagrams;
pub mod init;
pub mod new;
pub mod port;

/// Absolute form of an optional user path, defaulting to the current
/// directory. Existing paths are canonicalised so upward searches see real
/// parents rather than `..` segments.
pub fn start_dir(path: Option<&Path>) -> CliResult<PathBuf> {
    let cwd = std::env::current_dir().with_cli_context(|| "Cannot read current directory")?;
    Ok(absolutize(&cwd, path))
}

fn absolutize(cwd: &Path, path: Option<&Path>) -> PathBuf {
    let joined = match path {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => cwd.to_path_buf(),
    };
    std::fs::canonicalize(&joined).unwrap_or(joined)
}
