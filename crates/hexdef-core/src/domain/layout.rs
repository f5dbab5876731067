//! Project layout conventions.
//!
//! A hexdef project is laid out as:
//!
//! ```text
//! <root>/                         .project_root
//! └── src/
//!     ├── white_src/              headers use .hpp
//!     ├── dark_src/               .project_dark
//!     └── <app>/                  .project_gray
//!         └── src/<app>/
//!             ├── domain/
//!             │   ├── model/      Order.h
//!             │   └── ports/{incoming,outgoing}/
//!             └── adapters/
//!                 ├── {incoming,outgoing}/<tech>/
//!                 └── common/<MW>/ (datagram registries)
//! ```
//!
//! Everything here is a pure function of paths and names.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Port/adapter direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    /// Directory name (`incoming` / `outgoing`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
        }
    }

    /// Class-name fragment (`Incoming` / `Outgoing`).
    pub fn title(&self) -> &'static str {
        match self {
            Self::Incoming => "Incoming",
            Self::Outgoing => "Outgoing",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "incoming" | "in" => Ok(Self::Incoming),
            "outgoing" | "out" => Ok(Self::Outgoing),
            _ => Err(DomainError::UnknownDirection(s.to_string())),
        }
    }
}

/// Sentinel directories identifying a location's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    ProjectRoot,
    Dark,
    Gray,
}

impl Marker {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::ProjectRoot => ".project_root",
            Self::Dark => ".project_dark",
            Self::Gray => ".project_gray",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Default upward search bound for marker directories.
pub const MARKER_SEARCH_DEPTH: usize = 15;

/// Default recursion bound when looking for datagram registry directories.
pub const REGISTRY_SEARCH_DEPTH: usize = 10;

/// Header extensions recognized as model files.
pub const HEADER_EXTENSIONS: [&str; 2] = ["h", "hpp"];

/// White-box components use `.hpp`, everything else `.h`.
pub fn header_extension_for(path: &Path) -> &'static str {
    if path.to_string_lossy().contains("white_src") {
        "hpp"
    } else {
        "h"
    }
}

pub fn is_header_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| HEADER_EXTENSIONS.contains(&e))
}

/// File stem as an owned string (`.../Order.hpp` → `Order`).
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Final path component as an owned string.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `true` when the path's trailing components equal `suffix`'s.
pub fn ends_with_segments(path: &Path, suffix: &[&str]) -> bool {
    let names: Vec<_> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect();
    names.len() >= suffix.len()
        && names[names.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(a, b)| a == b)
}

/// C++ namespace from the path segments after the last `src` component.
///
/// `/p/src/app/src/shop/adapters/outgoing/kafka` → `shop::adapters::outgoing::kafka`
pub fn namespace_after_src(path: &Path) -> Option<String> {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    let last_src = parts.iter().rposition(|p| p == "src")?;
    let tail = &parts[last_src + 1..];
    if tail.is_empty() {
        None
    } else {
        Some(tail.join("::"))
    }
}

/// Path of `to` relative to the directory `from`, using `/` separators.
///
/// Both paths must be anchored the same way (both absolute or both relative
/// to the same base); the common prefix is dropped and each remaining `from`
/// component becomes a `..`.
pub fn relative_path(from: &Path, to: &Path) -> String {
    let from: Vec<_> = from.components().collect();
    let to: Vec<_> = to.components().collect();
    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..from.len() {
        parts.push("..".into());
    }
    for c in &to[common..] {
        parts.push(c.as_os_str().to_string_lossy().into_owned());
    }
    if parts.is_empty() {
        ".".into()
    } else {
        parts.join("/")
    }
}

/// Registry directory pattern `{save_dir}/{middleware}` as a string to look
/// for inside candidate paths.
pub fn registry_pattern(save_dir: &str, middleware: &str) -> String {
    let save_dir = save_dir.trim_matches('/');
    format!("{save_dir}/{middleware}")
}

/// Where registry directories are created when none exist yet, relative to
/// the project root: `{component}/src/{project}/{save_dir}/{middleware}`.
pub fn registry_component_roots() -> [&'static str; 3] {
    ["src/app", "src/dark_src", "src/white_src"]
}

pub fn registry_dir_for(component: &Path, project: &str, save_dir: &str, mw: &str) -> PathBuf {
    let mut dir = component.join("src").join(project);
    for seg in save_dir.split('/').filter(|s| !s.is_empty()) {
        dir.push(seg);
    }
    dir.join(mw)
}
