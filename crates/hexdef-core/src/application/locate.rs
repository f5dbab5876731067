//! Convention discovery.
//!
//! Two traversal primitives, kept separate so each can be tested alone:
//!
//! ```text
//! locate_upward(start, depth, pred)        locate_downward(fs, start, ["src", "*", "domain", "model"])
//!
//!   /p/.project_root   ◄── match              start/
//!   /p/src             ▲                        └─ src/
//!   /p/src/app         │ parent                    ├─ a/   (no domain/model)
//!   /p/src/app/src     │                           └─ b/domain/model  ◄── match
//! ```
//!
//! Marker lookup is `locate_upward` with a predicate that asks the
//! filesystem whether `dir/<marker>` is a directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::ports::Filesystem;
use crate::domain::Marker;

/// Segment that matches any child directory in [`locate_downward`].
pub const ANY: &str = "*";

/// Walk from `start` towards the filesystem root, checking at most
/// `max_depth` directories (`start` included), and return the first one
/// satisfying `predicate`.
pub fn locate_upward<F>(start: &Path, max_depth: usize, mut predicate: F) -> Option<PathBuf>
where
    F: FnMut(&Path) -> bool,
{
    let mut current = Some(start);
    for _ in 0..max_depth {
        let dir = current?;
        if predicate(dir) {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

/// Follow `pattern` below `start`, where [`ANY`] matches every child
/// directory (in sorted order). Returns the first existing directory that
/// matches the whole pattern.
pub fn locate_downward(fs: &dyn Filesystem, start: &Path, pattern: &[&str]) -> Option<PathBuf> {
    let Some((head, rest)) = pattern.split_first() else {
        return fs.is_dir(start).then(|| start.to_path_buf());
    };

    if *head == ANY {
        let children = fs.list_dir(start).ok()?;
        children
            .into_iter()
            .filter(|child| fs.is_dir(child))
            .find_map(|child| locate_downward(fs, &child, rest))
    } else {
        let next = start.join(head);
        if fs.is_dir(&next) {
            locate_downward(fs, &next, rest)
        } else {
            None
        }
    }
}

/// Directory containing `marker`, searching upward from `start`.
pub fn find_marker(
    fs: &dyn Filesystem,
    start: &Path,
    marker: Marker,
    max_depth: usize,
) -> Option<PathBuf> {
    let found = locate_upward(start, max_depth, |dir| fs.is_dir(&dir.join(marker.dir_name())));
    debug!(
        marker = %marker,
        start = %start.display(),
        found = ?found,
        "Marker lookup"
    );
    found
}
