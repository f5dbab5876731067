//! Project template documents.
//!
//! A template is a flat, ordered list of structure items read from JSON:
//!
//! ```json
//! {
//!   "name": "white",
//!   "description": "White-box component",
//!   "structure": [
//!     { "type": "directory", "path": "src/${PROJECT_NAME}/domain/model" },
//!     { "type": "file", "path": "Makefile", "contentFile": "white/Makefile" },
//!     { "type": "file", "path": "README.md", "content": "# ${PROJECT_NAME}" }
//!   ]
//! }
//! ```
//!
//! Templates are immutable once loaded. Materialization works on a resolved
//! copy ([`ProjectStructure`](super::ProjectStructure)).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

// ── Template ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub structure: Vec<ProjectStructureItem>,
    /// Directory the template document was read from; `contentRef`
    /// entries are resolved against it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl ProjectTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            structure: Vec::new(),
            base_dir: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_item(mut self, item: ProjectStructureItem) -> Self {
        self.structure.push(item);
        self
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// A template must declare at least one entry.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.structure.is_empty() {
            return Err(DomainError::EmptyTemplate {
                template: self.name.clone(),
            });
        }
        if let Some(item) = self.structure.iter().find(|i| i.path.trim().is_empty()) {
            return Err(DomainError::InvalidTemplate(format!(
                "{} entry with an empty path",
                item.kind
            )));
        }
        Ok(())
    }

    pub fn file_count(&self) -> usize {
        self.structure.iter().filter(|i| i.is_file()).count()
    }

    pub fn directory_count(&self) -> usize {
        self.structure.len() - self.file_count()
    }
}

// ── Structure items ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Directory,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
        }
    }
}

/// One entry of a template's `structure` array.
///
/// `content_file` only exists between parsing and loading: the loader
/// replaces it with the referenced file's text. `content_ref` survives until
/// materialization and is read then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStructureItem {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_ref: Option<String>,
}

impl ProjectStructureItem {
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::File,
            path: path.into(),
            content: Some(content.into()),
            content_file: None,
            content_ref: None,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Directory,
            path: path.into(),
            content: None,
            content_file: None,
            content_ref: None,
        }
    }

    pub fn with_content_ref(mut self, reference: impl Into<String>) -> Self {
        self.content_ref = Some(reference.into());
        self
    }

    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }
}

// ── Project kinds ────────────────────────────────────────────────────────────

/// Built-in template families, each stored as `${SCHEMAS_DIR}/{kind}.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    White,
    Gray,
    Dark,
    App,
}

impl ProjectKind {
    pub const ALL: [ProjectKind; 4] = [Self::White, Self::Gray, Self::Dark, Self::App];

    /// Components created side by side by a multi-component scaffold.
    pub const COMPONENTS: [ProjectKind; 3] = [Self::White, Self::Gray, Self::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Gray => "gray",
            Self::Dark => "dark",
            Self::App => "app",
        }
    }

    pub fn template_file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(Self::White),
            "gray" | "grey" => Ok(Self::Gray),
            "dark" => Ok(Self::Dark),
            "app" => Ok(Self::App),
            _ => Err(DomainError::UnknownProjectKind(s.to_string())),
        }
    }
}

// ── Nested content ───────────────────────────────────────────────────────────

/// How file content that is itself a path to another file is detected.
///
/// `Explicit` only honors `contentRef`. `Heuristic` additionally treats a
/// resolved single-line content that looks like a path (absolute, or
/// containing one of `markers`) and names an existing file as a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedContentPolicy {
    Explicit,
    Heuristic { markers: Vec<String> },
}

impl Default for NestedContentPolicy {
    fn default() -> Self {
        Self::Heuristic {
            markers: Vec::new(),
        }
    }
}

impl NestedContentPolicy {
    /// Candidate path for a heuristic lookup, or `None` when the content
    /// cannot be a reference under this policy.
    pub fn candidate<'a>(&self, content: &'a str) -> Option<&'a str> {
        let Self::Heuristic { markers } = self else {
            return None;
        };
        let trimmed = content.trim();
        if trimmed.is_empty() || trimmed.contains('\n') {
            return None;
        }
        let looks_absolute = Path::new(trimmed).is_absolute() || trimmed.starts_with('/');
        let has_marker = markers
            .iter()
            .any(|m| !m.is_empty() && trimmed.contains(m.as_str()));
        (looks_absolute || has_marker).then_some(trimmed)
    }
}
