pub mod common;
pub mod project_structure;
pub mod template;

pub use crate::domain::DomainError;
pub use common::RelativePath;
pub use project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure};
pub use template::{
    ItemKind, NestedContentPolicy, ProjectKind, ProjectStructureItem, ProjectTemplate,
};
