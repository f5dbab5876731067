// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for hexdef.
//!
//! Pure logic only: variable resolution, template documents, the C++ model
//! header classifier, port/adapter code generation, datagram registry
//! documents and the project layout conventions. All I/O goes through the
//! ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process or environment access
//! - **Few crates**: std + thiserror, regex for token patterns, serde for documents
//! - **Immutable inputs**: templates and parsed models are never mutated in place
//!
pub mod codegen;
pub mod config;
pub mod cpp;
pub mod datagram;
pub mod entities;
pub mod error;
pub mod layout;
pub mod variables;

mod validation;

// Re-exports for convenience
pub use codegen::{AdapterSpec, PortMethod, PortSpec, generate_adapter, generate_port, method_catalog};
pub use config::HexConfig;
pub use cpp::{ModelAttribute, find_id_attribute, is_searchable_type, parse_attributes};
pub use datagram::{DatagramEntry, DatagramKind};
pub use entities::{
    DirectoryToCreate, FileToWrite, FsEntry, ItemKind, NestedContentPolicy, ProjectKind,
    ProjectStructure, ProjectStructureItem, ProjectTemplate, RelativePath,
};
pub use error::{DomainError, ErrorCategory};
pub use layout::{Direction, Marker};
pub use validation::DomainValidator;
pub use variables::{TokenSyntax, Variables, resolve};
