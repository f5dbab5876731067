//! Infrastructure adapters for hexdef.
//!
//! This crate implements the ports defined in `hexdef-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod process;
pub mod template_loader;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::CommandRunner;
pub use template_loader::JsonTemplateLoader;
