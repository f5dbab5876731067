//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `hexdef-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateLoader`: Template document loading
//!   - `ProcessRunner`: External tool execution
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The services in `crate::application::services`, driven by the CLI)

pub mod output;

pub use output::{Filesystem, ProcessOutput, ProcessRunner, TemplateLoader};

#[cfg(test)]
pub use output::MockProcessRunner;
