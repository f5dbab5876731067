//! Application layer for hexdef.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (scaffold, ports, adapters, datagrams, build)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Locate**: Upward/downward convention discovery over the `Filesystem` port
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod locate;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AdapterRequest, AdapterService, BuildReport, BuildService, BuildStep, DatagramCreation,
    DatagramRegistry, DatagramService, ExistingRoot, ModelDirectory, ModelHeader,
    MultiScaffoldReport, PortRequest, PortService, ScaffoldReport, ScaffoldRequest,
    ScaffoldService, scaffold_variables,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, ProcessOutput, ProcessRunner, TemplateLoader};

pub use error::ApplicationError;
