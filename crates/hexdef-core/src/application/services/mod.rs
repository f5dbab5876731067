//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "add a port".

pub mod adapter_service;
pub mod build_service;
pub mod datagram_service;
pub mod port_service;
pub mod scaffold_service;

pub use adapter_service::{AdapterRequest, AdapterService};
pub use build_service::{BuildReport, BuildService, BuildStep};
pub use datagram_service::{DatagramCreation, DatagramRegistry, DatagramService};
pub use port_service::{ModelDirectory, ModelHeader, PortRequest, PortService};
pub use scaffold_service::{
    ExistingRoot, MultiScaffoldReport, ScaffoldReport, ScaffoldRequest, ScaffoldService,
    scaffold_variables,
};
