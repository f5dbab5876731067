//! hexdef Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for hexdef, a
//! scaffolding tool for hexagonal-architecture C++ projects. It follows the
//! same architecture it generates.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           hexdef-cli (CLI)              │
//! │     (Builds config, drives services)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  Scaffold · Port · Adapter · Datagram   │
//! │               · Build                   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ Filesystem · TemplateLoader · Process   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   hexdef-adapters (Infrastructure)      │
//! │ LocalFilesystem · JsonTemplateLoader …  │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ Variables · Templates · C++ headers ·   │
//! │ Port/Adapter codegen · Datagrams        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hexdef_core::prelude::*;
//! # fn demo(fs: Box<dyn Filesystem>) -> HexResult<()> {
//! let ports = PortService::new(fs);
//! ports.add_port(&PortRequest {
//!     start: "./src/dark_src".into(),
//!     model: "Order".into(),
//!     direction: Direction::Outgoing,
//!     methods: vec!["save".into(), "findById".into()],
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AdapterRequest, AdapterService, BuildService, DatagramService, ExistingRoot, PortRequest,
        PortService, ScaffoldRequest, ScaffoldService,
        ports::{Filesystem, ProcessOutput, ProcessRunner, TemplateLoader},
    };
    pub use crate::domain::{
        DatagramEntry, Direction, HexConfig, ModelAttribute, NestedContentPolicy, ProjectKind,
        ProjectStructure, ProjectTemplate, Variables,
    };
    pub use crate::error::{HexError, HexResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
