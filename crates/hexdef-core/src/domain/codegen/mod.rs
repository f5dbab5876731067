//! C++ source generation for ports and adapters.
//!
//! Generators are pure: they take parsed model data and naming inputs and
//! return header text. Locating directories and writing files is the job of
//! the application services.

pub mod adapter;
pub mod port;

pub use adapter::{
    AdapterSpec, KNOWN_TECHNOLOGIES, adapter_class_name, generate_adapter, model_name_from_port,
    technology_dir, technology_options, technology_pascal,
};
pub use port::{PortMethod, PortSpec, generate_port, method_catalog, port_class_name};
