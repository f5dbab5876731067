//! Adapter skeleton generation.

use crate::domain::layout::Direction;

/// Technologies offered when no explicit one is given.
pub const KNOWN_TECHNOLOGIES: [&str; 4] = ["ZeroMQ", "RabbitMQ", "Kafka", "REST"];

/// Selectable technologies: the known ones plus the configured middleware
/// when it is not already listed.
pub fn technology_options(middleware: &str) -> Vec<String> {
    let mut options: Vec<String> = KNOWN_TECHNOLOGIES.iter().map(|s| s.to_string()).collect();
    if !middleware.is_empty() && !options.iter().any(|o| o == middleware) {
        options.push(middleware.to_string());
    }
    options
}

/// `ZeroMQ` → `Zeromq`
pub fn technology_pascal(technology: &str) -> String {
    let lower = technology.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Directory name for a technology (`RabbitMQ` → `rabbitmq`).
pub fn technology_dir(technology: &str) -> String {
    technology.to_lowercase()
}

/// Model name from a port file stem (`IOrderOutgoingPort` → `Order`).
///
/// Stems that do not follow the naming convention are returned unchanged.
pub fn model_name_from_port(stem: &str) -> String {
    stem.strip_prefix('I')
        .and_then(|rest| {
            rest.strip_suffix("IncomingPort")
                .or_else(|| rest.strip_suffix("OutgoingPort"))
        })
        .filter(|model| !model.is_empty())
        .unwrap_or(stem)
        .to_string()
}

/// `{Model}{Tech}{Incoming|Outgoing}Adapter`
pub fn adapter_class_name(model_name: &str, technology: &str, direction: Direction) -> String {
    format!(
        "{}{}{}Adapter",
        model_name,
        technology_pascal(technology),
        direction.title()
    )
}

/// Inputs for [`generate_adapter`].
#[derive(Debug, Clone)]
pub struct AdapterSpec<'a> {
    pub namespace: &'a str,
    pub class_name: &'a str,
    pub model_name: &'a str,
    pub relative_port_path: &'a str,
    pub technology: &'a str,
    pub direction: Direction,
}

/// Render an adapter header.
///
/// Outgoing adapters derive from the outgoing port and override `send`.
/// Incoming adapters hold the incoming port and drive it from
/// `startListening`.
pub fn generate_adapter(spec: &AdapterSpec<'_>) -> String {
    match spec.direction {
        Direction::Outgoing => outgoing(spec),
        Direction::Incoming => incoming(spec),
    }
}

fn outgoing(spec: &AdapterSpec<'_>) -> String {
    let AdapterSpec {
        namespace,
        class_name,
        model_name,
        relative_port_path,
        technology,
        ..
    } = *spec;
    format!(
        r#"#pragma once

#include "{relative_port_path}"
#include <iostream>

namespace {namespace} {{

class {class_name} : public domain::ports::outgoing::I{model_name}OutgoingPort {{
public:
    virtual ~{class_name}() = default;

    void send(const domain::model::{model_name}& data) override {{
        // TODO: Implement {technology} sending logic
        std::cout << "[{technology}] Adapter sending {model_name}..." << std::endl;
    }}
}};

}} // namespace {namespace}
"#
    )
}

fn incoming(spec: &AdapterSpec<'_>) -> String {
    let AdapterSpec {
        namespace,
        class_name,
        model_name,
        relative_port_path,
        technology,
        ..
    } = *spec;
    let port = format!("domain::ports::incoming::I{model_name}IncomingPort");
    format!(
        r#"#pragma once

#include "{relative_port_path}"
#include <iostream>
#include <memory>

namespace {namespace} {{

class {class_name} {{
private:
    {port}& port;

public:
    explicit {class_name}({port}& port)
        : port(port) {{}}

    virtual ~{class_name}() = default;

    void startListening() {{
        // TODO: Implement {technology} listening logic
        std::cout << "[{technology}] Adapter started listening for {model_name}..." << std::endl;
    }}
}};

}} // namespace {namespace}
"#
    )
}
