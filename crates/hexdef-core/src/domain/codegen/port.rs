//! Port interface generation.

use std::fmt::Write as _;

use crate::domain::cpp::{ModelAttribute, capitalize, decapitalize, find_id_attribute, is_searchable_type};
use crate::domain::layout::Direction;

/// One selectable method of a port interface.
///
/// `key` is what callers select (`save`, `findById`, `findByTotalAmount`);
/// `declaration` is the rendered pure-virtual declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMethod {
    pub key: String,
    pub declaration: String,
}

/// Inputs for [`generate_port`].
#[derive(Debug, Clone)]
pub struct PortSpec<'a> {
    pub model_name: &'a str,
    pub namespace: &'a str,
    pub model_header_file: &'a str,
    pub direction: Direction,
    pub attributes: &'a [ModelAttribute],
    pub selected: &'a [String],
}

/// `I{Model}{Incoming|Outgoing}Port`
pub fn port_class_name(model_name: &str, direction: Direction) -> String {
    format!("I{}{}Port", model_name, direction.title())
}

/// Every method a port for this model may declare, in emission order.
pub fn method_catalog(
    model_name: &str,
    direction: Direction,
    attributes: &[ModelAttribute],
) -> Vec<PortMethod> {
    let model = format!("model::{model_name}");
    let var = decapitalize(model_name);
    let id = find_id_attribute(attributes, model_name);
    let id_cap = id.capitalized_name();
    let id_param = format!("{} {}", id.ty, id.name);

    let m = |key: &str, declaration: String| PortMethod {
        key: key.to_string(),
        declaration,
    };

    let mut methods = match direction {
        Direction::Incoming => vec![
            m("create", format!("virtual void create(const {model}& {var}) = 0;")),
            m("update", format!("virtual void update(const {model}& {var}) = 0;")),
            m("delete", format!("virtual void deleteBy{id_cap}({id_param}) = 0;")),
            m(
                "getById",
                format!("virtual std::optional<{model}> getBy{id_cap}({id_param}) = 0;"),
            ),
            m("getAll", format!("virtual std::vector<{model}> getAll() = 0;")),
        ],
        Direction::Outgoing => vec![
            m("save", format!("virtual void save(const {model}& {var}) = 0;")),
            m(
                "saveAll",
                format!("virtual void saveAll(const std::vector<{model}>& {var}s) = 0;"),
            ),
            m("delete", format!("virtual void deleteBy{id_cap}({id_param}) = 0;")),
            m("deleteAll", "virtual void deleteAll() = 0;".to_string()),
            m(
                "findById",
                format!("virtual std::optional<{model}> findBy{id_cap}({id_param}) = 0;"),
            ),
            m("findAll", format!("virtual std::vector<{model}> findAll() = 0;")),
            m("exists", format!("virtual bool existsBy{id_cap}({id_param}) = 0;")),
            m("count", "virtual long count() = 0;".to_string()),
        ],
    };

    let prefix = match direction {
        Direction::Incoming => "getBy",
        Direction::Outgoing => "findBy",
    };
    for attr in attributes
        .iter()
        .filter(|a| a.name != id.name && is_searchable_type(&a.ty))
    {
        let name = format!("{prefix}{}", capitalize(&attr.name));
        let declaration = format!(
            "virtual std::vector<{model}> {name}(const {}& {}) = 0;",
            attr.ty, attr.name
        );
        methods.push(PortMethod {
            key: name,
            declaration,
        });
    }

    methods
}

/// Render a port interface header.
///
/// Only catalog keys listed in `selected` are emitted, in catalog order;
/// unknown keys are ignored.
pub fn generate_port(spec: &PortSpec<'_>) -> String {
    let class_name = port_class_name(spec.model_name, spec.direction);
    let dir = spec.direction.as_str();

    let methods: String = method_catalog(spec.model_name, spec.direction, spec.attributes)
        .into_iter()
        .filter(|m| spec.selected.iter().any(|s| s == &m.key))
        .fold(String::new(), |mut out, m| {
            let _ = writeln!(out, "        {}", m.declaration);
            out
        });

    format!(
        r#"#pragma once

#include "domain/model/{header}"
#include <vector>
#include <optional>
#include <string>

namespace {ns} {{
namespace domain {{
namespace ports {{
namespace {dir} {{

    class {class_name} {{
    public:
        virtual ~{class_name}() = default;

{methods}    }};

}} // namespace {dir}
}} // namespace ports
}} // namespace domain
}} // namespace {ns}
"#,
        header = spec.model_header_file,
        ns = spec.namespace,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_attrs() -> Vec<ModelAttribute> {
        vec![
            ModelAttribute::new("std::string", "uuid"),
            ModelAttribute::new("long", "orderId"),
            ModelAttribute::new("double", "totalAmount"),
            ModelAttribute::new("std::vector<Item>", "items"),
        ]
    }

    fn declarations(source: &str) -> Vec<&str> {
        source
            .lines()
            .map(str::trim)
            .filter(|l| l.starts_with("virtual") && l.ends_with("= 0;"))
            .collect()
    }

    #[test]
    fn outgoing_port_emits_exactly_selected_methods() {
        let attrs = order_attrs();
        let selected = vec!["save".to_string(), "findById".to_string()];
        let src = generate_port(&PortSpec {
            model_name: "Order",
            namespace: "shop",
            model_header_file: "Order.h",
            direction: Direction::Outgoing,
            attributes: &attrs,
            selected: &selected,
        });

        assert_eq!(
            declarations(&src),
            vec![
                "virtual void save(const model::Order& order) = 0;",
                "virtual std::optional<model::Order> findByOrderId(long orderId) = 0;",
            ]
        );
        assert!(src.contains("class IOrderOutgoingPort {"));
        assert!(src.contains("virtual ~IOrderOutgoingPort() = default;"));
        assert!(src.contains("#include \"domain/model/Order.h\""));
        assert!(src.contains("namespace outgoing {"));
        assert!(src.ends_with("} // namespace shop\n"));
    }

    #[test]
    fn catalog_order_wins_over_selection_order() {
        let attrs = order_attrs();
        let selected = vec!["getAll".to_string(), "create".to_string(), "bogus".to_string()];
        let src = generate_port(&PortSpec {
            model_name: "Order",
            namespace: "shop",
            model_header_file: "Order.hpp",
            direction: Direction::Incoming,
            attributes: &attrs,
            selected: &selected,
        });
        assert_eq!(
            declarations(&src),
            vec![
                "virtual void create(const model::Order& order) = 0;",
                "virtual std::vector<model::Order> getAll() = 0;",
            ]
        );
    }

    #[test]
    fn attribute_finders_cover_searchable_non_id_fields() {
        let keys: Vec<_> = method_catalog("Order", Direction::Outgoing, &order_attrs())
            .into_iter()
            .map(|m| m.key)
            .collect();
        assert!(keys.contains(&"findByUuid".to_string()));
        assert!(keys.contains(&"findByTotalAmount".to_string()));
        assert!(!keys.contains(&"findByOrderId".to_string()));
        assert!(!keys.contains(&"findByItems".to_string()));
    }

    #[test]
    fn attribute_finder_declaration() {
        let catalog = method_catalog("Order", Direction::Incoming, &order_attrs());
        let finder = catalog
            .iter()
            .find(|m| m.key == "getByTotalAmount")
            .unwrap();
        assert_eq!(
            finder.declaration,
            "virtual std::vector<model::Order> getByTotalAmount(const double& totalAmount) = 0;"
        );
    }

    #[test]
    fn falls_back_to_int_id() {
        let catalog = method_catalog("Tag", Direction::Outgoing, &[]);
        let exists = catalog.iter().find(|m| m.key == "exists").unwrap();
        assert_eq!(exists.declaration, "virtual bool existsById(int id) = 0;");
        assert_eq!(catalog.len(), 8);
    }
}
