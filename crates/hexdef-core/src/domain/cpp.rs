//! C++ model header parsing.
//!
//! This is deliberately not a C++ parser. Model headers in a hexdef project
//! follow a narrow shape (one class, plain private fields), so extraction is
//! a line classifier plus a tiny declaration tokenizer:
//!
//! ```text
//! line ──► strip `//` comment ──► classify
//!            ├─ Access(private|public|protected) → toggle state
//!            ├─ Blank                             → skip
//!            └─ Statement(text)  (only while private)
//!                 ├─ must end with ';'
//!                 ├─ drop initializer (`= …` / `{…}`)
//!                 ├─ split TYPE NAME
//!                 └─ strip static/const/mutable from TYPE
//! ```
//!
//! Anything that does not fit is skipped silently; each skip rule is a named
//! predicate below so it can be tested on its own.

use serde::{Deserialize, Serialize};

/// One private field of a parsed model class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelAttribute {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

impl ModelAttribute {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }

    /// Name with the first character upper-cased (`orderId` → `OrderId`).
    pub fn capitalized_name(&self) -> String {
        capitalize(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Private,
    Public,
    Protected,
}

/// Classification of a single header line after comment stripping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Access(Access),
    Statement(&'a str),
}

// ── Line classifier ──────────────────────────────────────────────────────────

/// Remove a trailing `//` comment.
pub fn strip_line_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

pub fn classify_line(raw: &str) -> LineKind<'_> {
    let line = strip_line_comment(raw).trim();
    match line {
        "" => LineKind::Blank,
        "private:" => LineKind::Access(Access::Private),
        "public:" => LineKind::Access(Access::Public),
        "protected:" => LineKind::Access(Access::Protected),
        other => LineKind::Statement(other),
    }
}

// ── Declaration tokenizer ────────────────────────────────────────────────────

const QUALIFIERS: [&str; 3] = ["static", "const", "mutable"];

/// `true` when the statement is terminated by `;`.
pub fn is_terminated(statement: &str) -> bool {
    statement.ends_with(';')
}

/// Cut everything from the first `=` or `{` up to the terminating `;`.
///
/// `int count = 0;` → `int count;`, `std::vector<int> v{1, 2};` → `std::vector<int> v;`
pub fn strip_initializer(statement: &str) -> String {
    match statement.find(['=', '{']) {
        Some(idx) => format!("{};", statement[..idx].trim_end()),
        None => statement.to_string(),
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split `TYPE NAME;` into its parts.
///
/// `NAME` is the trailing run of identifier characters right before `;` and
/// must be preceded by whitespace. Function declarations (`)` before `;`),
/// arrays and `Foo *p;` style pointers therefore never split.
pub fn split_declaration(statement: &str) -> Option<(&str, &str)> {
    let body = statement.strip_suffix(';')?;
    let name_start = body
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_ident_char(*c))
        .last()
        .map(|(i, _)| i)?;
    let name = &body[name_start..];
    let before = &body[..name_start];
    if !before.ends_with(char::is_whitespace) {
        return None;
    }
    let ty = before.trim();
    if ty.is_empty() {
        return None;
    }
    Some((ty, name))
}

/// Multi-variable declarations and template types with several arguments
/// both leave a comma in the type text.
pub fn is_multi_declaration(ty: &str) -> bool {
    ty.contains(',')
}

/// Drop leading storage/cv qualifiers (`static const int` → `int`).
pub fn strip_qualifiers(ty: &str) -> &str {
    let mut rest = ty.trim_start();
    loop {
        let stripped = QUALIFIERS.iter().find_map(|q| {
            rest.strip_prefix(q)
                .filter(|tail| tail.starts_with(char::is_whitespace))
        });
        match stripped {
            Some(tail) => rest = tail.trim_start(),
            None => return rest,
        }
    }
}

/// Parse one private-section statement into an attribute.
pub fn parse_declaration(statement: &str) -> Option<ModelAttribute> {
    if !is_terminated(statement) {
        return None;
    }
    let cleaned = strip_initializer(statement);
    let (ty, name) = split_declaration(&cleaned)?;
    if is_multi_declaration(ty) {
        return None;
    }
    let ty = strip_qualifiers(ty);
    if ty.is_empty() {
        return None;
    }
    Some(ModelAttribute::new(ty, name))
}

// ── Public operations ────────────────────────────────────────────────────────

/// Extract private field declarations, in declaration order.
pub fn parse_attributes(header: &str) -> Vec<ModelAttribute> {
    let mut in_private = false;
    let mut attributes = Vec::new();

    for raw in header.lines() {
        match classify_line(raw) {
            LineKind::Access(access) => in_private = access == Access::Private,
            LineKind::Blank => {}
            LineKind::Statement(statement) if in_private => {
                if let Some(attribute) = parse_declaration(statement) {
                    attributes.push(attribute);
                }
            }
            LineKind::Statement(_) => {}
        }
    }

    attributes
}

/// Pick the attribute that identifies a model instance.
///
/// Priority (case-insensitive), first match in declaration order per rule:
/// `id`, `{model}id`, `{model}_id`, `uuid`, `*id`, `code`, `number`,
/// `*number`. Falls back to `int id`, which may not exist on the model.
pub fn find_id_attribute(attributes: &[ModelAttribute], model_name: &str) -> ModelAttribute {
    let model = model_name.to_lowercase();
    let exact = |target: String| move |name: &str| name == target;

    let rules: [Box<dyn Fn(&str) -> bool>; 8] = [
        Box::new(exact("id".into())),
        Box::new(exact(format!("{model}id"))),
        Box::new(exact(format!("{model}_id"))),
        Box::new(exact("uuid".into())),
        Box::new(|name: &str| name.ends_with("id")),
        Box::new(exact("code".into())),
        Box::new(exact("number".into())),
        Box::new(|name: &str| name.ends_with("number")),
    ];

    rules
        .iter()
        .find_map(|rule| {
            attributes
                .iter()
                .find(|a| rule(&a.name.to_lowercase()))
                .cloned()
        })
        .unwrap_or_else(|| ModelAttribute::new("int", "id"))
}

/// Types that get a generated `getBy…`/`findBy…` finder.
pub fn is_searchable_type(ty: &str) -> bool {
    let lower = ty.trim().to_lowercase();
    matches!(
        lower.as_str(),
        "int" | "long" | "double" | "float" | "bool" | "std::string" | "string" | "char" | "short"
    ) || lower.contains("unsigned")
}

/// First character upper-cased, rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First character lower-cased, rest untouched (`Order` → `order`).
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_HPP: &str = r#"#pragma once

#include <string>

namespace shop {
namespace domain {
namespace model {

    class Order {
    private:
        std::string orderId;
        double totalAmount;
        int itemCount;

    public:
        Order(const std::string& orderId, double totalAmount, int itemCount);
        virtual ~Order();
        std::string getOrderId() const;
    };

}
}
}
"#;

    #[test]
    fn parses_simple_private_section() {
        let attrs = parse_attributes("private: \n int id;\n std::string name;\npublic:\n void f();");
        assert_eq!(
            attrs,
            vec![
                ModelAttribute::new("int", "id"),
                ModelAttribute::new("std::string", "name"),
            ]
        );
    }

    #[test]
    fn parses_model_header() {
        let attrs = parse_attributes(ORDER_HPP);
        let names: Vec<_> = attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["orderId", "totalAmount", "itemCount"]);
        assert_eq!(attrs[1].ty, "double");
    }

    #[test]
    fn ignores_fields_outside_private_sections() {
        let header = "class A {\n  int hidden;\npublic:\n  int visible;\nprotected:\n  int p;\n};";
        assert!(parse_attributes(header).is_empty());
    }

    #[test]
    fn strips_comments_and_initializers() {
        let header = "private:\n  int count = 0; // running total\n  std::vector<int> ids{1};\n  // int commented;\n  bool flag{false};";
        assert_eq!(
            parse_attributes(header),
            vec![
                ModelAttribute::new("int", "count"),
                ModelAttribute::new("std::vector<int>", "ids"),
                ModelAttribute::new("bool", "flag"),
            ]
        );
    }

    #[test]
    fn strips_leading_qualifiers() {
        let header = "private:\n static const int max;\n mutable std::string cache;\n const_iterator it;";
        assert_eq!(
            parse_attributes(header),
            vec![
                ModelAttribute::new("int", "max"),
                ModelAttribute::new("std::string", "cache"),
                ModelAttribute::new("const_iterator", "it"),
            ]
        );
    }

    #[test]
    fn skips_unsupported_shapes() {
        let header = "private:\n int a, b;\n std::map<int, std::string> m;\n void helper();\n int arr[4];\n Foo *p;\n int noSemicolon\n unsigned long long big;";
        assert_eq!(
            parse_attributes(header),
            vec![ModelAttribute::new("unsigned long long", "big")]
        );
    }

    #[test]
    fn access_labels_must_stand_alone() {
        assert_eq!(classify_line("  private:  // fields"), LineKind::Access(Access::Private));
        assert_eq!(classify_line("private: int x;"), LineKind::Statement("private: int x;"));
        assert_eq!(classify_line("   "), LineKind::Blank);
    }

    #[test]
    fn split_declaration_requires_whitespace_before_name() {
        assert_eq!(split_declaration("Foo* p;"), Some(("Foo*", "p")));
        assert_eq!(split_declaration("Foo *p;"), None);
        assert_eq!(split_declaration("x;"), None);
        assert_eq!(split_declaration("int f();"), None);
    }

    #[test]
    fn id_attribute_priority() {
        let attrs = vec![
            ModelAttribute::new("std::string", "uuid"),
            ModelAttribute::new("long", "orderId"),
        ];
        assert_eq!(find_id_attribute(&attrs, "Order").name, "orderId");

        let attrs = vec![
            ModelAttribute::new("std::string", "code"),
            ModelAttribute::new("int", "ID"),
        ];
        assert_eq!(find_id_attribute(&attrs, "Item").name, "ID");

        let attrs = vec![
            ModelAttribute::new("std::string", "uuid"),
            ModelAttribute::new("std::string", "parentId"),
        ];
        assert_eq!(find_id_attribute(&attrs, "Node").name, "uuid");

        let attrs = vec![
            ModelAttribute::new("int", "serialNumber"),
            ModelAttribute::new("int", "code"),
        ];
        assert_eq!(find_id_attribute(&attrs, "Part").name, "code");

        let attrs = vec![ModelAttribute::new("int", "invoiceNumber")];
        assert_eq!(find_id_attribute(&attrs, "Invoice").name, "invoiceNumber");
    }

    #[test]
    fn id_attribute_fallback() {
        let attrs = vec![ModelAttribute::new("double", "price")];
        assert_eq!(
            find_id_attribute(&attrs, "Product"),
            ModelAttribute::new("int", "id")
        );
    }

    #[test]
    fn searchable_types() {
        for ty in ["int", "LONG", "std::string", "string", "unsigned int", "bool", "char"] {
            assert!(is_searchable_type(ty), "{ty}");
        }
        for ty in ["std::vector<int>", "Money", "std::optional<int>"] {
            assert!(!is_searchable_type(ty), "{ty}");
        }
    }

    #[test]
    fn capitalization_helpers() {
        assert_eq!(capitalize("orderId"), "OrderId");
        assert_eq!(decapitalize("Order"), "order");
        assert_eq!(capitalize(""), "");
    }
}
