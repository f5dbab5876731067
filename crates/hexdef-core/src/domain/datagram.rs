//! Datagram registry documents.
//!
//! A registry is a tiny XML file listing the datagrams a component publishes
//! or subscribes to:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <datagrams>
//!   <datagram name="OrderCreated" type="pub"/>
//!   <datagram name="StockLevel" type="pubsub"/>
//! </datagrams>
//! ```
//!
//! Reading is pattern-based and forgiving; writing always regenerates the
//! whole document.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<datagram\s+name="([^"]*)"\s+type="([^"]*)"\s*/>"#)
        .expect("valid datagram entry pattern")
});

static DATAGRAM_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid name pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatagramEntry {
    pub name: String,
    #[serde(rename = "pub")]
    pub publish: bool,
    #[serde(rename = "sub")]
    pub subscribe: bool,
}

impl DatagramEntry {
    pub fn new(name: impl Into<String>, publish: bool, subscribe: bool) -> Self {
        Self {
            name: name.into(),
            publish,
            subscribe,
        }
    }

    pub fn kind(&self) -> Option<DatagramKind> {
        DatagramKind::from_flags(self.publish, self.subscribe)
    }
}

/// The `type` attribute of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatagramKind {
    Pub,
    Sub,
    PubSub,
}

impl DatagramKind {
    pub fn from_flags(publish: bool, subscribe: bool) -> Option<Self> {
        match (publish, subscribe) {
            (true, true) => Some(Self::PubSub),
            (true, false) => Some(Self::Pub),
            (false, true) => Some(Self::Sub),
            (false, false) => None,
        }
    }

    pub fn flags(&self) -> (bool, bool) {
        match self {
            Self::Pub => (true, false),
            Self::Sub => (false, true),
            Self::PubSub => (true, true),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pub => "pub",
            Self::Sub => "sub",
            Self::PubSub => "pubsub",
        }
    }
}

impl fmt::Display for DatagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatagramKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pub" => Ok(Self::Pub),
            "sub" => Ok(Self::Sub),
            "pubsub" => Ok(Self::PubSub),
            _ => Err(()),
        }
    }
}

/// Extract entries from registry text. Unknown `type` values are skipped.
pub fn parse_registry(xml: &str) -> Vec<DatagramEntry> {
    ENTRY
        .captures_iter(xml)
        .filter_map(|caps| {
            let kind: DatagramKind = caps[2].parse().ok()?;
            let (publish, subscribe) = kind.flags();
            Some(DatagramEntry::new(unescape(&caps[1]), publish, subscribe))
        })
        .collect()
}

/// Render a complete registry document. Entries with neither flag are dropped.
pub fn render_registry(entries: &[DatagramEntry]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<datagrams>\n");
    for entry in entries {
        if let Some(kind) = entry.kind() {
            xml.push_str(&format!(
                "  <datagram name=\"{}\" type=\"{}\"/>\n",
                escape(&entry.name),
                kind
            ));
        }
    }
    xml.push_str("</datagrams>\n");
    xml
}

/// Names from `candidates` that are not already selected, order preserved.
pub fn exclude_selected(candidates: Vec<String>, selected: &[DatagramEntry]) -> Vec<String> {
    let taken: HashSet<&str> = selected.iter().map(|e| e.name.as_str()).collect();
    candidates
        .into_iter()
        .filter(|name| !taken.contains(name.as_str()))
        .collect()
}

/// Insert or update an entry by name, keeping the position of an existing one.
pub fn upsert(entries: &mut Vec<DatagramEntry>, entry: DatagramEntry) {
    match entries.iter_mut().find(|e| e.name == entry.name) {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
}

/// Remove an entry by name; returns whether anything was removed.
pub fn remove(entries: &mut Vec<DatagramEntry>, name: &str) -> bool {
    let before = entries.len();
    entries.retain(|e| e.name != name);
    entries.len() != before
}

pub fn validate_datagram_name(name: &str) -> Result<(), DomainError> {
    if DATAGRAM_NAME.is_match(name) {
        Ok(())
    } else {
        Err(DomainError::InvalidName {
            kind: "datagram",
            name: name.to_string(),
            reason: "must match [A-Za-z_][A-Za-z0-9_]*".into(),
        })
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn unescape(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fixed_layout() {
        let xml = render_registry(&[
            DatagramEntry::new("A", true, false),
            DatagramEntry::new("B", false, false),
            DatagramEntry::new("C", true, true),
        ]);
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<datagrams>\n  <datagram name=\"A\" type=\"pub\"/>\n  <datagram name=\"C\" type=\"pubsub\"/>\n</datagrams>\n"
        );
    }

    #[test]
    fn save_then_parse_drops_flagless_entries() {
        let entries = vec![
            DatagramEntry::new("OrderCreated", true, false),
            DatagramEntry::new("Unused", false, false),
            DatagramEntry::new("StockLevel", false, true),
            DatagramEntry::new("Heartbeat", true, true),
        ];
        let expected: Vec<_> = entries.iter().filter(|e| e.kind().is_some()).cloned().collect();
        assert_eq!(parse_registry(&render_registry(&entries)), expected);
    }

    #[test]
    fn parse_skips_unknown_types_and_tolerates_layout() {
        let xml = r#"<datagrams><datagram   name="A" type="pub" /><datagram name="B" type="both"/>
            <datagram name="C"
                      type="sub"/></datagrams>"#;
        assert_eq!(
            parse_registry(xml),
            vec![
                DatagramEntry::new("A", true, false),
                DatagramEntry::new("C", false, true)
            ]
        );
        assert!(parse_registry("not xml at all").is_empty());
    }

    #[test]
    fn names_are_escaped_and_restored() {
        let entries = vec![DatagramEntry::new("a&\"b\"", true, false)];
        let xml = render_registry(&entries);
        assert!(xml.contains("name=\"a&amp;&quot;b&quot;\""));
        assert_eq!(parse_registry(&xml), entries);
    }

    #[test]
    fn available_excludes_selected() {
        let selected = vec![DatagramEntry::new("B", true, false)];
        assert_eq!(
            exclude_selected(vec!["A".into(), "B".into(), "C".into()], &selected),
            vec!["A".to_string(), "C".to_string()]
        );
    }

    #[test]
    fn upsert_and_remove() {
        let mut entries = vec![DatagramEntry::new("A", true, false)];
        upsert(&mut entries, DatagramEntry::new("A", true, true));
        upsert(&mut entries, DatagramEntry::new("B", false, true));
        assert_eq!(entries[0], DatagramEntry::new("A", true, true));
        assert_eq!(entries.len(), 2);
        assert!(remove(&mut entries, "A"));
        assert!(!remove(&mut entries, "A"));
    }

    #[test]
    fn datagram_names() {
        assert!(validate_datagram_name("Order_Created2").is_ok());
        assert!(validate_datagram_name("_x").is_ok());
        assert!(validate_datagram_name("2fast").is_err());
        assert!(validate_datagram_name("with-dash").is_err());
        assert!(validate_datagram_name("").is_err());
    }

    #[test]
    fn entries_serialize_with_short_flag_names() {
        let json = serde_json::to_string(&DatagramEntry::new("A", true, false)).unwrap();
        assert_eq!(json, r#"{"name":"A","pub":true,"sub":false}"#);
    }
}
