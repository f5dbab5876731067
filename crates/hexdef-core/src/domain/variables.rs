//! Variable substitution.
//!
//! Templates, datagram schemas and content references all carry `${NAME}`
//! tokens. Resolution is a pure string transformation: a token whose name is
//! present in the [`Variables`] map is replaced, anything else is left
//! verbatim so that a later pass (or a human) can still see it.
//!
//! ```text
//! "src/${PROJECT_NAME}/main.cpp"  + { PROJECT_NAME = "shop" }
//!                                 ──► "src/shop/main.cpp"
//! "db: ${DB}"                     + { }
//!                                 ──► "db: ${DB}"
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static BRACED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid braced token pattern"));

static BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([A-Z_][A-Z0-9_]*)").expect("valid bare token pattern"));

/// Which token forms a resolution pass recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenSyntax {
    /// Only `${NAME}`.
    #[default]
    Braced,
    /// `${NAME}` first, then bare `$NAME` (upper-case names only).
    BracedAndBare,
}

/// Name → replacement map used for substitution.
///
/// Backed by a `BTreeMap` so iteration (and therefore any listing of the
/// variables) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: BTreeMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a variable.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert only when the key is not already present.
    pub fn insert_default(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: &Variables) {
        for (k, v) in &other.values {
            self.values.insert(k.clone(), v.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every `${KEY}` whose key is known. Unknown tokens pass through.
    pub fn resolve(&self, text: &str) -> String {
        self.resolve_with(text, TokenSyntax::Braced)
    }

    pub fn resolve_with(&self, text: &str, syntax: TokenSyntax) -> String {
        let braced = self.replace(&BRACED, text);
        match syntax {
            TokenSyntax::Braced => braced,
            TokenSyntax::BracedAndBare => self.replace(&BARE, &braced),
        }
    }

    fn replace(&self, pattern: &Regex, text: &str) -> String {
        // Skip the allocation-heavy path for the common token-free case.
        if !text.contains('$') {
            return text.to_string();
        }
        pattern
            .replace_all(text, |caps: &Captures<'_>| match self.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// Free-function form of [`Variables::resolve`].
pub fn resolve(text: &str, variables: &Variables) -> String {
    variables.resolve(text)
}
