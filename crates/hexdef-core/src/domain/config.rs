//! Explicit run configuration.
//!
//! Built once at the process boundary (from the environment snapshot, the
//! `hex.cfg` overlay and the CLI settings) and passed to every service.
//! Nothing below the CLI reads environment variables.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::entities::NestedContentPolicy;
use crate::domain::layout::{MARKER_SEARCH_DEPTH, REGISTRY_SEARCH_DEPTH};
use crate::domain::variables::Variables;

pub const DEFAULT_MIDDLEWARE: &str = "Kafka";
pub const DEFAULT_DATABASE: &str = "postgres";
pub const MULTI_SCAFFOLD_DATABASE: &str = "TEST_DB";
pub const DEFAULT_DATAGRAM_SAVE_DIR: &str = "adapters/common";
pub const DEFAULT_NEW_DATAGRAM_TARGET: &str = "new_datagram";
pub const DEFAULT_DATAGRAM_DESCRIPTION: &str = "datagram";

/// Environment keys understood by [`HexConfig::from_env`].
pub mod keys {
    pub const SCHEMAS_DIR: &str = "SCHEMAS_DIR";
    pub const MW_NAME: &str = "MW_NAME";
    pub const DB: &str = "DB";
    pub const DATAGRAM_DIR_PATH: &str = "DATAGRAM_DIR_PATH";
    pub const DATAGRAM_SAVE_DIR: &str = "DATAGRAM_SAVE_DIR";
    pub const NEW_DATAGRAM_TARGET_NAME: &str = "NEW_DATAGRAM_TARGET_NAME";
    pub const PROJECT_NAME: &str = "PROJECT_NAME";
    pub const PROGRAM_DATAGRAM_DESCRIPTION: &str = "PROGRAM_DATAGRAM_DESCRIPTION";
    pub const DATAGRAM: &str = "DATAGRAM";
    pub const DATAGRAM_DESCRIPTION: &str = "DATAGRAM_DESCRIPTION";
    pub const DATAGRAM_NAME: &str = "DATAGRAM_NAME";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexConfig {
    pub schemas_dir: Option<PathBuf>,
    pub middleware: String,
    pub database: Option<String>,
    pub datagram_dir: Option<PathBuf>,
    pub datagram_save_dir: String,
    pub new_datagram_target_name: String,
    pub datagram_template: Option<PathBuf>,
    pub datagram_description: String,
    pub program_datagram_description: Option<String>,
    pub project_name: Option<String>,
    pub nested_content: NestedContentPolicy,
    pub marker_search_depth: usize,
    pub registry_search_depth: usize,
}

impl Default for HexConfig {
    fn default() -> Self {
        Self {
            schemas_dir: None,
            middleware: DEFAULT_MIDDLEWARE.into(),
            database: None,
            datagram_dir: None,
            datagram_save_dir: DEFAULT_DATAGRAM_SAVE_DIR.into(),
            new_datagram_target_name: DEFAULT_NEW_DATAGRAM_TARGET.into(),
            datagram_template: None,
            datagram_description: DEFAULT_DATAGRAM_DESCRIPTION.into(),
            program_datagram_description: None,
            project_name: None,
            nested_content: NestedContentPolicy::default(),
            marker_search_depth: MARKER_SEARCH_DEPTH,
            registry_search_depth: REGISTRY_SEARCH_DEPTH,
        }
    }
}

impl HexConfig {
    /// Build from an environment snapshot. Empty values count as unset.
    pub fn from_env<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env: BTreeMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        let get = |key: &str| env.get(key).cloned();

        let defaults = Self::default();
        let schemas_dir = get(keys::SCHEMAS_DIR).map(PathBuf::from);
        let nested_content = match &schemas_dir {
            Some(dir) => NestedContentPolicy::Heuristic {
                markers: vec![dir.to_string_lossy().into_owned()],
            },
            None => defaults.nested_content.clone(),
        };

        Self {
            schemas_dir,
            middleware: get(keys::MW_NAME).unwrap_or(defaults.middleware),
            database: get(keys::DB),
            datagram_dir: get(keys::DATAGRAM_DIR_PATH).map(PathBuf::from),
            datagram_save_dir: get(keys::DATAGRAM_SAVE_DIR).unwrap_or(defaults.datagram_save_dir),
            new_datagram_target_name: get(keys::NEW_DATAGRAM_TARGET_NAME)
                .unwrap_or(defaults.new_datagram_target_name),
            datagram_template: get(keys::DATAGRAM).map(PathBuf::from),
            datagram_description: get(keys::DATAGRAM_DESCRIPTION)
                .unwrap_or(defaults.datagram_description),
            program_datagram_description: get(keys::PROGRAM_DATAGRAM_DESCRIPTION),
            project_name: get(keys::PROJECT_NAME),
            nested_content,
            ..defaults
        }
    }

    pub fn with_schemas_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.schemas_dir = Some(dir.into());
        self
    }

    pub fn with_datagram_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.datagram_dir = Some(dir.into());
        self
    }

    pub fn with_middleware(mut self, mw: impl Into<String>) -> Self {
        self.middleware = mw.into();
        self
    }

    pub fn with_nested_content(mut self, policy: NestedContentPolicy) -> Self {
        self.nested_content = policy;
        self
    }

    pub fn schemas_dir(&self) -> Option<&Path> {
        self.schemas_dir.as_deref()
    }

    /// Database name, with a call-site specific default.
    pub fn database_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.database.as_deref().unwrap_or(default)
    }

    /// Datagram schema template: `DATAGRAM`, else `${SCHEMAS_DIR}/datagram.xml`.
    pub fn datagram_template_path(&self) -> Option<PathBuf> {
        self.datagram_template
            .clone()
            .or_else(|| self.schemas_dir.as_ref().map(|d| d.join("datagram.xml")))
    }

    /// Variables derived from this configuration, for template resolution.
    pub fn variables(&self) -> Variables {
        let mut vars = Variables::new()
            .with(keys::MW_NAME, &self.middleware)
            .with(keys::DATAGRAM_SAVE_DIR, &self.datagram_save_dir)
            .with(keys::NEW_DATAGRAM_TARGET_NAME, &self.new_datagram_target_name)
            .with(keys::DATAGRAM_DESCRIPTION, &self.datagram_description);
        if let Some(dir) = &self.schemas_dir {
            vars.insert(keys::SCHEMAS_DIR, dir.to_string_lossy());
        }
        if let Some(dir) = &self.datagram_dir {
            vars.insert(keys::DATAGRAM_DIR_PATH, dir.to_string_lossy());
        }
        if let Some(db) = &self.database {
            vars.insert(keys::DB, db);
        }
        if let Some(name) = &self.project_name {
            vars.insert(keys::PROJECT_NAME, name);
        }
        if let Some(desc) = &self.program_datagram_description {
            vars.insert(keys::PROGRAM_DATAGRAM_DESCRIPTION, desc);
        }
        vars
    }
}
