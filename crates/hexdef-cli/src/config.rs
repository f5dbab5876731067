//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`HexConfig`] built
//! from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `HEXDEF_*` environment variables (`HEXDEF_SEARCH__MARKER_DEPTH=20`)
//! 3. Config file (`--config FILE`, else [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)
//!
//! [`HexConfig`]: hexdef_core::domain::HexConfig

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use hexdef_core::domain::{
    NestedContentPolicy,
    layout::{MARKER_SEARCH_DEPTH, REGISTRY_SEARCH_DEPTH},
};

use crate::error::{CliError, CliResult};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Scaffolding behaviour.
    pub scaffold: ScaffoldConfig,
    /// Upward/downward search limits.
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    /// `heuristic` (inline file content naming a schemas file is replaced
    /// by that file) or `explicit` (only `contentRef` is followed).
    pub nested_content: String,
    /// Kind used by `hexdef new` when neither `--kind` nor `--template` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub marker_depth: usize,
    pub registry_depth: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                no_color: false,
                format: "human".into(),
            },
            scaffold: ScaffoldConfig {
                nested_content: "heuristic".into(),
                default_kind: None,
            },
            search: SearchConfig {
                marker_depth: MARKER_SEARCH_DEPTH,
                registry_depth: REGISTRY_SEARCH_DEPTH,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `HEXDEF_*`.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        let (path, required) = match config_file {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, Environment::with_prefix("HEXDEF"))
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;

        let cfg = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_error)?
            .try_deserialize::<Self>()
            .map_err(config_error)?;

        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> CliResult<()> {
        self.nested_content_policy(None)?;
        if self.search.marker_depth == 0 || self.search.registry_depth == 0 {
            return Err(CliError::ConfigError {
                message: "search depths must be at least 1".into(),
                source: None,
            });
        }
        Ok(())
    }

    /// Nested-content policy; heuristic markers come from `SCHEMAS_DIR`.
    pub fn nested_content_policy(&self, schemas_dir: Option<&Path>) -> CliResult<NestedContentPolicy> {
        match self.scaffold.nested_content.to_ascii_lowercase().as_str() {
            "explicit" => Ok(NestedContentPolicy::Explicit),
            "heuristic" => Ok(NestedContentPolicy::Heuristic {
                markers: schemas_dir
                    .map(|d| vec![d.to_string_lossy().into_owned()])
                    .unwrap_or_default(),
            }),
            other => Err(CliError::ConfigError {
                message: format!(
                    "scaffold.nested_content must be 'heuristic' or 'explicit', got '{other}'"
                ),
                source: None,
            }),
        }
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.hexdef.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "hexdef", "hexdef")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".hexdef.toml"))
    }

    /// Look up a dotted key for `hexdef config get`.
    pub fn get(&self, key: &str) -> CliResult<String> {
        match key {
            "output.no_color" => Ok(self.output.no_color.to_string()),
            "output.format" => Ok(self.output.format.clone()),
            "scaffold.nested_content" => Ok(self.scaffold.nested_content.clone()),
            "scaffold.default_kind" => Ok(self.scaffold.default_kind.clone().unwrap_or_default()),
            "search.marker_depth" => Ok(self.search.marker_depth.to_string()),
            "search.registry_depth" => Ok(self.search.registry_depth.to_string()),
            _ => Err(CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            }),
        }
    }

    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn config_error(e: ::config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}
