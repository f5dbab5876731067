//! Per-invocation run context.
//!
//! Everything the services need from the outside world is gathered here,
//! once: the process environment, the optional `hex.cfg` overlay and the
//! loaded [`AppConfig`]. The result is an explicit [`HexConfig`] plus the
//! base [`Variables`] used for template resolution.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, warn};

use hexdef_adapters::{CommandRunner, JsonTemplateLoader, LocalFilesystem};
use hexdef_core::{
    application::{AdapterService, BuildService, DatagramService, PortService, ScaffoldService},
    domain::{HexConfig, TokenSyntax, Variables, config::keys},
};

use crate::{config::AppConfig, error::CliResult};

/// Relative location of the overlay below `SCHEMAS_DIR`.
const HEX_CFG: [&str; 2] = ["hex.cfg", "config.json"];

pub struct AppContext {
    pub config: AppConfig,
    pub hex: HexConfig,
    /// Environment + overlay + derived config values + `YEAR`.
    pub variables: Variables,
}

impl AppContext {
    /// Build from the current process environment. `schemas_dir` comes from
    /// `--schemas-dir` and replaces `SCHEMAS_DIR`.
    pub fn from_process(config: AppConfig, schemas_dir: Option<&Path>) -> CliResult<Self> {
        let mut env = env_snapshot();
        if let Some(dir) = schemas_dir {
            env.insert(keys::SCHEMAS_DIR.to_string(), dir.to_string_lossy().into_owned());
        }
        Self::build(config, env)
    }

    pub fn build(config: AppConfig, mut env: BTreeMap<String, String>) -> CliResult<Self> {
        if let Some(dir) = env.get(keys::SCHEMAS_DIR).filter(|d| !d.trim().is_empty()) {
            let overlay = read_overlay(&overlay_path(Path::new(dir)), dir);
            env.extend(overlay);
        }

        let mut hex = HexConfig::from_env(env.clone());
        hex.nested_content = config.nested_content_policy(hex.schemas_dir())?;
        hex.marker_search_depth = config.search.marker_depth;
        hex.registry_search_depth = config.search.registry_depth;

        let mut variables: Variables = env.into_iter().collect();
        variables.merge(&hex.variables());
        variables.insert("YEAR", Local::now().format("%Y").to_string());

        Ok(Self {
            config,
            hex,
            variables,
        })
    }

    pub fn scaffold_service(&self) -> ScaffoldService {
        ScaffoldService::new(Box::new(LocalFilesystem::new()), Box::new(JsonTemplateLoader))
            .with_nested_content(self.hex.nested_content.clone())
    }

    pub fn port_service(&self) -> PortService {
        PortService::new(Box::new(LocalFilesystem::new()))
    }

    pub fn adapter_service(&self) -> AdapterService {
        AdapterService::new(Box::new(LocalFilesystem::new()))
            .with_search_depth(self.hex.marker_search_depth)
    }

    pub fn datagram_service(&self) -> DatagramService {
        DatagramService::new(Box::new(LocalFilesystem::new()), self.hex.clone())
    }

    pub fn build_service(&self) -> BuildService {
        BuildService::new(Box::new(LocalFilesystem::new()), Box::new(CommandRunner::new()))
            .with_search_depth(self.hex.marker_search_depth)
    }
}

/// Environment variables with valid UTF-8 names and values.
pub fn env_snapshot() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

pub fn overlay_path(schemas_dir: &Path) -> PathBuf {
    HEX_CFG.iter().fold(schemas_dir.to_path_buf(), |p, seg| p.join(seg))
}

/// String entries of the `hex.cfg` JSON object, with `SCHEMAS_DIR` resolved.
///
/// A missing file is normal; an unreadable or malformed one is ignored
/// with a warning.
pub fn read_overlay(path: &Path, schemas_dir: &str) -> BTreeMap<String, String> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No hex.cfg overlay");
            return BTreeMap::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "hex.cfg unreadable, ignoring");
            return BTreeMap::new();
        }
    };

    let object = match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&text) {
        Ok(object) => object,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "hex.cfg is not a JSON object, ignoring");
            return BTreeMap::new();
        }
    };

    let vars = Variables::new().with(keys::SCHEMAS_DIR, schemas_dir);
    object
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(s) => {
                Some((key, vars.resolve_with(&s, TokenSyntax::BracedAndBare)))
            }
            other => {
                debug!(key = %key, value = %other, "Skipping non-string hex.cfg entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use hexdef_core::domain::NestedContentPolicy;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn overlay_overrides_environment() {
        let tmp = tempfile::tempdir().unwrap();
        let schemas = tmp.path().to_string_lossy().into_owned();
        std::fs::create_dir_all(tmp.path().join("hex.cfg")).unwrap();
        std::fs::write(
            overlay_path(tmp.path()),
            r#"{ "MW_NAME": "RabbitMQ", "DATAGRAM_DIR_PATH": "$SCHEMAS_DIR/datagrams", "DEPTH": 3 }"#,
        )
        .unwrap();

        let ctx = AppContext::build(
            AppConfig::default(),
            env(&[("SCHEMAS_DIR", &schemas), ("MW_NAME", "Kafka")]),
        )
        .unwrap();

        assert_eq!(ctx.hex.middleware, "RabbitMQ");
        assert_eq!(
            ctx.hex.datagram_dir,
            Some(PathBuf::from(format!("{schemas}/datagrams")))
        );
        assert_eq!(ctx.variables.get("MW_NAME"), Some("RabbitMQ"));
        assert!(!ctx.variables.contains("DEPTH"));
    }

    #[test]
    fn malformed_overlay_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("hex.cfg")).unwrap();
        std::fs::write(overlay_path(tmp.path()), "[1, 2").unwrap();

        let overlay = read_overlay(&overlay_path(tmp.path()), "/s");
        assert!(overlay.is_empty());
    }

    #[test]
    fn missing_overlay_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(read_overlay(&overlay_path(tmp.path()), "/s").is_empty());
    }

    #[test]
    fn variables_carry_env_config_and_year() {
        let ctx = AppContext::build(AppConfig::default(), env(&[("HOME_TEAM", "radar")])).unwrap();
        assert_eq!(ctx.variables.get("HOME_TEAM"), Some("radar"));
        assert_eq!(ctx.variables.get("MW_NAME"), Some("Kafka"));
        assert_eq!(ctx.variables.get("YEAR").map(str::len), Some(4));
    }

    #[test]
    fn app_config_drives_policy_and_depths() {
        let mut config = AppConfig::default();
        config.scaffold.nested_content = "explicit".into();
        config.search.marker_depth = 3;

        let ctx = AppContext::build(config, env(&[("SCHEMAS_DIR", "/opt/schemas")])).unwrap();
        assert_eq!(ctx.hex.nested_content, NestedContentPolicy::Explicit);
        assert_eq!(ctx.hex.marker_search_depth, 3);
        assert_eq!(ctx.hex.registry_search_depth, 10);
    }
}
