//! Datagram registry use cases.
//!
//! Registries are `{project}.xml` files kept in every
//! `…/{DATAGRAM_SAVE_DIR}/{MW_NAME}` directory of a project. The same list is
//! written to all of them. Available datagrams are the `.xml` schema files in
//! `DATAGRAM_DIR_PATH`.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, locate::find_marker, ports::Filesystem},
    domain::{
        DatagramEntry, DomainValidator as validator, HexConfig, Marker,
        config::keys,
        datagram::{exclude_selected, parse_registry, render_registry},
        layout,
    },
    error::{HexError, HexResult},
};

/// The registry files of one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatagramRegistry {
    pub root: PathBuf,
    pub project_name: String,
    pub directories: Vec<PathBuf>,
}

impl DatagramRegistry {
    pub fn files(&self) -> Vec<PathBuf> {
        self.directories
            .iter()
            .map(|d| d.join(format!("{}.xml", self.project_name)))
            .collect()
    }

    /// The file read when showing the current selection.
    pub fn primary_file(&self) -> Option<PathBuf> {
        self.files().into_iter().next()
    }
}

/// Result of creating a datagram schema in every component.
#[derive(Debug, Clone)]
pub struct DatagramCreation {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, HexError)>,
}

pub struct DatagramService {
    filesystem: Box<dyn Filesystem>,
    config: HexConfig,
}

impl DatagramService {
    pub fn new(filesystem: Box<dyn Filesystem>, config: HexConfig) -> Self {
        Self { filesystem, config }
    }

    pub fn config(&self) -> &HexConfig {
        &self.config
    }

    /// Project root: the nearest ancestor holding `.project_root`.
    pub fn project_root(&self, start: &Path) -> HexResult<PathBuf> {
        find_marker(
            self.filesystem.as_ref(),
            start,
            Marker::ProjectRoot,
            self.config.marker_search_depth,
        )
        .ok_or_else(|| {
            ApplicationError::convention_with_hint(
                "project root (.project_root marker)",
                start,
                "Create it with: mkdir .project_root",
            )
            .into()
        })
    }

    /// Find every registry directory of the project containing `start`.
    #[instrument(skip_all, fields(start = %start.display()))]
    pub fn registry(&self, start: &Path) -> HexResult<DatagramRegistry> {
        let root = self.project_root(start)?;
        let project_name = layout::base_name(&root);
        let pattern =
            layout::registry_pattern(&self.config.datagram_save_dir, &self.config.middleware);

        let contains = |p: &Path| p.to_string_lossy().replace('\\', "/").contains(&pattern);
        let directories: Vec<PathBuf> = self
            .filesystem
            .walk_dirs(&root, self.config.registry_search_depth)?
            .into_iter()
            .filter(|d| contains(d) && !d.parent().is_some_and(|p| contains(p)))
            .collect();

        if directories.is_empty() {
            return Err(ApplicationError::convention_with_hint(
                format!("any '{pattern}' directory"),
                &root,
                "Run `hexdef datagrams init` to create registry directories",
            )
            .into());
        }

        debug!(count = directories.len(), "Registry directories found");
        Ok(DatagramRegistry {
            root,
            project_name,
            directories,
        })
    }

    /// Create `{component}/src/{project}/{save_dir}/{mw}` for every component
    /// folder (`src/app`, `src/dark_src`, `src/white_src`) that exists.
    pub fn create_registry_dirs(&self, start: &Path) -> HexResult<Vec<PathBuf>> {
        let root = self.project_root(start)?;
        let project_name = layout::base_name(&root);

        let mut created = Vec::new();
        for component in layout::registry_component_roots() {
            let component = root.join(component);
            if !self.filesystem.is_dir(&component) {
                continue;
            }
            let dir = layout::registry_dir_for(
                &component,
                &project_name,
                &self.config.datagram_save_dir,
                &self.config.middleware,
            );
            self.filesystem.create_dir_all(&dir)?;
            info!(path = %dir.display(), "Registry directory created");
            created.push(dir);
        }

        if created.is_empty() {
            return Err(ApplicationError::convention(
                "a component folder (src/app, src/dark_src or src/white_src)",
                &root,
            )
            .into());
        }
        Ok(created)
    }

    /// Entries currently in a registry file. Missing or unreadable files
    /// read as an empty registry.
    pub fn list_selected(&self, xml_path: &Path) -> Vec<DatagramEntry> {
        match self.filesystem.read_to_string(xml_path) {
            Ok(text) => parse_registry(&text),
            Err(e) => {
                debug!(
                    path = %xml_path.display(),
                    error = %e,
                    "Registry unreadable, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Schema names in `DATAGRAM_DIR_PATH` not yet selected in `xml_path`.
    pub fn list_available(&self, xml_path: &Path) -> HexResult<Vec<String>> {
        let dir = self.config.datagram_dir.as_deref().ok_or_else(|| {
            ApplicationError::MissingConfiguration {
                key: keys::DATAGRAM_DIR_PATH,
                detail: "is not set".into(),
            }
        })?;
        if !self.filesystem.is_dir(dir) {
            return Err(ApplicationError::MissingConfiguration {
                key: keys::DATAGRAM_DIR_PATH,
                detail: format!("points to a missing directory: {}", dir.display()),
            }
            .into());
        }

        let names: Vec<String> = self
            .filesystem
            .list_dir(dir)?
            .into_iter()
            .filter(|p| p.extension().is_some_and(|e| e == "xml") && self.filesystem.is_file(p))
            .map(|p| layout::file_stem(&p))
            .collect();

        Ok(exclude_selected(names, &self.list_selected(xml_path)))
    }

    /// Rewrite one registry file from scratch.
    pub fn save_all(&self, xml_path: &Path, entries: &[DatagramEntry]) -> HexResult<()> {
        if let Some(parent) = xml_path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(xml_path, &render_registry(entries))
    }

    /// Write the same entries to every registry file of the project.
    #[instrument(skip_all, fields(project = %registry.project_name, entries = entries.len()))]
    pub fn save_registry(
        &self,
        registry: &DatagramRegistry,
        entries: &[DatagramEntry],
    ) -> HexResult<Vec<PathBuf>> {
        let files = registry.files();
        for file in &files {
            self.save_all(file, entries)?;
        }
        info!(files = files.len(), "Datagram registry saved");
        Ok(files)
    }

    /// Directories that receive a newly created datagram schema.
    ///
    /// With a project root: the dark component (`.project_dark`, else
    /// `src/dark_src`) and the gray component (`.project_gray`, else
    /// `src/<project>`), whichever exist. Without one: the dark marker
    /// directory, else the gray one.
    pub fn datagram_targets(&self, start: &Path) -> HexResult<Vec<PathBuf>> {
        let fs = self.filesystem.as_ref();
        let depth = self.config.marker_search_depth;
        let root = find_marker(fs, start, Marker::ProjectRoot, depth);
        let dark = find_marker(fs, start, Marker::Dark, depth);
        let gray = find_marker(fs, start, Marker::Gray, depth);

        let mut targets = Vec::new();
        match root {
            Some(root) => {
                let project_name = layout::base_name(&root);
                let inferred_dark = root.join("src").join("dark_src");
                let inferred_gray = root.join("src").join(&project_name);
                let dark = dark.or_else(|| fs.is_dir(&inferred_dark).then_some(inferred_dark));
                let gray = gray.or_else(|| fs.is_dir(&inferred_gray).then_some(inferred_gray));
                targets.extend(dark.into_iter().chain(gray));
            }
            None => targets.extend(dark.or(gray)),
        }
        targets.dedup();

        if targets.is_empty() {
            return Err(ApplicationError::convention_with_hint(
                "a project marker (.project_root, .project_dark or .project_gray)",
                start,
                "Create one with: mkdir .project_root (or .project_dark / .project_gray)",
            )
            .into());
        }
        Ok(targets)
    }

    /// Create `{name}.xml` from the datagram template in every target
    /// component: `{component}/{save_dir}/{mw}/{target_name}/{name}.xml`.
    #[instrument(skip_all, fields(name = %name))]
    pub fn create_datagram(&self, start: &Path, name: &str) -> HexResult<DatagramCreation> {
        validator::validate_datagram_name(name)?;

        let template_path = self.config.datagram_template_path().ok_or_else(|| {
            ApplicationError::MissingConfiguration {
                key: keys::DATAGRAM,
                detail: "is not set and SCHEMAS_DIR is unavailable".into(),
            }
        })?;
        if !self.filesystem.is_file(&template_path) {
            return Err(ApplicationError::TemplateNotFound {
                path: template_path,
            }
            .into());
        }
        let template = self.filesystem.read_to_string(&template_path)?;

        let mut variables = self.config.variables();
        variables.insert(keys::DATAGRAM_NAME, name);
        let content = variables.resolve(&template);

        let targets = self.datagram_targets(start)?;
        let mut result = DatagramCreation {
            written: Vec::new(),
            failed: Vec::new(),
        };

        for target in targets {
            let mut dir = target.clone();
            for seg in self.config.datagram_save_dir.split('/').filter(|s| !s.is_empty()) {
                dir.push(seg);
            }
            let dir = dir
                .join(&self.config.middleware)
                .join(&self.config.new_datagram_target_name);
            let file = dir.join(format!("{name}.xml"));

            let written = self
                .filesystem
                .create_dir_all(&dir)
                .and_then(|_| self.filesystem.write_file(&file, &content));
            match written {
                Ok(()) => {
                    info!(path = %file.display(), "Datagram created");
                    result.written.push(file);
                }
                Err(e) => {
                    warn!(path = %file.display(), error = %e, "Datagram could not be written");
                    result.failed.push((file, e));
                }
            }
        }

        if result.written.is_empty() {
            let messages = result.failed.iter().map(|(_, e)| e.to_string()).collect();
            return Err(ApplicationError::PartialFailure {
                failed: result.failed.len(),
                total: result.failed.len(),
                messages,
            }
            .into());
        }
        Ok(result)
    }
}
