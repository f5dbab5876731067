//! Scaffold Service - template materialization.
//!
//! This service coordinates the project creation workflow:
//! 1. Load the template document (through `TemplateLoader`)
//! 2. Resolve paths and contents against the variables
//! 3. Apply the existing-root policy
//! 4. Write the resolved structure (through `Filesystem`)
//!
//! There is no rollback: a failure part-way leaves what was written.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateLoader},
    },
    domain::{
        DomainValidator as validator, FsEntry, NestedContentPolicy, ProjectKind, ProjectStructure,
        ProjectStructureItem, ProjectTemplate, RelativePath, Variables, config::keys,
    },
    error::{HexError, HexResult},
};

/// What to do when the scaffold root already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingRoot {
    /// Report `ProjectExists` and write nothing.
    #[default]
    Fail,
    /// Materialize on top of the existing tree.
    Overwrite,
    /// Delete the existing tree first.
    Recreate,
}

/// A single-template scaffold.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub template_path: PathBuf,
    pub root: PathBuf,
    pub variables: Variables,
    pub on_existing: ExistingRoot,
}

#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub template: String,
    pub files: usize,
    pub directories: usize,
}

/// Outcome of scaffolding several components under one project folder.
#[derive(Debug, Clone)]
pub struct MultiScaffoldReport {
    pub root: PathBuf,
    pub succeeded: Vec<ScaffoldReport>,
    pub failed: Vec<(ProjectKind, HexError)>,
}

impl MultiScaffoldReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    loader: Box<dyn TemplateLoader>,
    nested_content: NestedContentPolicy,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(filesystem: Box<dyn Filesystem>, loader: Box<dyn TemplateLoader>) -> Self {
        Self {
            filesystem,
            loader,
            nested_content: NestedContentPolicy::default(),
        }
    }

    pub fn with_nested_content(mut self, policy: NestedContentPolicy) -> Self {
        self.nested_content = policy;
        self
    }

    /// Load a template document.
    pub fn load_template(&self, path: &Path, variables: &Variables) -> HexResult<ProjectTemplate> {
        let template = self.loader.load(path, variables)?;
        validator::validate_template(&template)?;
        Ok(template)
    }

    /// Scaffold one template into `request.root`.
    #[instrument(
        skip_all,
        fields(
            template = %request.template_path.display(),
            root = %request.root.display()
        )
    )]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> HexResult<ScaffoldReport> {
        let template = self.load_template(&request.template_path, &request.variables)?;
        self.prepare_root(&request.root, request.on_existing)?;
        let structure = self.materialize(&request.root, &template, &request.variables)?;

        info!(
            template = %template.name,
            entries = structure.entry_count(),
            "Scaffold completed successfully"
        );
        Ok(report(&template, &structure))
    }

    /// Create `{location}/{name}` and scaffold each component template into
    /// a sub-folder named after it.
    ///
    /// A failing component does not stop the others.
    #[instrument(skip_all, fields(project = %name, location = %location.display()))]
    pub fn scaffold_all(
        &self,
        schemas_dir: &Path,
        location: &Path,
        name: &str,
        variables: &Variables,
    ) -> HexResult<MultiScaffoldReport> {
        validator::validate_project_name(name)?;
        let root = location.join(name);
        self.prepare_root(&root, ExistingRoot::Fail)?;
        self.filesystem.create_dir_all(&root)?;

        let mut result = MultiScaffoldReport {
            root: root.clone(),
            succeeded: Vec::new(),
            failed: Vec::new(),
        };

        for kind in ProjectKind::COMPONENTS {
            let template_path = schemas_dir.join(kind.template_file_name());
            let outcome = self
                .load_template(&template_path, variables)
                .and_then(|t| {
                    let structure = self.materialize(&root.join(kind.as_str()), &t, variables)?;
                    Ok(report(&t, &structure))
                });

            match outcome {
                Ok(r) => {
                    info!(component = %kind, files = r.files, "Component scaffolded");
                    result.succeeded.push(r);
                }
                Err(e) => {
                    warn!(component = %kind, error = %e, "Component failed");
                    result.failed.push((kind, e));
                }
            }
        }

        Ok(result)
    }

    /// Apply the existing-root policy.
    pub fn prepare_root(&self, root: &Path, policy: ExistingRoot) -> HexResult<()> {
        if !self.filesystem.exists(root) {
            return Ok(());
        }
        match policy {
            ExistingRoot::Fail => Err(ApplicationError::ProjectExists {
                path: root.to_path_buf(),
            }
            .into()),
            ExistingRoot::Overwrite => {
                debug!(root = %root.display(), "Writing over existing root");
                Ok(())
            }
            ExistingRoot::Recreate => {
                info!(root = %root.display(), "Removing existing root");
                self.filesystem.remove_dir_all(root)
            }
        }
    }

    /// Resolve `template` against `variables` without touching the target.
    ///
    /// Nested content references are read here, so the filesystem is
    /// consulted for reads.
    pub fn render(
        &self,
        root: &Path,
        template: &ProjectTemplate,
        variables: &Variables,
    ) -> HexResult<ProjectStructure> {
        let mut structure = ProjectStructure::new(root);
        for item in &template.structure {
            let path = RelativePath::try_new(variables.resolve(&item.path))?;
            if item.is_file() {
                let content = self.file_content(item, template, variables);
                structure.add_file(path, content);
            } else {
                structure.add_directory(path);
            }
        }

        for dup in structure.duplicate_paths() {
            debug!(path = %dup.display(), "Path declared more than once, last entry wins");
        }
        Ok(structure)
    }

    /// Create `root` and every template entry below it.
    ///
    /// Directories and parents are created idempotently; files are
    /// overwritten silently.
    pub fn materialize(
        &self,
        root: &Path,
        template: &ProjectTemplate,
        variables: &Variables,
    ) -> HexResult<ProjectStructure> {
        let structure = self.render(root, template, variables)?;
        self.write_all(&structure)?;
        Ok(structure)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn file_content(
        &self,
        item: &ProjectStructureItem,
        template: &ProjectTemplate,
        variables: &Variables,
    ) -> String {
        let content = variables.resolve(item.content.as_deref().unwrap_or_default());

        if let Some(reference) = &item.content_ref {
            let resolved = variables.resolve(reference);
            let path = match template.base_dir() {
                Some(base) if Path::new(&resolved).is_relative() => base.join(&resolved),
                _ => PathBuf::from(&resolved),
            };
            return match self.filesystem.read_to_string(&path) {
                Ok(text) => variables.resolve(&text),
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        entry = %item.path,
                        error = %e,
                        "Content reference could not be read, keeping inline content"
                    );
                    content
                }
            };
        }

        if let Some(candidate) = self.nested_content.candidate(&content) {
            let path = Path::new(candidate);
            if self.filesystem.is_file(path) {
                match self.filesystem.read_to_string(path) {
                    Ok(text) => {
                        debug!(path = %path.display(), "Inlining nested content file");
                        return variables.resolve(&text);
                    }
                    Err(e) => warn!(path = %path.display(), error = %e, "Nested content unreadable"),
                }
            }
        }

        content
    }

    fn write_all(&self, structure: &ProjectStructure) -> HexResult<()> {
        self.filesystem.create_dir_all(structure.root())?;

        for entry in structure.entries() {
            let path = structure.root().join(entry.path());
            match entry {
                FsEntry::Directory(_) => self.filesystem.create_dir_all(&path)?,
                FsEntry::File(file) => {
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }
                    self.filesystem.write_file(&path, &file.content)?;
                }
            }
        }
        Ok(())
    }
}

fn report(template: &ProjectTemplate, structure: &ProjectStructure) -> ScaffoldReport {
    ScaffoldReport {
        root: structure.root().to_path_buf(),
        template: template.name.clone(),
        files: structure.files().count(),
        directories: structure.directories().count(),
    }
}

/// Variables every scaffold gets: the project name and the database default
/// for the call site, on top of whatever the caller supplied.
pub fn scaffold_variables(base: &Variables, project_name: &str, database_default: &str) -> Variables {
    let mut vars = base.clone();
    vars.insert(keys::PROJECT_NAME, project_name);
    vars.insert_default(keys::DB, database_default);
    vars
}
