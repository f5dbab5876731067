//! JSON template loader.
//!
//! Reads a template document from disk and converts it into a domain
//! [`ProjectTemplate`] ready for the scaffold service.
//!
//! # Document format
//!
//! ```json
//! {
//!   "name": "dark",
//!   "description": "Dark-box component",
//!   "structure": [
//!     { "type": "directory", "path": "src/dark_src/domain/model" },
//!     { "type": "file", "path": "Makefile", "contentFile": "$SCHEMAS_DIR/make/dark.mk" },
//!     { "type": "file", "path": "config/app.json", "contentRef": "snippets/app.json" },
//!     { "type": "file", "path": "README.md", "content": "# ${PROJECT_NAME}" }
//!   ]
//! }
//! ```
//!
//! `contentFile` is read here, relative to the template's directory, and
//! replaced by the file's text. `contentRef` is left for the scaffold service,
//! which reads it when materializing.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};

use hexdef_core::{
    application::{ApplicationError, ports::TemplateLoader},
    domain::{ProjectTemplate, TokenSyntax, Variables},
    error::HexResult,
};

/// Loads `*.json` template documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTemplateLoader;

impl JsonTemplateLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse a template document from text.
    ///
    /// `base_dir` is the directory `contentFile` references are joined to.
    pub fn parse(
        &self,
        source: &str,
        origin: &Path,
        base_dir: &Path,
        variables: &Variables,
    ) -> HexResult<ProjectTemplate> {
        let mut template: ProjectTemplate =
            serde_json::from_str(source).map_err(|e| ApplicationError::TemplateParse {
                path: origin.to_path_buf(),
                reason: e.to_string(),
            })?;

        for item in &mut template.structure {
            let Some(reference) = item.content_file.take() else {
                continue;
            };
            let path = resolve_reference(base_dir, &reference, variables);
            match fs::read_to_string(&path) {
                Ok(text) => {
                    debug!(entry = %item.path, file = %path.display(), "Loaded contentFile");
                    item.content = Some(text);
                }
                Err(e) => {
                    warn!(
                        entry = %item.path,
                        file = %path.display(),
                        error = %e,
                        "contentFile could not be read, leaving content unset"
                    );
                    item.content = None;
                }
            }
        }

        Ok(template.with_base_dir(base_dir))
    }
}

impl TemplateLoader for JsonTemplateLoader {
    #[instrument(skip(self, variables), fields(path = %path.display()))]
    fn load(&self, path: &Path, variables: &Variables) -> HexResult<ProjectTemplate> {
        let source = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::TemplateNotFound {
                path: path.to_path_buf(),
            },
            _ => ApplicationError::TemplateParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let template = self.parse(&source, path, &base_dir, variables)?;

        debug!(
            name = %template.name,
            files = template.file_count(),
            directories = template.directory_count(),
            "Template loaded"
        );
        Ok(template)
    }
}

/// Resolve `${KEY}` and `$KEY` tokens, then join relative references to
/// `base_dir`.
fn resolve_reference(base_dir: &Path, reference: &str, variables: &Variables) -> PathBuf {
    let resolved = variables.resolve_with(reference, TokenSyntax::BracedAndBare);
    let resolved = Path::new(&resolved);
    if resolved.is_absolute() {
        resolved.to_path_buf()
    } else {
        base_dir.join(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexdef_core::domain::ItemKind;
    use hexdef_core::error::ErrorCategory;
    use tempfile::TempDir;

    // ── helpers ───────────────────────────────────────────────────────────

    fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let full = dir.join(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
        full
    }

    const MINIMAL: &str = r##"{
        "name": "white",
        "description": "White-box component",
        "structure": [
            { "type": "directory", "path": "src/${PROJECT_NAME}/domain/model" },
            { "type": "file", "path": "README.md", "content": "# ${PROJECT_NAME}" }
        ]
    }"##;

    // ── load ──────────────────────────────────────────────────────────────

    #[test]
    fn loads_name_description_and_items_in_order() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "white.json", MINIMAL);

        let template = JsonTemplateLoader.load(&path, &Variables::new()).unwrap();

        assert_eq!(template.name, "white");
        assert_eq!(template.description, "White-box component");
        assert_eq!(template.structure.len(), 2);
        assert_eq!(template.structure[0].kind, ItemKind::Directory);
        assert_eq!(template.structure[1].kind, ItemKind::File);
        // Paths and inline content stay unresolved until materialization.
        assert_eq!(template.structure[1].content.as_deref(), Some("# ${PROJECT_NAME}"));
        assert_eq!(template.base_dir(), Some(temp.path()));
    }

    #[test]
    fn missing_file_is_template_not_found() {
        let temp = TempDir::new().unwrap();
        let err = JsonTemplateLoader
            .load(&temp.path().join("absent.json"), &Variables::new())
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "broken.json", "{ \"name\": \"x\", \"structure\": [");

        let err = JsonTemplateLoader.load(&path, &Variables::new()).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn unknown_item_type_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write(
            temp.path(),
            "odd.json",
            r#"{ "name": "odd", "structure": [{ "type": "symlink", "path": "x" }] }"#,
        );
        assert!(JsonTemplateLoader.load(&path, &Variables::new()).is_err());
    }

    // ── contentFile ───────────────────────────────────────────────────────

    #[test]
    fn content_file_is_read_relative_to_template_dir() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "snippets/Makefile", "all:\n\tg++ main.cpp\n");
        let path = write(
            temp.path(),
            "dark.json",
            r#"{ "name": "dark", "structure": [
                { "type": "file", "path": "Makefile", "contentFile": "snippets/Makefile" }
            ] }"#,
        );

        let template = JsonTemplateLoader.load(&path, &Variables::new()).unwrap();
        let item = &template.structure[0];
        assert_eq!(item.content.as_deref(), Some("all:\n\tg++ main.cpp\n"));
        assert!(item.content_file.is_none());
    }

    #[test]
    fn content_file_resolves_bare_and_braced_variables() {
        let temp = TempDir::new().unwrap();
        let schemas = temp.path().join("schemas");
        write(&schemas, "make/gray.mk", "gray");
        write(&schemas, "make/gray.cfg", "cfg");
        let path = write(
            temp.path(),
            "gray.json",
            r#"{ "name": "gray", "structure": [
                { "type": "file", "path": "Makefile", "contentFile": "$SCHEMAS_DIR/make/gray.mk" },
                { "type": "file", "path": "app.cfg", "contentFile": "${SCHEMAS_DIR}/make/gray.cfg" }
            ] }"#,
        );
        let vars = Variables::new().with("SCHEMAS_DIR", schemas.to_string_lossy());

        let template = JsonTemplateLoader.load(&path, &vars).unwrap();
        assert_eq!(template.structure[0].content.as_deref(), Some("gray"));
        assert_eq!(template.structure[1].content.as_deref(), Some("cfg"));
    }

    #[test]
    fn missing_content_file_leaves_content_unset() {
        let temp = TempDir::new().unwrap();
        let path = write(
            temp.path(),
            "app.json",
            r#"{ "name": "app", "structure": [
                { "type": "file", "path": "main.cpp", "content": "fallback", "contentFile": "nope.cpp" }
            ] }"#,
        );

        let template = JsonTemplateLoader.load(&path, &Variables::new()).unwrap();
        assert_eq!(template.structure[0].content, None);
    }

    #[test]
    fn content_ref_is_kept_for_materialization() {
        let temp = TempDir::new().unwrap();
        let path = write(
            temp.path(),
            "app.json",
            r#"{ "name": "app", "structure": [
                { "type": "file", "path": "a.json", "contentRef": "snippets/a.json" }
            ] }"#,
        );

        let template = JsonTemplateLoader.load(&path, &Variables::new()).unwrap();
        assert_eq!(template.structure[0].content_ref.as_deref(), Some("snippets/a.json"));
        assert_eq!(template.structure[0].content, None);
    }
}
