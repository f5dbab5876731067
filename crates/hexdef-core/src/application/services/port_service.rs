//! Port generation use case.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, locate::locate_downward, locate::ANY, ports::Filesystem},
    domain::{
        Direction, DomainValidator as validator, ModelAttribute, PortMethod, PortSpec,
        codegen::{method_catalog, port_class_name},
        generate_port, layout, parse_attributes,
    },
    error::HexResult,
};

/// A model header found under `domain/model`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHeader {
    pub name: String,
    pub file_name: String,
    pub path: PathBuf,
}

/// `src/<app>/domain/model` plus the `<app>` namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDirectory {
    pub path: PathBuf,
    pub namespace: String,
}

#[derive(Debug, Clone)]
pub struct PortRequest {
    /// Component directory the user pointed at (`.../dark_src`, `.../white_src`).
    pub start: PathBuf,
    pub model: String,
    pub direction: Direction,
    pub methods: Vec<String>,
}

pub struct PortService {
    filesystem: Box<dyn Filesystem>,
}

impl PortService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Locate `start/src/*/domain/model`.
    pub fn find_model_dir(&self, start: &Path) -> HexResult<ModelDirectory> {
        let path = locate_downward(
            self.filesystem.as_ref(),
            start,
            &["src", ANY, "domain", "model"],
        )
        .ok_or_else(|| {
            ApplicationError::convention_with_hint(
                "a src/<app>/domain/model directory",
                start,
                "Point at a component folder such as dark_src or white_src",
            )
        })?;

        // .../src/<app>/domain/model
        let namespace = path
            .parent()
            .and_then(Path::parent)
            .map(layout::base_name)
            .unwrap_or_default();

        Ok(ModelDirectory { path, namespace })
    }

    /// Model headers (`.h` / `.hpp`), sorted by file name.
    pub fn list_models(&self, start: &Path) -> HexResult<Vec<ModelHeader>> {
        let dir = self.find_model_dir(start)?;
        Ok(self
            .filesystem
            .list_dir(&dir.path)?
            .into_iter()
            .filter(|p| layout::is_header_file(p) && self.filesystem.is_file(p))
            .map(|path| ModelHeader {
                name: layout::file_stem(&path),
                file_name: layout::base_name(&path),
                path,
            })
            .collect())
    }

    /// Parse a model header into its private attributes.
    pub fn model_attributes(&self, header: &ModelHeader) -> HexResult<Vec<ModelAttribute>> {
        let text = self.filesystem.read_to_string(&header.path)?;
        Ok(parse_attributes(&text))
    }

    /// Methods the user may pick for this model and direction.
    pub fn method_catalog(
        &self,
        start: &Path,
        model: &str,
        direction: Direction,
    ) -> HexResult<Vec<PortMethod>> {
        let header = self.find_model(start, model)?;
        let attributes = self.model_attributes(&header)?;
        Ok(method_catalog(&header.name, direction, &attributes))
    }

    /// Generate and write `I{Model}{Direction}Port` next to the model.
    ///
    /// Fails with `ArtifactExists` when the port file is already there.
    #[instrument(skip_all, fields(model = %request.model, direction = %request.direction))]
    pub fn add_port(&self, request: &PortRequest) -> HexResult<PathBuf> {
        validator::validate_model_name(&request.model)?;
        if request.methods.is_empty() {
            return Err(ApplicationError::ValidationFailed(
                "select at least one port method".into(),
            )
            .into());
        }

        let model_dir = self.find_model_dir(&request.start)?;
        let header = self.find_model(&request.start, &request.model)?;
        let attributes = self.model_attributes(&header)?;

        let ports_dir = model_dir
            .path
            .parent()
            .unwrap_or(&model_dir.path)
            .join("ports")
            .join(request.direction.as_str());
        let ext = layout::header_extension_for(&request.start);
        let class_name = port_class_name(&header.name, request.direction);
        let port_file = ports_dir.join(format!("{class_name}.{ext}"));

        if self.filesystem.exists(&port_file) {
            return Err(ApplicationError::ArtifactExists { path: port_file }.into());
        }

        let source = generate_port(&PortSpec {
            model_name: &header.name,
            namespace: &model_dir.namespace,
            model_header_file: &header.file_name,
            direction: request.direction,
            attributes: &attributes,
            selected: &request.methods,
        });

        self.filesystem.create_dir_all(&ports_dir)?;
        self.filesystem.write_file(&port_file, &source)?;

        info!(path = %port_file.display(), "Port created");
        Ok(port_file)
    }

    fn find_model(&self, start: &Path, model: &str) -> HexResult<ModelHeader> {
        self.list_models(start)?
            .into_iter()
            .find(|h| h.name == model)
            .ok_or_else(|| {
                ApplicationError::convention_with_hint(
                    format!("model header for '{model}'"),
                    start,
                    "Expected <Model>.h or <Model>.hpp in domain/model",
                )
                .into()
            })
    }
}
