//! Adapter generation use case.
//!
//! Adapters live beside the domain of the same application:
//!
//! ```text
//! src/<app>/domain/ports/<direction>/I<Model><Direction>Port.h
//! src/<app>/adapters/<direction>/<tech>/<Model><Tech><Direction>Adapter.h
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        locate::{ANY, locate_downward, locate_upward},
        ports::Filesystem,
    },
    domain::{
        AdapterSpec, Direction, generate_adapter,
        codegen::{adapter_class_name, model_name_from_port, technology_dir},
        layout::{self, MARKER_SEARCH_DEPTH},
    },
    error::HexResult,
};

#[derive(Debug, Clone)]
pub struct AdapterRequest {
    pub start: PathBuf,
    pub direction: Direction,
    /// Port header file name, e.g. `IOrderOutgoingPort.h`.
    pub port_file: String,
    pub technology: String,
}

pub struct AdapterService {
    filesystem: Box<dyn Filesystem>,
    search_depth: usize,
}

impl AdapterService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            filesystem,
            search_depth: MARKER_SEARCH_DEPTH,
        }
    }

    pub fn with_search_depth(mut self, depth: usize) -> Self {
        self.search_depth = depth;
        self
    }

    /// Locate `domain/ports/<direction>`.
    ///
    /// Tries `start/src/*/domain/ports/<direction>` first, then walks up: an
    /// ancestor named `src` is searched below, an ancestor that already is
    /// `domain/ports/<direction>` is used directly.
    pub fn find_ports_dir(&self, start: &Path, direction: Direction) -> HexResult<PathBuf> {
        let fs = self.filesystem.as_ref();
        let pattern = [ANY, "domain", "ports", direction.as_str()];

        let from_start = locate_downward(fs, &start.join("src"), &pattern);
        let found = from_start.or_else(|| {
            let mut hit = None;
            locate_upward(start, self.search_depth, |dir| {
                if layout::ends_with_segments(dir, &["domain", "ports", direction.as_str()])
                    && fs.is_dir(dir)
                {
                    hit = Some(dir.to_path_buf());
                } else if layout::base_name(dir) == "src" {
                    hit = locate_downward(fs, dir, &pattern);
                }
                hit.is_some()
            });
            hit
        });

        found.ok_or_else(|| {
            ApplicationError::convention_with_hint(
                format!("a domain/ports/{} directory", direction),
                start,
                "Generate a port first with `hexdef port add`",
            )
            .into()
        })
    }

    /// Port headers available for an adapter, sorted.
    pub fn list_ports(&self, start: &Path, direction: Direction) -> HexResult<Vec<String>> {
        let dir = self.find_ports_dir(start, direction)?;
        Ok(self
            .filesystem
            .list_dir(&dir)?
            .into_iter()
            .filter(|p| layout::is_header_file(p) && self.filesystem.is_file(p))
            .map(|p| layout::base_name(&p))
            .collect())
    }

    /// Locate (and create if missing) `src/<app>/adapters/<direction>`.
    ///
    /// `<app>` must be an application directory, i.e. contain `domain`.
    pub fn find_adapters_dir(&self, start: &Path, direction: Direction) -> HexResult<PathBuf> {
        let fs = self.filesystem.as_ref();
        let app_dir = |src: &Path| {
            locate_downward(fs, src, &[ANY, "domain"])
                .and_then(|d| d.parent().map(Path::to_path_buf))
        };

        let app = app_dir(&start.join("src")).or_else(|| {
            let mut hit = None;
            locate_upward(start, self.search_depth, |dir| {
                if layout::base_name(dir) == "src" {
                    hit = app_dir(dir);
                }
                hit.is_some()
            });
            hit
        });

        let app = app.ok_or_else(|| {
            ApplicationError::convention_with_hint(
                "a src/<app>/domain directory to place adapters next to",
                start,
                "Point at a component folder such as dark_src or white_src",
            )
        })?;

        let dir = app.join("adapters").join(direction.as_str());
        if !fs.is_dir(&dir) {
            debug!(path = %dir.display(), "Creating adapters directory");
            fs.create_dir_all(&dir)?;
        }
        Ok(dir)
    }

    /// Generate and write an adapter for an existing port.
    #[instrument(
        skip_all,
        fields(port = %request.port_file, technology = %request.technology, direction = %request.direction)
    )]
    pub fn add_adapter(&self, request: &AdapterRequest) -> HexResult<PathBuf> {
        if request.technology.trim().is_empty() {
            return Err(
                ApplicationError::ValidationFailed("technology cannot be empty".into()).into(),
            );
        }

        let ports_dir = self.find_ports_dir(&request.start, request.direction)?;
        let port_path = ports_dir.join(&request.port_file);
        if !self.filesystem.is_file(&port_path) {
            return Err(ApplicationError::convention(
                format!("port header {}", request.port_file),
                &ports_dir,
            )
            .into());
        }

        let model = model_name_from_port(&layout::file_stem(&port_path));

        let adapter_dir = self
            .find_adapters_dir(&request.start, request.direction)?
            .join(technology_dir(&request.technology));
        let ext = layout::header_extension_for(&adapter_dir);
        let class_name = adapter_class_name(&model, &request.technology, request.direction);
        let adapter_file = adapter_dir.join(format!("{class_name}.{ext}"));

        if self.filesystem.exists(&adapter_file) {
            return Err(ApplicationError::ArtifactExists { path: adapter_file }.into());
        }

        let namespace =
            layout::namespace_after_src(&adapter_dir).unwrap_or_else(|| "app::adapters".into());
        let relative_port_path = layout::relative_path(&adapter_dir, &port_path);

        let source = generate_adapter(&AdapterSpec {
            namespace: &namespace,
            class_name: &class_name,
            model_name: &model,
            relative_port_path: &relative_port_path,
            technology: &request.technology,
            direction: request.direction,
        });

        self.filesystem.create_dir_all(&adapter_dir)?;
        self.filesystem.write_file(&adapter_file, &source)?;

        info!(path = %adapter_file.display(), "Adapter created");
        Ok(adapter_file)
    }
}
