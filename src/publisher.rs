//! Pipeline orchestration
//!
//! fetch → map → store → pattern query → reconstruct → render, run
//! sequentially for one source per call. The store built by [`Publisher::load`]
//! is only read after mapping finishes.

use crate::config::PublisherConfig;
use crate::error::{InstataError, InstataResult};
use crate::rdf::{store_with_default_prefixes, RdfFormat, RdfStore};
use crate::reconstruct::{ReconstructedTable, TableMetadata, TableReconstructor};
use crate::render::{HtmlRenderer, Renderer, StyleAsset};
use crate::sparql::TablePatternQuery;
use crate::tabular::{MappingConfig, SourceLocation, TableMapper};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Runs the publish and dump pipelines
pub struct Publisher {
    config: PublisherConfig,
    query: TablePatternQuery,
    reconstructor: TableReconstructor,
    renderer: Box<dyn Renderer>,
}

impl Publisher {
    /// Create a publisher rendering HTML
    pub fn new(config: PublisherConfig) -> Self {
        let reconstructor = TableReconstructor::new(config.body_shape);
        Self {
            config,
            query: TablePatternQuery::new(),
            reconstructor,
            renderer: Box::new(HtmlRenderer::new()),
        }
    }

    /// Replace the renderer
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// Fetch the source and map it into a fresh store under `base`
    pub fn load(&self, source: &str, base: &str) -> InstataResult<RdfStore> {
        let mapper = TableMapper::new(MappingConfig {
            base_iri: base.to_string(),
            infer_datatypes: self.config.infer_datatypes,
        })?;
        let table = SourceLocation::parse(source).fetch()?;

        let mut store = store_with_default_prefixes();
        let stats = mapper.map(&table, &mut store)?;
        info!(
            "Loaded {} into {} statements ({} rows)",
            source, stats.statements, stats.rows
        );
        Ok(store)
    }

    /// Run the pattern query and rebuild header and body
    pub fn reconstruct(&self, store: &RdfStore, name: &str) -> InstataResult<ReconstructedTable> {
        let tuples = self.query.execute(store)?;
        let table = self
            .reconstructor
            .reconstruct(&tuples, TableMetadata::now(name));
        debug!(
            "Reconstructed {} header cells, {} body cells",
            table.header.len(),
            table.body.cell_count()
        );
        Ok(table)
    }

    /// Render `source` into the output directory and copy the style asset
    /// next to it. Returns the path of the rendered document.
    pub fn publish(&self, source: &str, base: &str) -> InstataResult<PathBuf> {
        let location = SourceLocation::parse(source);
        let name = location.dataset_name();
        if name.is_empty() {
            return Err(InstataError::DatasetName(source.to_string()));
        }

        let store = self.load(source, base)?;
        let table = self.reconstruct(&store, &name)?;
        let document = self.renderer.render(&table)?;

        let dir = &self.config.output_dir;
        fs::create_dir_all(dir)?;

        // stylesheet first: a published document never links a missing asset
        write_atomic(&dir.join(StyleAsset::FILE_NAME), &StyleAsset::contents()?)?;
        let target = dir.join(format!("{}.{}", name, self.renderer.extension()));
        write_atomic(&target, document.as_bytes())?;

        info!("Published {} to {}", source, target.display());
        Ok(target)
    }

    /// Serialize the mapped graph of `source`
    pub fn dump(&self, source: &str, base: &str, format: RdfFormat) -> InstataResult<String> {
        let store = self.load(source, base)?;
        let text = store.export_to_string(format)?;
        info!("Dumped {} statements as {}", store.len(), format);
        Ok(text)
    }
}

impl Default for Publisher {
    fn default() -> Self {
        Self::new(PublisherConfig::default())
    }
}

/// Write through a temp file in the target directory, then rename into place
fn write_atomic(target: &Path, contents: &[u8]) -> InstataResult<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.flush()?;
    file.persist(target).map_err(|e| e.error)?;
    debug!("Wrote {} ({} bytes)", target.display(), contents.len());
    Ok(())
}
