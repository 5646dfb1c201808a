//! Format adapters and the converter registry.
//!
//! A [`DocumentConverter`] reads one source format into a
//! [`Document`]; the [`ConverterRegistry`] picks the converter by file
//! extension, renders the document and wraps every adapter failure in a
//! single error naming the source file.
//!
//! # Example
//!
//! ```no_run
//! use mdinfer::convert::{ConverterRegistry, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> mdinfer::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let result = registry.convert(Path::new("notes.txt"), &ConvertOptions::default())?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

mod delimited;
mod text;

pub use delimited::{sniff_delimiter, CsvConverter};
pub use text::TextConverter;

use crate::detect::{check_signature, SourceFormat};
use crate::error::{Error, Result};
use crate::model::{Document, Metadata};
use crate::observer::{ConversionObserver, LogObserver};
use crate::render::{to_json, ConversionStats, JsonFormat, MarkdownRenderer, RenderOptions};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default number of CSV data rows shown before the preview cap applies.
pub const DEFAULT_CSV_PREVIEW_ROWS: usize = 100;

/// Options for document conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Rendering options
    pub render: RenderOptions,

    /// Request LLM enhancement (accepted, currently a no-op)
    pub use_llm: bool,

    /// Maximum CSV data rows rendered per file
    pub csv_preview_rows: usize,

    /// Whether to collect statistics during conversion
    pub collect_stats: bool,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Request LLM enhancement.
    pub fn with_llm(mut self, use_llm: bool) -> Self {
        self.use_llm = use_llm;
        self
    }

    /// Set the CSV preview row cap.
    pub fn with_csv_preview_rows(mut self, rows: usize) -> Self {
        self.csv_preview_rows = rows;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            use_llm: false,
            csv_preview_rows: DEFAULT_CSV_PREVIEW_ROWS,
            collect_stats: false,
            output_format: OutputFormat::Markdown,
        }
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown format
    #[default]
    Markdown,

    /// JSON dump of the document model
    Json,
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Source document metadata
    pub metadata: Metadata,

    /// Conversion statistics (if collected)
    pub stats: Option<ConversionStats>,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(content: String, metadata: Metadata) -> Self {
        Self {
            content,
            metadata,
            stats: None,
            mime_type: "text/markdown",
        }
    }

    /// Set conversion statistics.
    pub fn with_stats(mut self, stats: ConversionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Trait for format adapters.
///
/// Implement this trait to add support for a new document format. The
/// adapter only builds the [`Document`]; rendering is shared.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["csv"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Read bytes into a document. `source_name` is the file name used for
    /// the fallback title.
    fn read_bytes(
        &self,
        bytes: &[u8],
        source_name: &str,
        options: &ConvertOptions,
    ) -> Result<Document>;

    /// Read a file into a document.
    fn read(&self, path: &Path, options: &ConvertOptions) -> Result<Document> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.read_bytes(&bytes, &name, options)
    }

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document converters.
///
/// The registry maps file extensions to converters and provides
/// convenient methods for converting documents.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the built-in text and CSV converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TextConverter::new()));
        registry.register(Arc::new(CsvConverter::new()));
        registry
    }

    /// Register a converter.
    ///
    /// The converter will be registered for all its supported extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters
                .insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Convert a file, logging through a [`LogObserver`].
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let mut observer = LogObserver::for_source(path.display().to_string());
        self.convert_with_observer(path, options, &mut observer)
    }

    /// Convert a file, reporting events to `observer`.
    ///
    /// Any adapter failure is returned as one [`Error::Source`] naming
    /// `path`; no partial output is produced.
    pub fn convert_with_observer(
        &self,
        path: &Path,
        options: &ConvertOptions,
        observer: &mut dyn ConversionObserver,
    ) -> Result<ConvertResult> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::NoExtension(path.to_path_buf()))?;

        let converter = self
            .resolve(ext)
            .map_err(|e| e.for_source(path))?;

        log::debug!("converting {} with the {} converter", path.display(), converter.name());
        let doc = converter
            .read(path, options)
            .map_err(|e| e.for_source(path))?;

        self.finish(&doc, &path.display().to_string(), options, observer)
            .map_err(|e| e.for_source(path))
    }

    /// Read a file into a document model without rendering it.
    pub fn read_document(&self, path: &Path, options: &ConvertOptions) -> Result<Document> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::NoExtension(path.to_path_buf()))?;
        let converter = self.resolve(ext).map_err(|e| e.for_source(path))?;
        converter
            .read(path, options)
            .map_err(|e| e.for_source(path))
    }

    /// Convert bytes, using the extension of `source_name` to pick the converter.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        source_name: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let mut observer = LogObserver::for_source(source_name);
        let ext = Path::new(source_name)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::NoExtension(PathBuf::from(source_name)))?;

        let converter = self
            .resolve(ext)
            .map_err(|e| e.for_source(source_name))?;

        if let Some(format) = SourceFormat::from_extension(ext) {
            if !check_signature(format, bytes) {
                return Err(Error::Source {
                    path: PathBuf::from(source_name),
                    reason: format!("the {} file appears to be corrupt or invalid", format),
                });
            }
        }

        let doc = converter
            .read_bytes(bytes, source_name, options)
            .map_err(|e| e.for_source(source_name))?;

        self.finish(&doc, source_name, options, &mut observer)
            .map_err(|e| e.for_source(source_name))
    }

    /// Convert many files in parallel.
    ///
    /// Every document gets its own conversion context and observer. The
    /// results are in input order, one per path.
    pub fn convert_many<P>(&self, paths: &[P], options: &ConvertOptions) -> Vec<Result<ConvertResult>>
    where
        P: AsRef<Path> + Sync,
    {
        paths
            .par_iter()
            .map(|path| self.convert(path.as_ref(), options))
            .collect()
    }

    fn resolve(&self, ext: &str) -> Result<Arc<dyn DocumentConverter>> {
        if let Some(converter) = self.get_by_extension(ext) {
            return Ok(converter);
        }
        match SourceFormat::from_extension(ext) {
            Some(format) => Err(Error::UnsupportedFormat(format!(
                "{} documents have no built-in converter",
                format
            ))),
            None => Err(Error::UnsupportedFormat(format!(".{} files", ext))),
        }
    }

    fn finish(
        &self,
        doc: &Document,
        source: &str,
        options: &ConvertOptions,
        observer: &mut dyn ConversionObserver,
    ) -> Result<ConvertResult> {
        let metadata = doc.metadata.clone();

        let result = match options.output_format {
            OutputFormat::Markdown => {
                let renderer = MarkdownRenderer::new(options.render.clone());
                let rendered = renderer.render_with_stats_observed(doc, observer);
                let result = ConvertResult::new(rendered.content, metadata)
                    .with_mime_type("text/markdown");
                if options.collect_stats {
                    result.with_stats(rendered.stats)
                } else {
                    result
                }
            }
            OutputFormat::Json => {
                let content = to_json(doc, JsonFormat::Pretty)?;
                ConvertResult::new(content, metadata).with_mime_type("application/json")
            }
        };

        if options.use_llm {
            observer.on_enhancement_skipped(source);
        }

        Ok(result)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
