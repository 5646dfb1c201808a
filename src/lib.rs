//! # mdinfer
//!
//! Heuristic structure inference from loose text and document blocks to
//! canonical Markdown.
//!
//! Format adapters hand the engine either raw lines, which go through the
//! line classifier, or pre-tagged blocks from sources with native styling.
//! Tables arrive as cell grids. The engine emits one Markdown string per
//! document.
//!
//! ## Quick Start
//!
//! ```
//! let markdown = mdinfer::convert_lines([
//!     "ALL CAPS TITLE",
//!     "",
//!     "para one.",
//!     "para two continues.",
//! ]);
//! assert_eq!(
//!     markdown,
//!     "## ALL CAPS TITLE\n\npara one.\n\npara two continues.\n\n"
//! );
//! ```
//!
//! ## Features
//!
//! - **One rule set**: headings, bullets, numbered items, indented code and
//!   paragraphs are decided by a single priority-ordered classifier
//! - **Native blocks**: adapters with style information bypass the classifier
//! - **Pipe tables**: jagged grids are padded or truncated to the header width
//! - **Adapters**: plain text, Markdown, CSV and TSV files out of the box
//! - **Parallel batches**: many files convert concurrently with Rayon

pub mod convert;
pub mod detect;
pub mod error;
pub mod infer;
pub mod model;
pub mod observer;
pub mod render;

// Re-export commonly used types
pub use convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, CsvConverter, DocumentConverter,
    OutputFormat, TextConverter,
};
pub use detect::{detect_format_from_path, SourceFormat};
pub use error::{Error, Result};
pub use infer::{
    BulletStyle, ConversionContext, HeadingRule, InferOptions, LineClassifier, ParagraphPolicy,
    TrackerState,
};
pub use model::{
    Block, Document, InlineContent, LineKind, Metadata, Section, SectionPart, TableGrid, TextLine,
    TextRun, TextStyle,
};
pub use observer::{CompositeObserver, ConversionObserver, LogObserver, NoopObserver};
pub use render::{
    normalize, render_inline, render_table, ConversionStats, JsonFormat, NormalizeOptions,
    NormalizePreset, RenderOptions, TableOptions,
};

use std::path::Path;

/// Convert raw lines to normalized Markdown with default options.
///
/// No title heading is added.
pub fn convert_lines<S: AsRef<str>>(lines: impl IntoIterator<Item = S>) -> String {
    convert_lines_with_options(lines, &InferOptions::default())
}

/// Convert raw lines to normalized Markdown.
///
/// # Example
///
/// ```
/// use mdinfer::{convert_lines_with_options, InferOptions, ParagraphPolicy};
///
/// let options = InferOptions::new().with_paragraph_policy(ParagraphPolicy::BlankLine);
/// let md = convert_lines_with_options(["one.", "two."], &options);
/// assert_eq!(md, "one. two.\n\n");
/// ```
pub fn convert_lines_with_options<S: AsRef<str>>(
    lines: impl IntoIterator<Item = S>,
    options: &InferOptions,
) -> String {
    normalize(&infer::infer_lines(lines, options))
}

/// Convert pre-tagged blocks to normalized Markdown with default options.
///
/// # Example
///
/// ```
/// use mdinfer::{convert_blocks, Block};
///
/// let md = convert_blocks([Block::heading(1, "Intro"), Block::numbered("3", "third")]);
/// assert_eq!(md, "# Intro\n\n3. third\n\n");
/// ```
pub fn convert_blocks(blocks: impl IntoIterator<Item = Block>) -> String {
    normalize(&infer::infer_blocks(blocks, &InferOptions::default()))
}

/// Render a document model to Markdown.
pub fn document_to_markdown(doc: &Document, options: &RenderOptions) -> String {
    render::to_markdown(doc, options)
}

/// Read a file into a document model with the built-in converters.
///
/// # Example
///
/// ```no_run
/// let doc = mdinfer::read_file("notes.txt").unwrap();
/// println!("Sections: {}", doc.section_count());
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    ConverterRegistry::with_defaults().read_document(path.as_ref(), &ConvertOptions::default())
}

/// Convert a file to Markdown with default options.
///
/// # Example
///
/// ```no_run
/// let markdown = mdinfer::to_markdown("report.csv").unwrap();
/// std::fs::write("report.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(convert_file(path, &ConvertOptions::default())?.content)
}

/// Convert a file with custom options.
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<ConvertResult> {
    ConverterRegistry::with_defaults().convert(path.as_ref(), options)
}

/// Convert a file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = read_file(path)?;
    render::to_json(&doc, format)
}

/// Convert a file without blocking the async runtime.
///
/// The file is read with `tokio::fs`, the conversion itself runs on the
/// blocking pool.
#[cfg(feature = "async")]
pub async fn convert_file_async<P: AsRef<Path>>(
    path: P,
    options: ConvertOptions,
) -> Result<ConvertResult> {
    let path = path.as_ref().to_path_buf();
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| Error::from(e).for_source(&path))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    tokio::task::spawn_blocking(move || {
        ConverterRegistry::with_defaults().convert_bytes(&bytes, &name, &options)
    })
    .await
    .map_err(|e| Error::Other(format!("conversion task failed: {}", e)))?
}

/// Builder for configuring and running conversions.
///
/// # Example
///
/// ```no_run
/// use mdinfer::{Mdinfer, NormalizePreset};
///
/// let markdown = Mdinfer::new()
///     .with_heading_max_len(100)
///     .with_frontmatter()
///     .with_normalize(NormalizePreset::Aggressive)
///     .read("notes.txt")?
///     .to_markdown();
/// # Ok::<(), mdinfer::Error>(())
/// ```
pub struct Mdinfer {
    convert_options: ConvertOptions,
}

impl Mdinfer {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            convert_options: ConvertOptions::default(),
        }
    }

    fn render_mut(&mut self) -> &mut RenderOptions {
        &mut self.convert_options.render
    }

    /// Set the exclusive heading length threshold.
    pub fn with_heading_max_len(mut self, max_len: usize) -> Self {
        self.render_mut().infer.heading.max_len = max_len;
        self
    }

    /// Set the paragraph flush policy.
    pub fn with_paragraph_policy(mut self, policy: ParagraphPolicy) -> Self {
        self.render_mut().infer.paragraphs = policy;
        self
    }

    /// Set the bullet style.
    pub fn with_bullet_style(mut self, style: BulletStyle) -> Self {
        self.render_mut().infer.bullets = style;
        self
    }

    /// Do not read indentation as code.
    pub fn without_code_detection(mut self) -> Self {
        self.render_mut().infer.detect_code = false;
        self
    }

    /// Enable frontmatter in output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_mut().include_frontmatter = true;
        self
    }

    /// Append the document information section.
    pub fn with_info_section(mut self) -> Self {
        self.render_mut().include_info_section = true;
        self
    }

    /// Set the normalization preset.
    pub fn with_normalize(mut self, preset: NormalizePreset) -> Self {
        self.render_mut().normalize = NormalizeOptions::from_preset(preset);
        self
    }

    /// Set the empty-table placeholder.
    pub fn with_table_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.render_mut().table.placeholder = placeholder.into();
        self
    }

    /// Cap rendered table rows.
    pub fn with_max_table_rows(mut self, rows: usize) -> Self {
        self.render_mut().table.max_rows = Some(rows);
        self
    }

    /// Set the CSV preview cap.
    pub fn with_csv_preview_rows(mut self, rows: usize) -> Self {
        self.convert_options.csv_preview_rows = rows;
        self
    }

    /// Request LLM enhancement (accepted as a no-op).
    pub fn with_llm(mut self) -> Self {
        self.convert_options.use_llm = true;
        self
    }

    /// Get the conversion options built so far.
    pub fn options(&self) -> &ConvertOptions {
        &self.convert_options
    }

    /// Convert raw lines with the configured inference options.
    pub fn convert_lines<S: AsRef<str>>(&self, lines: impl IntoIterator<Item = S>) -> String {
        let render = &self.convert_options.render;
        let body = infer::infer_lines(lines, &render.infer);
        render::Normalizer::new(render.normalize.clone()).process(&body)
    }

    /// Read a file and return a result wrapper.
    pub fn read<P: AsRef<Path>>(self, path: P) -> Result<MdinferResult> {
        let document = ConverterRegistry::with_defaults()
            .read_document(path.as_ref(), &self.convert_options)?;
        Ok(MdinferResult {
            document,
            render_options: self.convert_options.render,
        })
    }

    /// Wrap an already-built document.
    pub fn document(self, document: Document) -> MdinferResult {
        MdinferResult {
            document,
            render_options: self.convert_options.render,
        }
    }

    /// Convert a file with the configured options.
    pub fn convert<P: AsRef<Path>>(&self, path: P) -> Result<ConvertResult> {
        ConverterRegistry::with_defaults().convert(path.as_ref(), &self.convert_options)
    }
}

impl Default for Mdinfer {
    fn default() -> Self {
        Self::new()
    }
}

/// A read document plus the options to render it with.
pub struct MdinferResult {
    /// The document model
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl MdinferResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> String {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to Markdown with statistics.
    pub fn to_markdown_with_stats(&self) -> render::RenderResult {
        render::to_markdown_with_stats(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get plain text without markup.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
