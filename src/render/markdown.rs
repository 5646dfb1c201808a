//! Document assembly.
//!
//! The assembler writes the title heading, walks the sections in order
//! through a single [`ConversionContext`] and finishes with the
//! normalization pass.

use crate::infer::ConversionContext;
use crate::model::{Document, Metadata, SectionPart};
use crate::observer::{ConversionObserver, NoopObserver};

use super::{ConversionStats, Normalizer, RenderOptions, RenderResult};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> String {
    MarkdownRenderer::new(options.clone()).render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> RenderResult {
    MarkdownRenderer::new(options.clone()).render_with_stats(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    normalizer: Normalizer,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        let normalizer = Normalizer::new(options.normalize.clone());
        Self {
            options,
            normalizer,
        }
    }

    /// Get the options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> String {
        self.render_internal(doc, &mut NoopObserver).0
    }

    /// Render a document, reporting events to `observer`.
    pub fn render_observed(&self, doc: &Document, observer: &mut dyn ConversionObserver) -> String {
        self.render_internal(doc, observer).0
    }

    /// Render a document to Markdown with conversion statistics.
    pub fn render_with_stats(&self, doc: &Document) -> RenderResult {
        self.render_with_stats_observed(doc, &mut NoopObserver)
    }

    /// Render with statistics, reporting events to `observer`.
    pub fn render_with_stats_observed(
        &self,
        doc: &Document,
        observer: &mut dyn ConversionObserver,
    ) -> RenderResult {
        let (content, stats) = self.render_internal(doc, observer);
        RenderResult::new(content, doc.metadata.clone(), stats)
    }

    fn render_internal(
        &self,
        doc: &Document,
        observer: &mut dyn ConversionObserver,
    ) -> (String, ConversionStats) {
        let title = doc.title();
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter(&title));
        }
        output.push_str(&format!("# {}\n\n", title));

        let mut ctx = ConversionContext::new(&self.options.infer)
            .with_table_options(self.options.table.clone())
            .with_observer(&mut *observer);
        ctx.stats_mut().add_heading();

        for section in &doc.sections {
            if let Some(observer) = ctx.observer() {
                observer.on_section(section.heading.as_deref());
            }
            ctx.stats_mut().add_section();

            if let Some(heading) = section.heading.as_deref() {
                ctx.push_heading(self.options.section_heading_level, heading);
            }

            for part in &section.parts {
                match part {
                    SectionPart::Lines(lines) => ctx.push_lines(lines),
                    SectionPart::Blocks(blocks) => {
                        for block in blocks {
                            ctx.push_block(block.clone());
                        }
                    }
                    SectionPart::Table(table) => ctx.push_table(table),
                }
            }
        }

        let (body, mut stats) = ctx.finish_with_stats();
        output.push_str(&body);

        if self.options.include_info_section && doc.metadata.has_info() {
            output.push_str(&render_info_section(&doc.metadata));
            stats.add_heading();
        }

        let content = self.normalizer.process(&output);
        observer.on_finish(&stats);

        log::debug!(
            "rendered \"{}\": {} sections, {} bytes",
            title,
            stats.section_count,
            content.len()
        );

        (content, stats)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// Render the `Document Information` section.
fn render_info_section(metadata: &Metadata) -> String {
    let mut out = String::from("## Document Information\n\n");
    if let Some(created) = metadata.created {
        out.push_str(&format!("**Created**: {}\n\n", created.to_rfc3339()));
    }
    if let Some(modified) = metadata.modified {
        out.push_str(&format!("**Last Modified**: {}\n\n", modified.to_rfc3339()));
    }
    if let Some(author) = metadata.author.as_deref() {
        out.push_str(&format!("**Author**: {}\n\n", author));
    }
    out
}
