//! Rendering options and configuration.

use super::{NormalizeOptions, NormalizePreset, TableOptions};
use crate::infer::InferOptions;

/// Options for rendering a document to Markdown.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Line classification and block tracking options
    pub infer: InferOptions,

    /// Table rendering options
    pub table: TableOptions,

    /// Final normalization pass
    pub normalize: NormalizeOptions,

    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Append a `Document Information` section when metadata is present
    pub include_info_section: bool,

    /// Heading level for adapter sections (pages, sheets, slides)
    pub section_heading_level: u8,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inference options.
    pub fn with_infer(mut self, infer: InferOptions) -> Self {
        self.infer = infer;
        self
    }

    /// Set the table options.
    pub fn with_table(mut self, table: TableOptions) -> Self {
        self.table = table;
        self
    }

    /// Set normalization options.
    pub fn with_normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set normalization preset.
    pub fn with_normalize_preset(mut self, preset: NormalizePreset) -> Self {
        self.normalize = NormalizeOptions::from_preset(preset);
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable the document information section.
    pub fn with_info_section(mut self, include: bool) -> Self {
        self.include_info_section = include;
        self
    }

    /// Set the section heading level.
    pub fn with_section_heading_level(mut self, level: u8) -> Self {
        self.section_heading_level = level.clamp(1, 6);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            infer: InferOptions::default(),
            table: TableOptions::default(),
            normalize: NormalizeOptions::default(),
            include_frontmatter: false,
            include_info_section: false,
            section_heading_level: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_frontmatter(true)
            .with_section_heading_level(0)
            .with_table(TableOptions::new().with_max_rows(10))
            .with_normalize_preset(NormalizePreset::Minimal);

        assert!(options.include_frontmatter);
        assert_eq!(options.section_heading_level, 1);
        assert_eq!(options.table.max_rows, Some(10));
        assert_eq!(options.normalize, NormalizeOptions::minimal());
    }

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.section_heading_level, 2);
        assert!(!options.include_info_section);
    }
}
