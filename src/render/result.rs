//! Rendering result with metadata and statistics.

use crate::model::Metadata;
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered Markdown
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Conversion statistics
    pub stats: ConversionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: ConversionStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            metadata: Metadata::default(),
            stats: ConversionStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while emitting Markdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of sections rendered
    pub section_count: u32,

    /// Number of headings emitted (title and section headings included)
    pub heading_count: u32,

    /// Number of paragraphs emitted
    pub paragraph_count: u32,

    /// Number of list items emitted
    pub list_item_count: u32,

    /// Number of fenced code blocks emitted
    pub code_block_count: u32,

    /// Number of tables emitted (placeholders included)
    pub table_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment section count.
    pub fn add_section(&mut self) {
        self.section_count += 1;
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment list item count.
    pub fn add_list_item(&mut self) {
        self.list_item_count += 1;
    }

    /// Increment code block count.
    pub fn add_code_block(&mut self) {
        self.code_block_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ConversionStats) {
        self.section_count += other.section_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_item_count += other.list_item_count;
        self.code_block_count += other.code_block_count;
        self.table_count += other.table_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_stats_count_text() {
        let mut stats = ConversionStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_conversion_stats_merge() {
        let mut stats1 = ConversionStats::new();
        stats1.paragraph_count = 5;
        stats1.table_count = 2;

        let stats2 = ConversionStats {
            paragraph_count: 3,
            table_count: 1,
            code_block_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.paragraph_count, 8);
        assert_eq!(stats1.table_count, 3);
        assert_eq!(stats1.code_block_count, 4);
    }

    #[test]
    fn test_render_result_content_only() {
        let result = RenderResult::content_only("# Hello".to_string());
        assert_eq!(result.content, "# Hello");
        assert_eq!(result.content_len(), 7);
        assert_eq!(result.stats.paragraph_count, 0);
    }
}
