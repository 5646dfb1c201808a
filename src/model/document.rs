//! Document-level types.

use super::{Block, TableGrid};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A document as handed over by a format adapter.
///
/// The adapter decides the sectioning (pages, sheets, slides); the
/// assembler renders each section in order behind one title heading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (native title, author, etc.)
    pub metadata: Metadata,

    /// Source file name, used for the fallback title
    pub source_name: Option<String>,

    /// Sections in source order
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document named after its source file.
    pub fn from_source(name: impl Into<String>) -> Self {
        Self {
            source_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the native title recovered by the adapter.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    /// Resolve the title heading text.
    ///
    /// A native title wins over the file stem; `Untitled` is used when
    /// neither is available.
    pub fn title(&self) -> String {
        if let Some(title) = self.metadata.title.as_deref().map(str::trim) {
            if !title.is_empty() {
                return title.to_string();
            }
        }
        self.source_name
            .as_deref()
            .and_then(title_from_file_name)
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Add a section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Get the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Check if the document has any content.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Section::is_empty)
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .map(Section::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Derive a title from a file name by dropping directories and extension.
pub fn title_from_file_name(name: &str) -> Option<String> {
    Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().trim().to_string())
        .filter(|stem| !stem.is_empty())
}

/// One adapter-defined section (page, sheet, slide, or the whole body).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Section {
    /// Section heading; `None` for an unsectioned body
    pub heading: Option<String>,

    /// Content parts in source order
    pub parts: Vec<SectionPart>,
}

impl Section {
    /// Create an unnamed section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a section with a heading.
    pub fn titled(heading: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            parts: Vec::new(),
        }
    }

    /// Add raw lines to be classified.
    pub fn push_lines<S: Into<String>>(&mut self, lines: impl IntoIterator<Item = S>) {
        self.parts.push(SectionPart::Lines(
            lines.into_iter().map(Into::into).collect(),
        ));
    }

    /// Add pre-classified blocks.
    pub fn push_blocks(&mut self, blocks: impl IntoIterator<Item = Block>) {
        self.parts
            .push(SectionPart::Blocks(blocks.into_iter().collect()));
    }

    /// Add one pre-classified block.
    pub fn push_block(&mut self, block: Block) {
        match self.parts.last_mut() {
            Some(SectionPart::Blocks(blocks)) => blocks.push(block),
            _ => self.parts.push(SectionPart::Blocks(vec![block])),
        }
    }

    /// Add a table.
    pub fn push_table(&mut self, table: TableGrid) {
        self.parts.push(SectionPart::Table(table));
    }

    /// Builder form of [`Section::push_lines`].
    pub fn with_lines<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.push_lines(lines);
        self
    }

    /// Builder form of [`Section::push_blocks`].
    pub fn with_blocks(mut self, blocks: impl IntoIterator<Item = Block>) -> Self {
        self.push_blocks(blocks);
        self
    }

    /// Builder form of [`Section::push_table`].
    pub fn with_table(mut self, table: TableGrid) -> Self {
        self.push_table(table);
        self
    }

    /// Check if the section carries no content parts.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(SectionPart::is_empty)
    }

    /// Get plain text content of the section.
    pub fn plain_text(&self) -> String {
        self.parts
            .iter()
            .map(SectionPart::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A run of section content in one input form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum SectionPart {
    /// Raw lines that go through the classifier
    Lines(Vec<String>),
    /// Blocks that bypass the classifier
    Blocks(Vec<Block>),
    /// A cell grid for the table renderer
    Table(TableGrid),
}

impl SectionPart {
    /// Check if the part has nothing in it.
    pub fn is_empty(&self) -> bool {
        match self {
            SectionPart::Lines(lines) => lines.iter().all(|l| l.trim().is_empty()),
            SectionPart::Blocks(blocks) => blocks.is_empty(),
            // An empty grid still renders its placeholder
            SectionPart::Table(_) => false,
        }
    }

    fn plain_text(&self) -> String {
        match self {
            SectionPart::Lines(lines) => lines.join("\n"),
            SectionPart::Blocks(blocks) => blocks
                .iter()
                .map(Block::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            SectionPart::Table(table) => table.plain_text(),
        }
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Native document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Check whether any informational field is set.
    pub fn has_info(&self) -> bool {
        self.author.is_some() || self.created.is_some() || self.modified.is_some()
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self, title: &str) -> String {
        let mut lines = vec!["---".to_string()];

        lines.push(format!("title: \"{}\"", escape_yaml(title)));
        if let Some(ref author) = self.author {
            lines.push(format!("author: \"{}\"", escape_yaml(author)));
        }
        if let Some(ref subject) = self.subject {
            lines.push(format!("subject: \"{}\"", escape_yaml(subject)));
        }
        if let Some(ref created) = self.created {
            lines.push(format!("created: {}", created.to_rfc3339()));
        }
        if let Some(ref modified) = self.modified {
            lines.push(format!("modified: {}", modified.to_rfc3339()));
        }

        lines.push("---".to_string());
        lines.push(String::new());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_title_from_file_name() {
        let doc = Document::from_source("reports/Q3 summary.final.txt");
        assert_eq!(doc.title(), "Q3 summary.final");
    }

    #[test]
    fn test_native_title_wins() {
        let doc = Document::from_source("index.html").with_title("Welcome Page");
        assert_eq!(doc.title(), "Welcome Page");

        let blank_native = Document::from_source("notes.txt").with_title("   ");
        assert_eq!(blank_native.title(), "notes");
    }

    #[test]
    fn test_untitled_fallback() {
        assert_eq!(Document::new().title(), "Untitled");
    }

    #[test]
    fn test_section_push_block_merges() {
        let mut section = Section::titled("Slide 1");
        section.push_block(Block::paragraph("a"));
        section.push_block(Block::paragraph("b"));
        assert_eq!(section.parts.len(), 1);
        section.push_lines(["c"]);
        section.push_block(Block::Rule);
        assert_eq!(section.parts.len(), 3);
    }

    #[test]
    fn test_section_empty() {
        assert!(Section::titled("Page 1").with_lines(["", "  "]).is_empty());
        assert!(!Section::new().with_table(TableGrid::new()).is_empty());
    }

    #[test]
    fn test_metadata_frontmatter() {
        let metadata = Metadata {
            author: Some("Jane \"JD\" Doe".to_string()),
            created: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
            ..Default::default()
        };

        let yaml = metadata.to_yaml_frontmatter("Report");
        assert!(yaml.starts_with("---\ntitle: \"Report\"\n"));
        assert!(yaml.contains("author: \"Jane \\\"JD\\\" Doe\""));
        assert!(yaml.contains("created: 2024-01-02T03:04:05+00:00"));
        assert!(yaml.ends_with("---\n\n"));
    }
}
