//! Structural block types.

use super::InlineContent;
use crate::render::render_inline;
use serde::{Deserialize, Serialize};

/// One classified unit of document content.
///
/// Adapters with native structure push these directly; the line path
/// produces the same variants through the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Block {
    /// A heading (level 1-6)
    Heading {
        /// Heading level
        level: u8,
        /// Heading text
        text: String,
    },

    /// A paragraph of already-joined text
    Paragraph(String),

    /// A list item; `ordinal` is `Some` for numbered items
    ListItem {
        /// Ordinal digits, preserved verbatim
        ordinal: Option<String>,
        /// Item text
        text: String,
    },

    /// One line inside a fenced code block
    CodeLine(String),

    /// One table row; consecutive rows form a single table
    TableRow(Vec<String>),

    /// A structural break
    Blank,

    /// A complete code block with an optional language tag
    CodeBlock {
        /// Language tag for the opening fence
        language: Option<String>,
        /// Code body
        code: String,
    },

    /// A blockquote; embedded newlines become separate quoted lines
    Quote(String),

    /// A standalone image
    Image {
        /// Alternative text
        alt: String,
        /// Image source
        src: String,
    },

    /// A standalone link
    Link {
        /// Link text
        text: String,
        /// Link target
        href: String,
    },

    /// A horizontal rule
    Rule,
}

impl Block {
    /// Create a heading, clamping the level to 1-6.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }

    /// Create a paragraph.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(text.into())
    }

    /// Create a paragraph from styled inline runs.
    pub fn styled(content: &[InlineContent]) -> Self {
        Block::Paragraph(render_inline(content))
    }

    /// Create an unordered list item.
    pub fn bullet(text: impl Into<String>) -> Self {
        Block::ListItem {
            ordinal: None,
            text: text.into(),
        }
    }

    /// Create an ordered list item with the given ordinal.
    pub fn numbered(ordinal: impl Into<String>, text: impl Into<String>) -> Self {
        Block::ListItem {
            ordinal: Some(ordinal.into()),
            text: text.into(),
        }
    }

    /// Create a table row from cell values.
    pub fn row<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        Block::TableRow(cells.into_iter().map(Into::into).collect())
    }

    /// Short name used in logs and observer reports.
    pub fn name(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph(_) => "paragraph",
            Block::ListItem { .. } => "list_item",
            Block::CodeLine(_) => "code_line",
            Block::TableRow(_) => "table_row",
            Block::Blank => "blank",
            Block::CodeBlock { .. } => "code_block",
            Block::Quote(_) => "quote",
            Block::Image { .. } => "image",
            Block::Link { .. } => "link",
            Block::Rule => "rule",
        }
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self, Block::ListItem { .. })
    }

    /// Plain text of the block, without markup.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. }
            | Block::Paragraph(text)
            | Block::ListItem { text, .. }
            | Block::CodeLine(text)
            | Block::Quote(text)
            | Block::Link { text, .. } => text.clone(),
            Block::CodeBlock { code, .. } => code.clone(),
            Block::TableRow(cells) => cells.join("\t"),
            Block::Image { alt, .. } => alt.clone(),
            Block::Blank | Block::Rule => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(
            Block::heading(9, "Deep"),
            Block::Heading {
                level: 6,
                text: "Deep".into()
            }
        );
        assert_eq!(
            Block::heading(0, "Top"),
            Block::Heading {
                level: 1,
                text: "Top".into()
            }
        );
    }

    #[test]
    fn test_list_item_constructors() {
        assert!(Block::bullet("a").is_list_item());
        assert_eq!(
            Block::numbered("07", "seven"),
            Block::ListItem {
                ordinal: Some("07".into()),
                text: "seven".into()
            }
        );
    }

    #[test]
    fn test_row_plain_text() {
        assert_eq!(Block::row(["a", "b"]).plain_text(), "a\tb");
        assert_eq!(Block::Rule.plain_text(), "");
    }

    #[test]
    fn test_styled_paragraph() {
        use crate::model::TextRun;

        let block = Block::styled(&[
            TextRun::new("plain ").into(),
            TextRun::bold("strong").into(),
        ]);
        assert_eq!(block, Block::paragraph("plain **strong**"));
    }

    #[test]
    fn test_newtype_variants_serialize() {
        let json = serde_json::to_string(&Block::paragraph("hi")).unwrap();
        assert_eq!(json, r#"{"type":"paragraph","content":"hi"}"#);
        let json = serde_json::to_string(&Block::Rule).unwrap();
        assert_eq!(json, r#"{"type":"rule"}"#);
    }
}
