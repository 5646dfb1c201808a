//! Raw line and line classification types.

use serde::{Deserialize, Serialize};

/// A single raw input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLine {
    /// The line exactly as supplied
    pub raw: String,

    /// The line with trailing whitespace removed
    pub stripped: String,

    /// Number of leading whitespace characters (tabs count as one)
    pub indent: usize,
}

impl TextLine {
    /// Create a line from raw text.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let stripped = raw.trim_end().to_string();
        let indent = stripped
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .count();
        Self {
            raw,
            stripped,
            indent,
        }
    }

    /// Split a text blob into lines, accepting `\n` and `\r\n` endings.
    pub fn split(text: &str) -> Vec<TextLine> {
        text.lines().map(TextLine::new).collect()
    }

    /// The stripped line with leading whitespace removed as well.
    pub fn content(&self) -> &str {
        self.stripped.trim_start()
    }

    /// Check whether the line has no visible content.
    pub fn is_blank(&self) -> bool {
        self.stripped.is_empty()
    }

    /// Check whether the line opens with a tab or at least four spaces.
    pub fn is_indented(&self) -> bool {
        self.stripped.starts_with('\t') || self.stripped.starts_with("    ")
    }
}

impl From<&str> for TextLine {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for TextLine {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// The classification of one line.
///
/// Payloads carry the text the trackers need, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum LineKind {
    /// Nothing but whitespace
    Blank,

    /// Indented code, with the indentation removed
    Indented(String),

    /// Short all-caps or colon-terminated line
    Heading(String),

    /// Bulleted list item
    Bullet {
        /// The bullet glyph as written
        glyph: char,
        /// Item text after the glyph
        text: String,
    },

    /// Numbered list item
    Numbered {
        /// Ordinal digits exactly as written (e.g. "3", "01")
        ordinal: String,
        /// Item text after the delimiter
        text: String,
    },

    /// Ordinary prose
    Plain(String),
}

impl LineKind {
    /// Short name used in logs and observer reports.
    pub fn name(&self) -> &'static str {
        match self {
            LineKind::Blank => "blank",
            LineKind::Indented(_) => "indented",
            LineKind::Heading(_) => "heading",
            LineKind::Bullet { .. } => "bullet",
            LineKind::Numbered { .. } => "numbered",
            LineKind::Plain(_) => "plain",
        }
    }

    /// Check whether this line continues or opens a list.
    pub fn is_list_item(&self) -> bool {
        matches!(self, LineKind::Bullet { .. } | LineKind::Numbered { .. })
    }
}
