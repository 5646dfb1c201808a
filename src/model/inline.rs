//! Inline text types used by adapters with native run styling.

use serde::{Deserialize, Serialize};

/// Inline content within a paragraph or list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineContent {
    /// A text run with styling
    Text(TextRun),

    /// A hyperlink
    Link {
        /// Link text
        text: String,
        /// Link target
        href: String,
    },

    /// An inline image
    Image {
        /// Alternative text
        alt: String,
        /// Image source
        src: String,
    },
}

impl InlineContent {
    /// Plain text of this item, without markup.
    pub fn plain_text(&self) -> &str {
        match self {
            InlineContent::Text(run) => &run.text,
            InlineContent::Link { text, .. } => text,
            InlineContent::Image { alt, .. } => alt,
        }
    }
}

impl From<TextRun> for InlineContent {
    fn from(run: TextRun) -> Self {
        InlineContent::Text(run)
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                bold: true,
                ..Default::default()
            },
        }
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                italic: true,
                ..Default::default()
            },
        }
    }

    /// Create a bold and italic text run.
    pub fn bold_italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                bold: true,
                italic: true,
                ..Default::default()
            },
        }
    }

    /// Create an inline code run.
    pub fn code(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                code: true,
                ..Default::default()
            },
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Inline code
    pub code: bool,
}

impl TextStyle {
    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.code
    }
}
