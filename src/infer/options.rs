//! Options for line classification and block tracking.

/// Default maximum heading length, in characters (exclusive).
pub const DEFAULT_HEADING_MAX_LEN: usize = 50;

/// Glyphs recognized as bullet markers.
pub const BULLET_GLYPHS: [char; 6] = ['•', '-', '*', '+', '○', '·'];

/// Characters that end a sentence-terminated paragraph run.
pub const SENTENCE_TERMINATORS: [char; 5] = ['.', '!', '?', ':', ';'];

/// Options for turning lines into structure.
#[derive(Debug, Clone)]
pub struct InferOptions {
    /// Heading detection rule
    pub heading: HeadingRule,

    /// When the paragraph buffer flushes
    pub paragraphs: ParagraphPolicy,

    /// How bullet glyphs are emitted
    pub bullets: BulletStyle,

    /// Treat lines indented by a tab or 4+ spaces as code
    pub detect_code: bool,

    /// Language tag written on fences opened by indented code
    pub code_language: Option<String>,
}

impl InferOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for text that came out of an extractor (PDF text, OCR).
    ///
    /// Extractors indent arbitrarily, so indentation is not read as code.
    pub fn extracted_text() -> Self {
        Self {
            detect_code: false,
            ..Self::default()
        }
    }

    /// Set the exclusive maximum heading length.
    pub fn with_heading_max_len(mut self, max_len: usize) -> Self {
        self.heading.max_len = max_len;
        self
    }

    /// Set the level of headings inferred from lines.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading.level = level.clamp(1, 6);
        self
    }

    /// Set the paragraph flush policy.
    pub fn with_paragraph_policy(mut self, policy: ParagraphPolicy) -> Self {
        self.paragraphs = policy;
        self
    }

    /// Set the bullet style.
    pub fn with_bullet_style(mut self, style: BulletStyle) -> Self {
        self.bullets = style;
        self
    }

    /// Enable or disable indented-code detection.
    pub fn with_code_detection(mut self, detect: bool) -> Self {
        self.detect_code = detect;
        self
    }

    /// Set the language tag for inferred code fences.
    pub fn with_code_language(mut self, language: impl Into<String>) -> Self {
        self.code_language = Some(language.into());
        self
    }
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            heading: HeadingRule::default(),
            paragraphs: ParagraphPolicy::default(),
            bullets: BulletStyle::default(),
            detect_code: true,
            code_language: None,
        }
    }
}

/// Rule for recognizing headings among plain lines.
///
/// A line is a heading when it is shorter than `max_len` characters and is
/// either all uppercase or ends with a colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingRule {
    /// Exclusive upper bound on heading length in characters
    pub max_len: usize,

    /// Markdown level for inferred headings (1-6)
    pub level: u8,
}

impl Default for HeadingRule {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_HEADING_MAX_LEN,
            level: 2,
        }
    }
}

/// When pending paragraph text is flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphPolicy {
    /// Flush on blank lines, structural lines, end of input, and whenever a
    /// line ends with `. ! ? : ;`
    #[default]
    Sentence,
    /// Flush only on blank lines, structural lines and end of input
    BlankLine,
}

impl ParagraphPolicy {
    /// Check whether a buffer ending in `fragment` must flush now.
    pub fn flushes_after(&self, fragment: &str) -> bool {
        match self {
            ParagraphPolicy::Sentence => fragment
                .chars()
                .last()
                .is_some_and(|c| SENTENCE_TERMINATORS.contains(&c)),
            ParagraphPolicy::BlankLine => false,
        }
    }
}

/// How unordered list markers are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletStyle {
    /// Replace every glyph with the given marker
    Normalize(char),
    /// Keep the glyph found in the source
    Preserve,
}

impl BulletStyle {
    /// Marker to emit for an item written with `glyph`.
    pub fn marker(&self, glyph: Option<char>) -> char {
        match self {
            BulletStyle::Normalize(marker) => *marker,
            BulletStyle::Preserve => glyph.unwrap_or('*'),
        }
    }
}

impl Default for BulletStyle {
    fn default() -> Self {
        BulletStyle::Normalize('*')
    }
}
