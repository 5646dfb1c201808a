//! Line classifier.
//!
//! Rules are tried in a fixed priority order and the first match wins:
//! blank, indented (when code detection is on), heading, bullet, numbered,
//! plain. Ambiguous lines therefore always resolve to exactly one kind.

use regex::Regex;

use super::options::{HeadingRule, InferOptions, BULLET_GLYPHS};
use crate::model::{LineKind, TextLine};

/// Tags raw lines with a [`LineKind`].
#[derive(Debug, Clone)]
pub struct LineClassifier {
    heading: HeadingRule,
    detect_code: bool,
    numbered_regex: Regex,
}

impl LineClassifier {
    /// Create a classifier for the given options.
    pub fn new(options: &InferOptions) -> Self {
        Self {
            heading: options.heading,
            detect_code: options.detect_code,
            numbered_regex: Regex::new(r"^(\d+)[.)]\s+(.+)$").unwrap(),
        }
    }

    /// Classify one line.
    pub fn classify(&self, line: &TextLine) -> LineKind {
        if line.is_blank() {
            return LineKind::Blank;
        }

        if self.detect_code && line.is_indented() {
            return LineKind::Indented(dedent_once(&line.stripped).to_string());
        }

        let content = line.content();

        if self.is_heading(content) {
            return LineKind::Heading(content.to_string());
        }

        if let Some((glyph, text)) = split_bullet(content) {
            return LineKind::Bullet {
                glyph,
                text: text.to_string(),
            };
        }

        if let Some(caps) = self.numbered_regex.captures(content) {
            return LineKind::Numbered {
                ordinal: caps[1].to_string(),
                text: caps[2].to_string(),
            };
        }

        LineKind::Plain(content.to_string())
    }

    /// Classify a raw string.
    pub fn classify_str(&self, raw: &str) -> LineKind {
        self.classify(&TextLine::new(raw))
    }

    fn is_heading(&self, content: &str) -> bool {
        content.chars().count() < self.heading.max_len
            && (is_all_uppercase(content) || content.ends_with(':'))
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(&InferOptions::default())
    }
}

/// True when the text has at least one cased letter and no lowercase ones.
pub fn is_all_uppercase(text: &str) -> bool {
    let mut has_upper = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_upper = true;
        }
    }
    has_upper
}

/// Split a bullet glyph off the front of `content`.
///
/// The glyph must be directly followed by whitespace, so dashes and
/// asterisks used as punctuation stay plain text.
fn split_bullet(content: &str) -> Option<(char, &str)> {
    let mut chars = content.chars();
    let glyph = chars.next()?;
    if !BULLET_GLYPHS.contains(&glyph) {
        return None;
    }
    let rest = chars.as_str();
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim_start();
    if text.is_empty() {
        return None;
    }
    Some((glyph, text))
}

/// Remove one level of indentation: a tab or four spaces.
fn dedent_once(line: &str) -> &str {
    line.strip_prefix('\t')
        .or_else(|| line.strip_prefix("    "))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(raw: &str) -> LineKind {
        LineClassifier::default().classify_str(raw)
    }

    #[test]
    fn test_blank() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify(" \t  "), LineKind::Blank);
    }

    #[test]
    fn test_indented_keeps_nested_indent() {
        assert_eq!(
            classify("        nested()"),
            LineKind::Indented("    nested()".into())
        );
        assert_eq!(classify("\tfoo"), LineKind::Indented("foo".into()));
    }

    #[test]
    fn test_indented_wins_over_heading() {
        assert_eq!(classify("    LOUD"), LineKind::Indented("LOUD".into()));
    }

    #[test]
    fn test_indented_ignored_without_code_detection() {
        let classifier = LineClassifier::new(&InferOptions::extracted_text());
        assert_eq!(
            classifier.classify_str("    indented prose"),
            LineKind::Plain("indented prose".into())
        );
    }

    #[test]
    fn test_heading_uppercase_and_colon() {
        assert_eq!(
            classify("ALL CAPS TITLE"),
            LineKind::Heading("ALL CAPS TITLE".into())
        );
        assert_eq!(
            classify("Ingredients:"),
            LineKind::Heading("Ingredients:".into())
        );
        // digits and punctuation alone are not uppercase
        assert_eq!(classify("42 - 17"), LineKind::Plain("42 - 17".into()));
    }

    #[test]
    fn test_heading_length_threshold() {
        let exactly_50 = "A".repeat(50);
        assert_eq!(classify(&exactly_50), LineKind::Plain(exactly_50.clone()));

        let just_under = "A".repeat(49);
        assert_eq!(classify(&just_under), LineKind::Heading(just_under.clone()));

        let wide = LineClassifier::new(&InferOptions::new().with_heading_max_len(100));
        assert_eq!(wide.classify_str(&exactly_50), LineKind::Heading(exactly_50));
    }

    #[test]
    fn test_heading_beats_bullet() {
        assert_eq!(classify("- NOTE"), LineKind::Heading("- NOTE".into()));
    }

    #[test]
    fn test_bullets() {
        for glyph in BULLET_GLYPHS {
            let line = format!("{glyph} item text");
            assert_eq!(
                classify(&line),
                LineKind::Bullet {
                    glyph,
                    text: "item text".into()
                },
                "glyph {glyph}"
            );
        }
    }

    #[test]
    fn test_bullet_requires_whitespace() {
        assert_eq!(classify("-dash"), LineKind::Plain("-dash".into()));
        assert_eq!(
            classify("*emphasis* matters"),
            LineKind::Plain("*emphasis* matters".into())
        );
        assert_eq!(classify("- "), LineKind::Plain("-".into()));
    }

    #[test]
    fn test_leading_space_bullet() {
        assert_eq!(
            classify("  • spaced"),
            LineKind::Bullet {
                glyph: '•',
                text: "spaced".into()
            }
        );
    }

    #[test]
    fn test_numbered_preserves_ordinal() {
        assert_eq!(
            classify("3. third"),
            LineKind::Numbered {
                ordinal: "3".into(),
                text: "third".into()
            }
        );
        assert_eq!(
            classify("010) padded"),
            LineKind::Numbered {
                ordinal: "010".into(),
                text: "padded".into()
            }
        );
        assert_eq!(classify("3.14 is pi"), LineKind::Plain("3.14 is pi".into()));
        assert_eq!(classify("7."), LineKind::Plain("7.".into()));
    }

    #[test]
    fn test_is_all_uppercase() {
        assert!(is_all_uppercase("ÉTÉ 2024"));
        assert!(!is_all_uppercase("Mixed CASE"));
        assert!(!is_all_uppercase("1234"));
    }
}
