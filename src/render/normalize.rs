//! Final normalization pass over assembled Markdown.
//!
//! Every step is idempotent on its own and the steps run in an order where
//! no later step can re-enable an earlier one, so the whole pass is
//! idempotent for a fixed set of options. The newline collapse always runs
//! last.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Normalization preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizePreset {
    /// Newline collapse only
    Minimal,
    /// Line endings, trailing whitespace, NFC and replacement characters
    #[default]
    Standard,
    /// Standard plus ligatures, private-use characters and inner space runs
    Aggressive,
}

/// Options for the normalization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Convert `\r\n` and lone `\r` to `\n`
    pub normalize_line_endings: bool,

    /// Strip whitespace at the end of every line
    pub trim_trailing_whitespace: bool,

    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Replace typographic ligatures (ﬁ, ﬂ, ...) with their letters
    pub fix_ligatures: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Remove Private Use Area characters
    pub remove_pua: bool,

    /// Collapse runs of spaces after the first visible character of a line
    pub collapse_inner_spaces: bool,
}

impl NormalizeOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: NormalizePreset) -> Self {
        match preset {
            NormalizePreset::Minimal => Self::minimal(),
            NormalizePreset::Standard => Self::standard(),
            NormalizePreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal options.
    pub fn minimal() -> Self {
        Self {
            normalize_line_endings: false,
            trim_trailing_whitespace: false,
            normalize_unicode: false,
            fix_ligatures: false,
            remove_replacement_char: false,
            remove_pua: false,
            collapse_inner_spaces: false,
        }
    }

    /// Standard options.
    pub fn standard() -> Self {
        Self {
            normalize_line_endings: true,
            trim_trailing_whitespace: true,
            normalize_unicode: true,
            remove_replacement_char: true,
            ..Self::minimal()
        }
    }

    /// Aggressive options.
    ///
    /// Inner space collapsing also narrows empty table cells, so this preset
    /// is meant for text-heavy output.
    pub fn aggressive() -> Self {
        Self {
            fix_ligatures: true,
            remove_pua: true,
            collapse_inner_spaces: true,
            ..Self::standard()
        }
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Normalization pipeline.
pub struct Normalizer {
    options: NormalizeOptions,
    newline_regex: Regex,
    inner_space_regex: Regex,
    ligature_map: Vec<(char, &'static str)>,
}

impl Normalizer {
    /// Create a new normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            newline_regex: Regex::new(r"\n{3,}").unwrap(),
            inner_space_regex: Regex::new(r"(\S) {2,}").unwrap(),
            ligature_map: vec![
                ('\u{FB00}', "ff"),
                ('\u{FB01}', "fi"),
                ('\u{FB02}', "fl"),
                ('\u{FB03}', "ffi"),
                ('\u{FB04}', "ffl"),
                ('\u{FB05}', "st"),
                ('\u{FB06}', "st"),
            ],
        }
    }

    /// Create a normalizer from a preset.
    pub fn from_preset(preset: NormalizePreset) -> Self {
        Self::new(NormalizeOptions::from_preset(preset))
    }

    /// Get the options.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Run the pass.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        // Character removal first: it can expose new NFC compositions
        // and new trailing whitespace.
        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }
        if self.options.remove_pua {
            result = result.chars().filter(|c| !is_private_use(*c)).collect();
        }

        if self.options.fix_ligatures {
            for (ligature, replacement) in &self.ligature_map {
                result = result.replace(*ligature, replacement);
            }
        }

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.normalize_line_endings {
            result = result.replace("\r\n", "\n").replace('\r', "\n");
        }

        if self.options.collapse_inner_spaces {
            result = self.inner_space_regex.replace_all(&result, "$1 ").into_owned();
        }

        if self.options.trim_trailing_whitespace {
            result = trim_line_ends(&result);
        }

        self.newline_regex.replace_all(&result, "\n\n").into_owned()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

/// Normalize text with the standard preset.
pub fn normalize(text: &str) -> String {
    Normalizer::default().process(text)
}

/// Collapse every run of three or more newlines to exactly two.
pub fn collapse_newlines(text: &str) -> String {
    Normalizer::from_preset(NormalizePreset::Minimal).process(text)
}

fn trim_line_ends(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut lines = text.split('\n').peekable();
    while let Some(line) = lines.next() {
        out.push_str(line.trim_end());
        if lines.peek().is_some() {
            out.push('\n');
        }
    }
    out
}

fn is_private_use(c: char) -> bool {
    let code = c as u32;
    (0xE000..=0xF8FF).contains(&code)
        || (0xF0000..=0xFFFFD).contains(&code)
        || (0x100000..=0x10FFFD).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "\n\n\n",
        "a\n\n\n\nb",
        "a \r\n\r\n\r\n  \n\nb",
        "x \u{FFFD}\n\n \n\ny",
        "cafe\u{0301} \u{E000}\u{0301}",
        "\u{FB01}nd  the   gap  \n\n\n",
        "| a |  |\n\n\n\n| b | c |",
        "\r\r\r",
    ];

    #[test]
    fn test_collapse_newlines() {
        assert_eq!(collapse_newlines("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_newlines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_newlines("a\nb"), "a\nb");
    }

    #[test]
    fn test_idempotent_for_every_preset() {
        for preset in [
            NormalizePreset::Minimal,
            NormalizePreset::Standard,
            NormalizePreset::Aggressive,
        ] {
            let normalizer = Normalizer::from_preset(preset);
            for sample in SAMPLES {
                let once = normalizer.process(sample);
                assert_eq!(normalizer.process(&once), once, "{:?} on {:?}", preset, sample);
                assert!(!once.contains("\n\n\n"), "{:?} on {:?}", preset, sample);
            }
        }
    }

    #[test]
    fn test_trailing_whitespace_lines_collapse() {
        assert_eq!(normalize("a\n  \n \t\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_crlf() {
        assert_eq!(normalize("one\r\ntwo\rthree"), "one\ntwo\nthree");
    }

    #[test]
    fn test_nfc() {
        assert_eq!(normalize("cafe\u{0301}"), "caf\u{00E9}");
    }

    #[test]
    fn test_replacement_char_removed() {
        assert_eq!(normalize("Hello\u{FFFD}World"), "HelloWorld");
    }

    #[test]
    fn test_aggressive_steps() {
        let normalizer = Normalizer::from_preset(NormalizePreset::Aggressive);
        assert_eq!(normalizer.process("\u{FB01}nding \u{FB02}owers"), "finding flowers");
        assert_eq!(normalizer.process("a\u{E000}b"), "ab");
        assert_eq!(normalizer.process("    keep  indent"), "    keep indent");
    }

    #[test]
    fn test_standard_keeps_table_cells() {
        assert_eq!(normalize("| a |  |\n"), "| a |  |\n");
    }
}
