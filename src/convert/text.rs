//! Plain-text and Markdown source converter.

use crate::error::Result;
use crate::model::{Block, Document, Section};
use regex::Regex;

use super::{ConvertOptions, DocumentConverter};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Plain-text converter.
///
/// Invalid UTF-8 is replaced rather than rejected. Lines go through the
/// classifier. In Markdown sources, constructs the classifier cannot see are
/// kept native: ATX headings, fenced code, pipe-table rows and blockquotes.
#[derive(Debug, Clone)]
pub struct TextConverter {
    atx_heading: Regex,
    fence_open: Regex,
    table_delimiter: Regex,
}

/// An open code fence in a Markdown source.
struct Fence {
    marker: char,
    len: usize,
    language: Option<String>,
    body: Vec<String>,
}

impl Fence {
    fn closes_on(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.len() >= self.len && trimmed.chars().all(|c| c == self.marker)
    }

    fn into_block(self) -> Block {
        Block::CodeBlock {
            language: self.language,
            code: self.body.join("\n"),
        }
    }
}

impl TextConverter {
    /// Create a new text converter.
    pub fn new() -> Self {
        Self {
            atx_heading: Regex::new(r"^(#{1,6})\s+(.*?)(?:\s+#+)?\s*$").unwrap(),
            fence_open: Regex::new(r"^ {0,3}(`{3,}|~{3,})\s*([^`\s]*)").unwrap(),
            table_delimiter: Regex::new(r"^\s*\|?(\s*:?-+:?\s*\|)+\s*(:?-+:?)?\s*$").unwrap(),
        }
    }

    /// Build the document for decoded text.
    pub fn document_from_text(&self, text: &str, source_name: &str, markdown: bool) -> Document {
        let mut doc = Document::from_source(source_name);
        let mut section = Section::new();

        let mut pending: Vec<&str> = Vec::new();
        if !markdown {
            pending.extend(text.lines());
            flush_lines(&mut section, &mut pending);
            doc.add_section(section);
            return doc;
        }

        let mut quote: Vec<&str> = Vec::new();
        let mut fence: Option<Fence> = None;

        for line in text.lines() {
            if let Some(open) = fence.as_mut() {
                if open.closes_on(line) {
                    if let Some(done) = fence.take() {
                        section.push_block(done.into_block());
                    }
                } else {
                    open.body.push(line.to_string());
                }
                continue;
            }

            let quoted = quote_content(line);
            if quoted.is_none() && !quote.is_empty() {
                section.push_block(Block::Quote(quote.join("\n")));
                quote.clear();
            }

            let block = if let Some(content) = quoted {
                flush_lines(&mut section, &mut pending);
                quote.push(content);
                continue;
            } else if let Some(caps) = self.fence_open.captures(line) {
                let marker = caps[1].chars().next().unwrap_or('`');
                fence = Some(Fence {
                    marker,
                    len: caps[1].len(),
                    language: Some(caps[2].to_string()).filter(|l| !l.is_empty()),
                    body: Vec::new(),
                });
                flush_lines(&mut section, &mut pending);
                continue;
            } else if let Some(caps) = self.atx_heading.captures(line) {
                Block::heading(caps[1].len() as u8, &caps[2])
            } else if is_table_row(line) {
                if self.table_delimiter.is_match(line) {
                    continue;
                }
                Block::TableRow(split_table_row(line))
            } else {
                pending.push(line);
                continue;
            };

            flush_lines(&mut section, &mut pending);
            section.push_block(block);
        }

        if !quote.is_empty() {
            section.push_block(Block::Quote(quote.join("\n")));
        }
        if let Some(open) = fence {
            log::warn!("{}: unclosed code fence", source_name);
            section.push_block(open.into_block());
        }
        flush_lines(&mut section, &mut pending);

        doc.add_section(section);
        doc
    }
}

fn flush_lines(section: &mut Section, pending: &mut Vec<&str>) {
    if !pending.is_empty() {
        section.push_lines(pending.drain(..));
    }
}

/// Text of a blockquote line with its `>` marker removed.
fn quote_content(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() > 1 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// Split a pipe-table row into cells, honoring `\|` escapes.
fn split_table_row(line: &str) -> Vec<String> {
    let inner = line.trim();
    let inner = inner.strip_prefix('|').unwrap_or(inner);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                cell.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}

impl Default for TextConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentConverter for TextConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "md", "markdown", "log"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn read_bytes(
        &self,
        bytes: &[u8],
        source_name: &str,
        _options: &ConvertOptions,
    ) -> Result<Document> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let text = String::from_utf8_lossy(bytes);
        if matches!(text, std::borrow::Cow::Owned(_)) {
            log::warn!("{}: invalid UTF-8 replaced", source_name);
        }

        let markdown = source_name.to_ascii_lowercase().ends_with(".md")
            || source_name.to_ascii_lowercase().ends_with(".markdown");
        Ok(self.document_from_text(&text, source_name, markdown))
    }
}
