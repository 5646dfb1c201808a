//! Per-document conversion state.
//!
//! [`ConversionContext`] hosts the paragraph accumulator and the list and
//! code trackers. Lines arrive through [`ConversionContext::push_line`] and
//! native blocks through [`ConversionContext::push_block`]; both paths share
//! the same state, so a document may mix them freely.

use super::classify::LineClassifier;
use super::options::InferOptions;
use crate::model::{Block, LineKind, TableGrid, TextLine};
use crate::observer::ConversionObserver;
use crate::render::{render_table, ConversionStats, TableOptions};

const FENCE: &str = "```";

/// Structural state of the list and code trackers.
///
/// Lists and code blocks are mutually exclusive, and both are entered from
/// `Normal` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerState {
    /// Outside any list or code block
    #[default]
    Normal,
    /// Inside a list
    InList,
    /// Inside a fenced code block
    InCode,
}

/// Mutable state for converting one document.
pub struct ConversionContext<'o> {
    options: InferOptions,
    table_options: TableOptions,
    classifier: LineClassifier,
    state: TrackerState,
    paragraph: Vec<String>,
    held_blanks: usize,
    pending_rows: Vec<Vec<String>>,
    segments: Vec<String>,
    stats: ConversionStats,
    observer: Option<&'o mut dyn ConversionObserver>,
}

impl<'o> ConversionContext<'o> {
    /// Create a fresh context.
    pub fn new(options: &InferOptions) -> Self {
        Self {
            options: options.clone(),
            table_options: TableOptions::default(),
            classifier: LineClassifier::new(options),
            state: TrackerState::Normal,
            paragraph: Vec::new(),
            held_blanks: 0,
            pending_rows: Vec::new(),
            segments: Vec::new(),
            stats: ConversionStats::default(),
            observer: None,
        }
    }

    /// Set the options used for tables.
    pub fn with_table_options(mut self, options: TableOptions) -> Self {
        self.table_options = options;
        self
    }

    /// Attach an observer for this conversion.
    pub fn with_observer(mut self, observer: &'o mut dyn ConversionObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Current tracker state.
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Check whether a list is open.
    pub fn in_list(&self) -> bool {
        self.state == TrackerState::InList
    }

    /// Check whether a code block is open.
    pub fn in_code(&self) -> bool {
        self.state == TrackerState::InCode
    }

    /// Pending paragraph text, joined the way it will be emitted.
    pub fn pending_paragraph(&self) -> String {
        self.paragraph.join(" ")
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> &ConversionStats {
        &self.stats
    }

    /// Mutable access to the statistics, for section and title counts.
    pub fn stats_mut(&mut self) -> &mut ConversionStats {
        &mut self.stats
    }

    /// Access the attached observer, if any.
    pub fn observer(&mut self) -> Option<&mut (dyn ConversionObserver + 'o)> {
        self.observer.as_deref_mut()
    }

    /// Classify one raw line and apply it.
    pub fn push_line(&mut self, raw: &str) {
        let line = TextLine::new(raw);
        let kind = self.classifier.classify(&line);
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_line(&line, &kind);
        }
        self.apply_line(kind);
    }

    /// Classify and apply a sequence of raw lines.
    pub fn push_lines<S: AsRef<str>>(&mut self, lines: impl IntoIterator<Item = S>) {
        for line in lines {
            self.push_line(line.as_ref());
        }
    }

    /// Apply an already-classified line.
    pub fn apply_line(&mut self, kind: LineKind) {
        self.flush_rows();

        if self.in_code() {
            match kind {
                LineKind::Indented(code) => {
                    self.code_line(&code);
                    return;
                }
                LineKind::Blank => {
                    self.held_blanks += 1;
                    return;
                }
                _ => self.close_code(),
            }
        }

        if self.in_list() && !kind.is_list_item() {
            self.close_list();
        }

        match kind {
            LineKind::Blank => self.flush_paragraph(),
            LineKind::Indented(code) => self.code_line(&code),
            LineKind::Heading(text) => {
                let level = self.options.heading.level.clamp(1, 6);
                self.heading(level, &text);
            }
            LineKind::Bullet { glyph, text } => {
                let marker = self.options.bullets.marker(Some(glyph));
                self.list_item(marker.to_string(), &text);
            }
            LineKind::Numbered { ordinal, text } => {
                self.list_item(format!("{}.", ordinal), &text);
            }
            LineKind::Plain(text) => self.append_paragraph(&text),
        }
    }

    /// Apply a native block, bypassing the classifier.
    pub fn push_block(&mut self, block: Block) {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_block(&block);
        }

        if !matches!(block, Block::TableRow(_)) {
            self.flush_rows();
        }

        if self.in_code() {
            match block {
                Block::CodeLine(code) => {
                    self.code_line(&code);
                    return;
                }
                Block::Blank => {
                    self.held_blanks += 1;
                    return;
                }
                _ => self.close_code(),
            }
        }

        if self.in_list() && !block.is_list_item() {
            self.close_list();
        }

        match block {
            Block::Blank => self.flush_paragraph(),
            Block::Heading { level, text } => self.heading(level.clamp(1, 6), &text),
            Block::Paragraph(text) => {
                self.flush_paragraph();
                let text = text.trim();
                if !text.is_empty() {
                    self.emit_paragraph(text.to_string());
                }
            }
            Block::ListItem { ordinal, text } => {
                let prefix = match ordinal {
                    Some(ordinal) => format!("{}.", ordinal),
                    None => self.options.bullets.marker(None).to_string(),
                };
                self.list_item(prefix, text.trim());
            }
            Block::CodeLine(code) => self.code_line(&code),
            Block::TableRow(cells) => {
                self.flush_paragraph();
                self.pending_rows.push(cells);
            }
            Block::CodeBlock { language, code } => {
                self.flush_paragraph();
                let code = code.trim_end_matches(['\n', '\r']);
                self.emit(format!(
                    "{}{}\n{}\n{}\n\n",
                    FENCE,
                    language.as_deref().unwrap_or(""),
                    code,
                    FENCE
                ));
                self.stats.add_code_block();
            }
            Block::Quote(text) => {
                self.flush_paragraph();
                let mut quoted = String::new();
                for line in text.trim_end().lines() {
                    let line = line.trim_end();
                    if line.is_empty() {
                        quoted.push_str(">\n");
                    } else {
                        quoted.push_str("> ");
                        quoted.push_str(line);
                        quoted.push('\n');
                    }
                }
                if !quoted.is_empty() {
                    quoted.push('\n');
                    self.stats.count_text(&text);
                    self.emit(quoted);
                }
            }
            Block::Image { alt, src } => {
                self.flush_paragraph();
                self.emit(format!("![{}]({})\n\n", alt, src));
            }
            Block::Link { text, href } => {
                self.flush_paragraph();
                self.stats.count_text(&text);
                self.emit(format!("[{}]({})\n\n", text, href));
            }
            Block::Rule => {
                self.flush_paragraph();
                self.emit("---\n\n".to_string());
            }
        }
    }

    /// Render a table grid in place.
    pub fn push_table(&mut self, table: &TableGrid) {
        self.flush_rows();
        self.close_structures();
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_table(table);
        }
        self.emit_table(table);
    }

    /// Emit a heading at an explicit level, closing any open structure.
    pub fn push_heading(&mut self, level: u8, text: &str) {
        self.flush_rows();
        self.close_structures();
        self.heading(level.clamp(1, 6), text);
    }

    /// Close every open structure and return the emitted Markdown.
    pub fn finish(self) -> String {
        self.finish_with_stats().0
    }

    /// Close every open structure and return Markdown plus statistics.
    pub fn finish_with_stats(mut self) -> (String, ConversionStats) {
        self.flush_rows();
        self.close_structures();
        (self.segments.concat(), self.stats)
    }

    fn close_structures(&mut self) {
        match self.state {
            TrackerState::InCode => self.close_code(),
            TrackerState::InList => self.close_list(),
            TrackerState::Normal => {}
        }
        self.flush_paragraph();
    }

    fn emit(&mut self, segment: String) {
        self.segments.push(segment);
    }

    fn append_paragraph(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        self.paragraph.push(fragment.to_string());
        if self.options.paragraphs.flushes_after(fragment) {
            self.flush_paragraph();
        }
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = self.paragraph.join(" ");
        self.paragraph.clear();
        self.emit_paragraph(text);
    }

    fn emit_paragraph(&mut self, text: String) {
        self.stats.add_paragraph();
        self.stats.count_text(&text);
        self.emit(text + "\n\n");
    }

    fn heading(&mut self, level: u8, text: &str) {
        self.flush_paragraph();
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.stats.add_heading();
        self.stats.count_text(text);
        self.emit(format!("{} {}\n\n", "#".repeat(level as usize), text));
    }

    fn list_item(&mut self, prefix: String, text: &str) {
        if !self.in_list() {
            self.flush_paragraph();
            self.state = TrackerState::InList;
        }
        self.stats.add_list_item();
        self.stats.count_text(text);
        self.emit(format!("{} {}\n", prefix, text));
    }

    fn close_list(&mut self) {
        if self.in_list() {
            self.state = TrackerState::Normal;
            self.emit("\n".to_string());
        }
    }

    fn code_line(&mut self, code: &str) {
        if !self.in_code() {
            self.flush_paragraph();
            let language = self.options.code_language.clone().unwrap_or_default();
            self.emit(format!("{}{}\n", FENCE, language));
            self.state = TrackerState::InCode;
        }
        for _ in 0..self.held_blanks {
            self.emit("\n".to_string());
        }
        self.held_blanks = 0;
        self.stats.count_text(code);
        self.emit(format!("{}\n", code));
    }

    fn close_code(&mut self) {
        if self.in_code() {
            self.held_blanks = 0;
            self.state = TrackerState::Normal;
            self.stats.add_code_block();
            self.emit(format!("{}\n\n", FENCE));
        }
    }

    fn flush_rows(&mut self) {
        if self.pending_rows.is_empty() {
            return;
        }
        let table = TableGrid::from_rows(std::mem::take(&mut self.pending_rows));
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_table(&table);
        }
        self.emit_table(&table);
    }

    fn emit_table(&mut self, table: &TableGrid) {
        self.stats.add_table();
        self.stats.count_text(&table.plain_text());
        let rendered = render_table(table, &self.table_options);
        self.emit(rendered);
    }
}
