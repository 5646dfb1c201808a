//! Conversion observers.
//!
//! The engine never reaches for global state to report what it is doing.
//! Each conversion call is handed a [`ConversionObserver`] that receives
//! classification and emission events for that one document.
//!
//! # Example
//!
//! ```
//! use mdinfer::model::{LineKind, TextLine};
//! use mdinfer::observer::ConversionObserver;
//!
//! #[derive(Default)]
//! struct HeadingCounter(usize);
//!
//! impl ConversionObserver for HeadingCounter {
//!     fn on_line(&mut self, _line: &TextLine, kind: &LineKind) {
//!         if matches!(kind, LineKind::Heading(_)) {
//!             self.0 += 1;
//!         }
//!     }
//! }
//! ```

use crate::model::{Block, LineKind, TableGrid, TextLine};
use crate::render::ConversionStats;

/// Receives events from one conversion.
///
/// All methods default to doing nothing.
pub trait ConversionObserver {
    /// Called when the assembler starts a section.
    fn on_section(&mut self, heading: Option<&str>) {
        let _ = heading;
    }

    /// Called after a raw line has been classified.
    fn on_line(&mut self, line: &TextLine, kind: &LineKind) {
        let _ = (line, kind);
    }

    /// Called for every native block handed to the trackers.
    fn on_block(&mut self, block: &Block) {
        let _ = block;
    }

    /// Called before a table grid is rendered.
    fn on_table(&mut self, table: &TableGrid) {
        let _ = table;
    }

    /// Called when LLM enhancement was requested but is not available.
    fn on_enhancement_skipped(&mut self, source: &str) {
        let _ = source;
    }

    /// Called once the document has been emitted.
    fn on_finish(&mut self, stats: &ConversionStats) {
        let _ = stats;
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ConversionObserver for NoopObserver {}

/// Observer that forwards events to the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct LogObserver {
    source: Option<String>,
}

impl LogObserver {
    /// Create a log observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log observer that tags messages with a source name.
    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }

    fn source(&self) -> &str {
        self.source.as_deref().unwrap_or("<memory>")
    }
}

impl ConversionObserver for LogObserver {
    fn on_section(&mut self, heading: Option<&str>) {
        log::debug!(
            "{}: section {}",
            self.source(),
            heading.unwrap_or("(untitled)")
        );
    }

    fn on_line(&mut self, line: &TextLine, kind: &LineKind) {
        log::trace!("{}: {:>8} | {}", self.source(), kind.name(), line.stripped);
    }

    fn on_table(&mut self, table: &TableGrid) {
        log::debug!(
            "{}: table with {} rows x {} columns",
            self.source(),
            table.row_count(),
            table.column_count()
        );
    }

    fn on_enhancement_skipped(&mut self, source: &str) {
        log::info!("LLM enhancement requested but not implemented for {}", source);
    }

    fn on_finish(&mut self, stats: &ConversionStats) {
        log::debug!(
            "{}: {} headings, {} paragraphs, {} list items, {} code blocks, {} tables",
            self.source(),
            stats.heading_count,
            stats.paragraph_count,
            stats.list_item_count,
            stats.code_block_count,
            stats.table_count
        );
    }
}

/// Observer that fans events out to several observers in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Box<dyn ConversionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer to the chain.
    pub fn with_observer<O: ConversionObserver + 'static>(mut self, observer: O) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Get the number of chained observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check if no observers are chained.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl ConversionObserver for CompositeObserver {
    fn on_section(&mut self, heading: Option<&str>) {
        for observer in &mut self.observers {
            observer.on_section(heading);
        }
    }

    fn on_line(&mut self, line: &TextLine, kind: &LineKind) {
        for observer in &mut self.observers {
            observer.on_line(line, kind);
        }
    }

    fn on_block(&mut self, block: &Block) {
        for observer in &mut self.observers {
            observer.on_block(block);
        }
    }

    fn on_table(&mut self, table: &TableGrid) {
        for observer in &mut self.observers {
            observer.on_table(table);
        }
    }

    fn on_enhancement_skipped(&mut self, source: &str) {
        for observer in &mut self.observers {
            observer.on_enhancement_skipped(source);
        }
    }

    fn on_finish(&mut self, stats: &ConversionStats) {
        for observer in &mut self.observers {
            observer.on_finish(stats);
        }
    }
}
