//! Integration tests for conversion observers.

use std::sync::{Arc, Mutex};

use mdinfer::render::MarkdownRenderer;
use mdinfer::{
    Block, CompositeObserver, ConversionObserver, ConversionStats, ConvertOptions,
    ConverterRegistry, Document, LineKind, RenderOptions, Section, TableGrid, TextLine,
};

/// Observer that records event names in order.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl ConversionObserver for Recorder {
    fn on_section(&mut self, heading: Option<&str>) {
        self.events.push(format!("section:{}", heading.unwrap_or("-")));
    }

    fn on_line(&mut self, _line: &TextLine, kind: &LineKind) {
        self.events.push(format!("line:{}", kind.name()));
    }

    fn on_block(&mut self, block: &Block) {
        self.events.push(format!("block:{}", block.name()));
    }

    fn on_table(&mut self, table: &TableGrid) {
        self.events.push(format!("table:{}", table.column_count()));
    }

    fn on_enhancement_skipped(&mut self, source: &str) {
        self.events.push(format!("skipped:{}", source));
    }

    fn on_finish(&mut self, stats: &ConversionStats) {
        self.events.push(format!("finish:{}", stats.section_count));
    }
}

/// Observer that shares its counter so a composite can own it.
struct SharedCounter(Arc<Mutex<usize>>);

impl ConversionObserver for SharedCounter {
    fn on_line(&mut self, _line: &TextLine, _kind: &LineKind) {
        if let Ok(mut count) = self.0.lock() {
            *count += 1;
        }
    }
}

fn sample_document() -> Document {
    let mut doc = Document::from_source("report.txt");
    doc.add_section(Section::titled("Page 1").with_lines(["INTRO", "", "* item"]));
    doc.add_section(
        Section::new()
            .with_blocks([Block::paragraph("native")])
            .with_table(TableGrid::from_rows([vec!["a", "b"], vec!["1", "2"]])),
    );
    doc
}

#[test]
fn test_renderer_reports_events_in_order() {
    let renderer = MarkdownRenderer::new(RenderOptions::default());
    let mut recorder = Recorder::default();
    renderer.render_observed(&sample_document(), &mut recorder);

    assert_eq!(
        recorder.events,
        vec![
            "section:Page 1",
            "line:heading",
            "line:blank",
            "line:bullet",
            "section:-",
            "block:paragraph",
            "table:2",
            "finish:2",
        ]
    );
}

#[test]
fn test_observed_output_matches_unobserved() {
    let renderer = MarkdownRenderer::new(RenderOptions::default());
    let doc = sample_document();
    let mut recorder = Recorder::default();
    assert_eq!(renderer.render_observed(&doc, &mut recorder), renderer.render(&doc));
}

#[test]
fn test_grouped_rows_reported_once() {
    let renderer = MarkdownRenderer::default();
    let mut doc = Document::new();
    doc.add_section(Section::new().with_blocks([
        Block::row(["h"]),
        Block::row(["1"]),
        Block::Blank,
    ]));

    let mut recorder = Recorder::default();
    renderer.render_observed(&doc, &mut recorder);
    let tables = recorder.events.iter().filter(|e| e.starts_with("table:")).count();
    assert_eq!(tables, 1);
}

#[test]
fn test_enhancement_request_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello.\n").unwrap();

    let registry = ConverterRegistry::with_defaults();
    let options = ConvertOptions::new().with_llm(true);
    let mut recorder = Recorder::default();
    let result = registry
        .convert_with_observer(&path, &options, &mut recorder)
        .unwrap();

    assert_eq!(result.content, "# notes\n\nhello.\n\n");
    let skipped: Vec<&String> = recorder
        .events
        .iter()
        .filter(|e| e.starts_with("skipped:"))
        .collect();
    assert_eq!(skipped.len(), 1);
    assert!(skipped[0].ends_with("notes.txt"));
}

#[test]
fn test_composite_fans_out() {
    let first = Arc::new(Mutex::new(0));
    let second = Arc::new(Mutex::new(0));
    let mut composite = CompositeObserver::new()
        .with_observer(SharedCounter(first.clone()))
        .with_observer(SharedCounter(second.clone()));

    let renderer = MarkdownRenderer::default();
    let mut doc = Document::new();
    doc.add_section(Section::new().with_lines(["one", "two", "three"]));
    renderer.render_observed(&doc, &mut composite);

    assert_eq!(*first.lock().unwrap(), 3);
    assert_eq!(*second.lock().unwrap(), 3);
}
