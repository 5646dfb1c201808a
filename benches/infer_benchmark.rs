//! Benchmarks for mdinfer inference performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the engine over synthetic extracted text and CSV data.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates synthetic extracted text with the given number of sections.
fn create_test_lines(section_count: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for i in 0..section_count {
        lines.push(format!("SECTION {} OVERVIEW", i + 1));
        lines.push(String::new());
        lines.push("The engine reads loose lines and decides what they are.".to_string());
        lines.push("This line continues the paragraph without a terminator".to_string());
        lines.push("and this one ends it.".to_string());
        lines.push("• first bullet".to_string());
        lines.push("- second bullet".to_string());
        lines.push(format!("{}. numbered item", i + 1));
        lines.push(String::new());
        lines.push("    fn main() {".to_string());
        lines.push("        println!(\"hi\");".to_string());
        lines.push("    }".to_string());
        lines.push(String::new());
    }

    lines
}

/// Creates a synthetic CSV file with the given number of rows.
fn create_test_csv(row_count: usize) -> Vec<u8> {
    let mut content = String::from("id,name,score,notes\n");
    for i in 0..row_count {
        content.push_str(&format!("{},user{},{},\"note, with comma\"\n", i, i, i * 7 % 100));
    }
    content.into_bytes()
}

/// Benchmark line classification alone.
fn bench_classifier(c: &mut Criterion) {
    let classifier = mdinfer::LineClassifier::default();
    let lines = create_test_lines(10);

    c.bench_function("classify_lines", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(classifier.classify_str(black_box(line)));
            }
        });
    });
}

/// Benchmark the full line pipeline at various sizes.
fn bench_infer_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer_lines");

    for section_count in [1, 10, 100].iter() {
        let lines = create_test_lines(*section_count);

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| mdinfer::convert_lines(black_box(&lines)));
        });
    }

    group.finish();
}

/// Benchmark CSV conversion through the registry.
fn bench_csv_conversion(c: &mut Criterion) {
    let registry = mdinfer::ConverterRegistry::with_defaults();
    let options = mdinfer::ConvertOptions::default();
    let data = create_test_csv(1000);

    c.bench_function("csv_1000_rows", |b| {
        b.iter(|| {
            registry
                .convert_bytes(black_box(&data), "bench.csv", &options)
                .unwrap()
        });
    });
}

/// Benchmark builder pattern overhead.
fn bench_builder_creation(c: &mut Criterion) {
    c.bench_function("builder_creation", |b| {
        b.iter(|| {
            let _builder = mdinfer::Mdinfer::new()
                .with_frontmatter()
                .with_heading_max_len(80)
                .with_normalize(mdinfer::NormalizePreset::Standard);
        });
    });
}

criterion_group!(
    benches,
    bench_classifier,
    bench_infer_lines,
    bench_csv_conversion,
    bench_builder_creation,
);
criterion_main!(benches);
