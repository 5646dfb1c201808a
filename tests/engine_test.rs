//! Integration tests for the inference engine.

use mdinfer::infer::{infer_blocks, infer_lines};
use mdinfer::render::{collapse_newlines, NormalizePreset, Normalizer};
use mdinfer::{
    convert_blocks, convert_lines, convert_lines_with_options, normalize, Block, BulletStyle,
    ConversionContext, InferOptions, LineKind, ParagraphPolicy, TextLine, TrackerState,
};

#[test]
fn test_heading_then_sentence_paragraphs() {
    let md = convert_lines(["ALL CAPS TITLE", "", "para one.", "para two continues."]);
    assert_eq!(md, "## ALL CAPS TITLE\n\npara one.\n\npara two continues.\n\n");
}

#[test]
fn test_list_closed_by_blank_then_paragraph() {
    let md = convert_lines(["* a", "* b", "", "next"]);
    assert_eq!(md, "* a\n* b\n\nnext\n\n");
}

#[test]
fn test_numbered_ordinals_preserved() {
    let md = convert_lines(["3. third", "4. fourth"]);
    assert!(md.contains("3. third\n"));
    assert!(md.contains("4. fourth\n"));
    assert!(!md.contains("1. "));
}

#[test]
fn test_blank_line_policy_joins_sentences() {
    let options = InferOptions::new().with_paragraph_policy(ParagraphPolicy::BlankLine);
    let md = convert_lines_with_options(["para one.", "para two.", "", "three"], &options);
    assert_eq!(md, "para one. para two.\n\nthree\n\n");
}

#[test]
fn test_sentence_policy_keeps_unterminated_runs_together() {
    let md = convert_lines(["a line that wraps", "onto the next one.", "tail"]);
    assert_eq!(md, "a line that wraps onto the next one.\n\ntail\n\n");
}

#[test]
fn test_code_block_fenced_and_dedented() {
    let md = convert_lines(["intro:", "    let x = 1;", "", "        nested", "after"]);
    assert_eq!(md, "## intro:\n\n```\nlet x = 1;\n\n    nested\n```\n\nafter\n\n");
}

#[test]
fn test_code_block_closed_at_end_of_input() {
    let md = convert_lines(["\tonly code", ""]);
    assert_eq!(md, "```\nonly code\n```\n\n");
}

#[test]
fn test_code_language_tag() {
    let options = InferOptions::new().with_code_language("rust");
    let md = convert_lines_with_options(["    fn main() {}"], &options);
    assert!(md.starts_with("```rust\n"));
}

#[test]
fn test_code_detection_disabled() {
    let options = InferOptions::new().with_code_detection(false);
    let md = convert_lines_with_options(["    indented words"], &options);
    assert_eq!(md, "indented words\n\n");
}

#[test]
fn test_bullets_normalized_and_preserved() {
    let lines = ["• one", "- two", "+ three"];
    assert_eq!(convert_lines(lines), "* one\n* two\n* three\n\n");

    let options = InferOptions::new().with_bullet_style(BulletStyle::Preserve);
    let md = convert_lines_with_options(lines, &options);
    assert_eq!(md, "• one\n- two\n+ three\n\n");
}

#[test]
fn test_glyph_without_space_is_plain() {
    let md = convert_lines(["-dash", "*star"]);
    assert_eq!(md, "-dash *star\n\n");
}

#[test]
fn test_heading_threshold_is_exclusive() {
    let at_limit = "A".repeat(50);
    let below = "A".repeat(49);
    assert_eq!(convert_lines([&at_limit]), format!("{}\n\n", at_limit));
    assert_eq!(convert_lines([&below]), format!("## {}\n\n", below));
}

#[test]
fn test_list_then_code_closes_list_first() {
    let md = convert_lines(["* item", "    code"]);
    assert_eq!(md, "* item\n\n```\ncode\n```\n\n");
}

#[test]
fn test_tracker_states_never_overlap() {
    let lines = [
        "* a", "    code", "1. one", "", "    x", "- b", "plain.", "\tmore", "* c",
    ];
    let options = InferOptions::default();
    let mut ctx = ConversionContext::new(&options);
    for line in lines {
        ctx.push_line(line);
        assert!(!(ctx.in_list() && ctx.in_code()));
        if ctx.state() != TrackerState::Normal {
            assert!(ctx.pending_paragraph().is_empty());
        }
    }
    let md = ctx.finish();
    assert!(md.ends_with("* c\n\n"));
}

#[test]
fn test_apply_classified_lines() {
    let options = InferOptions::default();
    let mut ctx = ConversionContext::new(&options);
    ctx.apply_line(LineKind::Heading("Results".into()));
    ctx.apply_line(LineKind::Numbered {
        ordinal: "7".into(),
        text: "seventh".into(),
    });
    assert_eq!(ctx.finish(), "## Results\n\n7. seventh\n\n");
}

#[test]
fn test_text_line_fields() {
    let line = TextLine::new("\t  code  ");
    assert!(line.is_indented());
    assert!(!line.is_blank());
    assert_eq!(line.content(), "code");
}

#[test]
fn test_native_blocks_bypass_classifier() {
    let md = convert_blocks([
        Block::heading(2, "short:"),
        Block::paragraph("ALL CAPS BUT A PARAGRAPH"),
        Block::bullet("x"),
        Block::numbered("10", "ten"),
        Block::paragraph("after"),
    ]);
    assert_eq!(
        md,
        "## short:\n\nALL CAPS BUT A PARAGRAPH\n\n* x\n10. ten\n\nafter\n\n"
    );
}

#[test]
fn test_native_heading_levels_clamped() {
    let md = infer_blocks([Block::heading(9, "deep"), Block::heading(0, "top")], &InferOptions::default());
    assert_eq!(md, "###### deep\n\n# top\n\n");
}

#[test]
fn test_table_rows_grouped() {
    let md = convert_blocks([
        Block::row(["H1", "H2"]),
        Block::row(["a"]),
        Block::row(["b", "c", "d"]),
        Block::paragraph("below"),
    ]);
    assert_eq!(
        md,
        "| H1 | H2 |\n| --- | --- |\n| a |  |\n| b | c |\n\nbelow\n\n"
    );
}

#[test]
fn test_rich_blocks() {
    let md = convert_blocks([
        Block::Quote("quoted line\n\nsecond".into()),
        Block::Image {
            alt: "chart".into(),
            src: "img/chart.png".into(),
        },
        Block::Link {
            text: "site".into(),
            href: "https://example.com".into(),
        },
        Block::Rule,
        Block::CodeBlock {
            language: Some("sh".into()),
            code: "ls -la\n".into(),
        },
    ]);
    assert_eq!(
        md,
        "> quoted line\n>\n> second\n\n![chart](img/chart.png)\n\n[site](https://example.com)\n\n---\n\n```sh\nls -la\n```\n\n"
    );
}

#[test]
fn test_mixed_lines_and_blocks_share_state() {
    let options = InferOptions::default();
    let mut ctx = ConversionContext::new(&options);
    ctx.push_line("* from text");
    ctx.push_block(Block::bullet("from block"));
    ctx.push_line("done.");
    assert_eq!(ctx.finish(), "* from text\n* from block\n\ndone.\n\n");
}

#[test]
fn test_no_triple_newlines_after_normalize() {
    let inputs: [&[&str]; 4] = [
        &["", "", "", "a", "", "", ""],
        &["* a", "", "", "", "b"],
        &["    c", "", "", "", "", "    d"],
        &["X:", "", "", "Y:", "", ""],
    ];
    for lines in inputs {
        let md = convert_lines(lines.iter().copied());
        assert!(!md.contains("\n\n\n"), "{:?}", md);
    }

    let raw = infer_lines(["    a", "", "", "", "    b"], &InferOptions::default());
    assert!(raw.contains("\n\n\n"));
    assert!(!normalize(&raw).contains("\n\n\n"));
}

#[test]
fn test_normalize_idempotent() {
    let samples = [
        "",
        "\n\n\n\n",
        "a\r\n\r\n\r\n\r\nb",
        "trailing   \n\n\n  \n\nx",
        "e\u{301} \u{FB01}ne \u{FFFD}",
        "a  b   c\n\n\n",
    ];
    for preset in [
        NormalizePreset::Minimal,
        NormalizePreset::Standard,
        NormalizePreset::Aggressive,
    ] {
        let normalizer = Normalizer::from_preset(preset);
        for sample in samples {
            let once = normalizer.process(sample);
            assert_eq!(normalizer.process(&once), once);
            assert!(!once.contains("\n\n\n"));
        }
    }
    assert_eq!(collapse_newlines("a\n\n\n\nb"), "a\n\nb");
}

#[test]
fn test_empty_input() {
    assert_eq!(convert_lines(Vec::<String>::new()), "");
    assert_eq!(convert_blocks(Vec::new()), "");
    assert_eq!(convert_lines(["", "   ", "\t"]), "");
}
