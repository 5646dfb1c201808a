//! Inline emphasis, link and image rendering.

use crate::model::{InlineContent, TextRun};

/// Render inline content to Markdown.
///
/// Adjacent runs with the same style are merged before markers are added,
/// so `**a****b**` never appears.
pub fn render_inline(items: &[InlineContent]) -> String {
    let mut output = String::new();
    let mut pending: Option<TextRun> = None;

    for item in items {
        match item {
            InlineContent::Text(run) => match pending.as_mut() {
                Some(current) if current.style == run.style => current.text.push_str(&run.text),
                _ => {
                    if let Some(done) = pending.take() {
                        output.push_str(&render_run(&done));
                    }
                    pending = Some(run.clone());
                }
            },
            InlineContent::Link { text, href } => {
                if let Some(done) = pending.take() {
                    output.push_str(&render_run(&done));
                }
                output.push_str(&format!("[{}]({})", text, href));
            }
            InlineContent::Image { alt, src } => {
                if let Some(done) = pending.take() {
                    output.push_str(&render_run(&done));
                }
                output.push_str(&format!("![{}]({})", alt, src));
            }
        }
    }

    if let Some(done) = pending {
        output.push_str(&render_run(&done));
    }

    output
}

/// Render one styled run.
///
/// Markers wrap the trimmed text; surrounding whitespace stays outside so
/// `** bold **` is never produced.
pub fn render_run(run: &TextRun) -> String {
    let style = run.style;
    if !style.has_styling() {
        return run.text.clone();
    }

    let trimmed = run.text.trim();
    if trimmed.is_empty() {
        return run.text.clone();
    }

    let leading = &run.text[..run.text.len() - run.text.trim_start().len()];
    let trailing = &run.text[run.text.trim_end().len()..];

    let body = if style.code {
        let fence = if trimmed.contains('`') { "``" } else { "`" };
        format!("{fence}{trimmed}{fence}")
    } else {
        let marker = match (style.bold, style.italic) {
            (true, true) => "***",
            (true, false) => "**",
            _ => "*",
        };
        format!("{marker}{}{marker}", escape_emphasis(trimmed))
    };

    format!("{leading}{body}{trailing}")
}

/// Escape characters that would end or nest emphasis.
pub fn escape_emphasis(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '_' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasis_markers() {
        assert_eq!(render_run(&TextRun::bold("strong")), "**strong**");
        assert_eq!(render_run(&TextRun::italic("soft")), "*soft*");
        assert_eq!(render_run(&TextRun::bold_italic("both")), "***both***");
        assert_eq!(render_run(&TextRun::code("x = 1")), "`x = 1`");
        assert_eq!(render_run(&TextRun::new("plain *star*")), "plain *star*");
    }

    #[test]
    fn test_whitespace_outside_markers() {
        assert_eq!(render_run(&TextRun::bold(" word ")), " **word** ");
        assert_eq!(render_run(&TextRun::italic("   ")), "   ");
    }

    #[test]
    fn test_escape_inside_runs() {
        assert_eq!(render_run(&TextRun::bold("a*b_c")), "**a\\*b\\_c**");
        assert_eq!(render_run(&TextRun::code("a`b")), "``a`b``");
    }

    #[test]
    fn test_render_inline_merges_runs() {
        let items = vec![
            InlineContent::from(TextRun::new("See ")),
            TextRun::bold("this").into(),
            TextRun::bold(" now").into(),
            TextRun::new(" or ").into(),
            InlineContent::Link {
                text: "docs".into(),
                href: "https://example.com".into(),
            },
            InlineContent::Image {
                alt: "icon".into(),
                src: "i.png".into(),
            },
        ];
        assert_eq!(
            render_inline(&items),
            "See **this now** or [docs](https://example.com)![icon](i.png)"
        );
    }
}
