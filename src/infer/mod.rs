//! Structure inference: line classification and block tracking.
//!
//! The [`LineClassifier`] tags raw lines; the [`ConversionContext`] turns
//! tagged lines and native blocks into Markdown segments. Both are driven
//! by one [`InferOptions`] value per document.

mod classify;
mod context;
mod options;

pub use classify::{is_all_uppercase, LineClassifier};
pub use context::{ConversionContext, TrackerState};
pub use options::{
    BulletStyle, HeadingRule, InferOptions, ParagraphPolicy, BULLET_GLYPHS,
    DEFAULT_HEADING_MAX_LEN, SENTENCE_TERMINATORS,
};

use crate::model::Block;

/// Convert raw lines to Markdown body text.
///
/// No title or normalization is applied; see [`crate::render`] for the
/// full document path.
pub fn infer_lines<S: AsRef<str>>(
    lines: impl IntoIterator<Item = S>,
    options: &InferOptions,
) -> String {
    let mut ctx = ConversionContext::new(options);
    ctx.push_lines(lines);
    ctx.finish()
}

/// Convert native blocks to Markdown body text.
pub fn infer_blocks(blocks: impl IntoIterator<Item = Block>, options: &InferOptions) -> String {
    let mut ctx = ConversionContext::new(options);
    for block in blocks {
        ctx.push_block(block);
    }
    ctx.finish()
}
