//! Rendering: tables, inline runs, document assembly and normalization.

mod inline;
mod json;
mod markdown;
mod normalize;
mod options;
mod result;
mod table;

pub use inline::{escape_emphasis, render_inline, render_run};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use normalize::{collapse_newlines, normalize, NormalizeOptions, NormalizePreset, Normalizer};
pub use options::RenderOptions;
pub use result::{ConversionStats, RenderResult};
pub use table::{escape_cell, preview_note, render_table, TableOptions, DEFAULT_TABLE_PLACEHOLDER};
