//! Pipe-table rendering for cell grids.

use crate::model::TableGrid;

/// Placeholder emitted for an empty or degenerate grid.
pub const DEFAULT_TABLE_PLACEHOLDER: &str = "*No data*";

/// Options for table rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Line emitted instead of a table when the grid has no cells
    pub placeholder: String,

    /// Maximum number of data rows to emit (None = all)
    pub max_rows: Option<usize>,
}

impl TableOptions {
    /// Create new table options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the empty-grid placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Cap the number of data rows.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_TABLE_PLACEHOLDER.to_string(),
            max_rows: None,
        }
    }
}

/// Render a grid as a Markdown pipe table.
///
/// The column count is fixed by the header row, or by the widest row when
/// the grid has no header (a `Column N` header is synthesized then). Data
/// rows are padded or truncated to that width. The result always ends with
/// a blank line.
pub fn render_table(table: &TableGrid, options: &TableOptions) -> String {
    let cols = table.column_count();
    if table.is_empty() {
        return format!("{}\n\n", options.placeholder);
    }

    let mut output = String::new();

    let body = table.body();
    let shown = match options.max_rows {
        Some(max) if body.len() > max => {
            output.push_str(&preview_note(max, body.len()));
            &body[..max]
        }
        _ => body,
    };

    match table.header() {
        Some(header) => output.push_str(&render_row(header, cols)),
        None => {
            let synthesized: Vec<String> = (1..=cols).map(|i| format!("Column {}", i)).collect();
            output.push_str(&render_row(&synthesized, cols));
        }
    }

    output.push('|');
    for _ in 0..cols {
        output.push_str(" --- |");
    }
    output.push('\n');

    for row in shown {
        output.push_str(&render_row(row, cols));
    }

    output.push('\n');
    output
}

/// Note emitted above a table cut down to its first `shown` rows.
pub fn preview_note(shown: usize, total: usize) -> String {
    format!("*Showing first {} rows of {} total rows*\n\n", shown, total)
}

/// Render one row, padded or truncated to exactly `cols` cells.
fn render_row(cells: &[String], cols: usize) -> String {
    let mut line = String::from("|");
    for i in 0..cols {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        line.push(' ');
        line.push_str(&escape_cell(cell));
        line.push_str(" |");
    }
    line.push('\n');
    line
}

/// Escape a cell value for use inside a pipe table.
pub fn escape_cell(cell: &str) -> String {
    let flat = cell.replace("\r\n", " ").replace(['\n', '\r'], " ");
    flat.trim().replace('|', "\\|")
}
