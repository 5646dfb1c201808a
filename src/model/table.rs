//! Table grid type.

use serde::{Deserialize, Serialize};

/// A table structure as plain cell strings.
///
/// Rows may be jagged; the renderer pads or truncates them against the
/// header width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    /// Rows in the table
    pub rows: Vec<Vec<String>>,

    /// Whether row 0 is the header
    pub has_header: bool,
}

impl Default for TableGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl TableGrid {
    /// Create a new empty table whose first row will be the header.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            has_header: true,
        }
    }

    /// Create an empty table without a header row.
    pub fn headerless() -> Self {
        Self {
            rows: Vec::new(),
            has_header: false,
        }
    }

    /// Create a table from rows of values; row 0 is the header.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for row in rows {
            table.add_row(row);
        }
        table
    }

    /// Set whether row 0 is the header and return self.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Add a row to the table.
    pub fn add_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Get the number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of data rows (excluding the header).
    pub fn data_row_count(&self) -> usize {
        if self.has_header {
            self.rows.len().saturating_sub(1)
        } else {
            self.rows.len()
        }
    }

    /// Get the number of columns: header width, or widest row without a header.
    pub fn column_count(&self) -> usize {
        if self.has_header {
            self.rows.first().map(|r| r.len()).unwrap_or(0)
        } else {
            self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
        }
    }

    /// Check if the table has nothing to render.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.column_count() == 0
    }

    /// Get the header row, if any.
    pub fn header(&self) -> Option<&[String]> {
        if self.has_header {
            self.rows.first().map(|r| r.as_slice())
        } else {
            None
        }
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[Vec<String>] {
        if self.has_header && !self.rows.is_empty() {
            &self.rows[1..]
        } else {
            &self.rows
        }
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = TableGrid::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
        assert!(table.header().is_none());
    }

    #[test]
    fn test_table_with_data() {
        let table = TableGrid::from_rows([vec!["Name", "Age"], vec!["Alice", "30"], vec!["Bob"]]);

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.data_row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.header().unwrap(), ["Name", "Age"]);
        assert_eq!(table.body().len(), 2);
    }

    #[test]
    fn test_headerless_uses_widest_row() {
        let table = TableGrid::from_rows([vec!["a"], vec!["b", "c", "d"]]).with_header(false);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.body().len(), 2);
        assert_eq!(table.data_row_count(), 2);
    }

    #[test]
    fn test_zero_width_header_is_empty() {
        let mut table = TableGrid::new();
        table.add_row(Vec::<String>::new());
        table.add_row(["orphan"]);
        assert!(table.is_empty());
    }
}
