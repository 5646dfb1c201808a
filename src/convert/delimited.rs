//! CSV and TSV source converter.

use crate::error::{Error, Result};
use crate::model::{Block, Document, Section, TableGrid};
use crate::render::preview_note;
use csv::ReaderBuilder;
use std::borrow::Cow;

use super::{ConvertOptions, DocumentConverter};

const SNIFF_BYTES: usize = 1024;

/// Delimited-text converter.
///
/// The first record is the header. Records may have any length; the table
/// renderer pads or truncates them.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvConverter {
    _private: (),
}

impl CsvConverter {
    /// Create a new CSV converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Parse records with the given delimiter.
    pub fn parse_records(&self, text: &str, delimiter: u8) -> Result<Vec<Vec<String>>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }
        Ok(rows)
    }

    /// Build the document for parsed records.
    pub fn document_from_records(
        &self,
        mut rows: Vec<Vec<String>>,
        source_name: &str,
        preview_rows: usize,
    ) -> Document {
        let mut doc = Document::from_source(source_name);
        let mut section = Section::new();

        if rows.is_empty() {
            section.push_block(Block::paragraph("*Empty CSV file.*"));
            doc.add_section(section);
            return doc;
        }

        // The summary counts the header row too.
        let summary = format!(
            "*CSV file with {} rows and {} columns.*",
            rows.len(),
            rows[0].len()
        );
        let data_rows = rows.len() - 1;
        if data_rows > preview_rows {
            section.push_block(Block::paragraph(preview_note(preview_rows, data_rows).trim()));
            rows.truncate(preview_rows + 1);
        }

        section.push_table(TableGrid::from_rows(rows));
        section.push_block(Block::paragraph(summary));
        doc.add_section(section);
        doc
    }
}

impl DocumentConverter for CsvConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["csv", "tsv"]
    }

    fn name(&self) -> &str {
        "csv"
    }

    fn read_bytes(
        &self,
        bytes: &[u8],
        source_name: &str,
        options: &ConvertOptions,
    ) -> Result<Document> {
        let text = decode(bytes);
        let delimiter = if source_name.to_ascii_lowercase().ends_with(".tsv") {
            b'\t'
        } else {
            sniff_delimiter(&text)
        };
        log::debug!(
            "{}: delimiter {:?}",
            source_name,
            char::from(delimiter)
        );

        let rows = self
            .parse_records(&text, delimiter)
            .map_err(|e| match e {
                Error::Csv(reason) => Error::Csv(format!("malformed record: {}", reason)),
                other => other,
            })?;
        Ok(self.document_from_records(rows, source_name, options.csv_preview_rows))
    }
}

/// Pick the delimiter from the first 1024 bytes.
///
/// `;` or tab wins when it occurs more often than `,`; otherwise `,`.
pub fn sniff_delimiter(text: &str) -> u8 {
    let sample = &text.as_bytes()[..text.len().min(SNIFF_BYTES)];
    let count = |b: u8| sample.iter().filter(|&&c| c == b).count();

    let commas = count(b',');
    let semicolons = count(b';');
    let tabs = count(b'\t');

    if semicolons > commas && semicolons >= tabs {
        b';'
    } else if tabs > commas {
        b'\t'
    } else {
        b','
    }
}

/// Decode as UTF-8, falling back to Latin-1 for legacy exports.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}
