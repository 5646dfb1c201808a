//! Source format detection.
//!
//! Formats are named by file extension first. Files without a usable
//! extension fall back to a magic-byte sniff of their header.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// ZIP local file header, used by DOCX/XLSX/PPTX containers.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

const SNIFF_LEN: usize = 16;

/// Source document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// HTML page
    Html,
    /// PDF document
    Pdf,
    /// Word document (OOXML)
    Docx,
    /// Legacy Word document
    Doc,
    /// Plain text
    Text,
    /// Markdown text
    Markdown,
    /// Excel workbook (OOXML)
    Xlsx,
    /// Legacy Excel workbook
    Xls,
    /// PowerPoint deck (OOXML)
    Pptx,
    /// Legacy PowerPoint deck
    Ppt,
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
    /// Raster image (OCR source)
    Image,
}

impl SourceFormat {
    /// Every known format.
    pub const ALL: [SourceFormat; 13] = [
        SourceFormat::Html,
        SourceFormat::Pdf,
        SourceFormat::Docx,
        SourceFormat::Doc,
        SourceFormat::Text,
        SourceFormat::Markdown,
        SourceFormat::Xlsx,
        SourceFormat::Xls,
        SourceFormat::Pptx,
        SourceFormat::Ppt,
        SourceFormat::Csv,
        SourceFormat::Tsv,
        SourceFormat::Image,
    ];

    /// Look up a format by extension, case-insensitively and with or without
    /// the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        let format = match ext.as_str() {
            "html" | "htm" => SourceFormat::Html,
            "pdf" => SourceFormat::Pdf,
            "docx" => SourceFormat::Docx,
            "doc" => SourceFormat::Doc,
            "txt" | "log" => SourceFormat::Text,
            "md" | "markdown" => SourceFormat::Markdown,
            "xlsx" => SourceFormat::Xlsx,
            "xls" => SourceFormat::Xls,
            "pptx" => SourceFormat::Pptx,
            "ppt" => SourceFormat::Ppt,
            "csv" => SourceFormat::Csv,
            "tsv" => SourceFormat::Tsv,
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "tiff" | "tif" => SourceFormat::Image,
            _ => return None,
        };
        Some(format)
    }

    /// File extensions accepted for this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            SourceFormat::Html => &["html", "htm"],
            SourceFormat::Pdf => &["pdf"],
            SourceFormat::Docx => &["docx"],
            SourceFormat::Doc => &["doc"],
            SourceFormat::Text => &["txt", "log"],
            SourceFormat::Markdown => &["md", "markdown"],
            SourceFormat::Xlsx => &["xlsx"],
            SourceFormat::Xls => &["xls"],
            SourceFormat::Pptx => &["pptx"],
            SourceFormat::Ppt => &["ppt"],
            SourceFormat::Csv => &["csv"],
            SourceFormat::Tsv => &["tsv"],
            SourceFormat::Image => &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif"],
        }
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::Html => "HTML",
            SourceFormat::Pdf => "PDF",
            SourceFormat::Docx => "DOCX",
            SourceFormat::Doc => "DOC",
            SourceFormat::Text => "Text",
            SourceFormat::Markdown => "Markdown",
            SourceFormat::Xlsx => "XLSX",
            SourceFormat::Xls => "XLS",
            SourceFormat::Pptx => "PPTX",
            SourceFormat::Ppt => "PPT",
            SourceFormat::Csv => "CSV",
            SourceFormat::Tsv => "TSV",
            SourceFormat::Image => "Image",
        }
    }

    /// Check whether the format is stored in a ZIP container.
    pub fn is_zip_container(&self) -> bool {
        matches!(
            self,
            SourceFormat::Docx | SourceFormat::Xlsx | SourceFormat::Pptx
        )
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Container signature found in a file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magic {
    /// `%PDF-`
    Pdf,
    /// `PK\x03\x04`
    Zip,
}

/// Sniff the container signature of a header.
pub fn sniff_bytes(data: &[u8]) -> Option<Magic> {
    if data.starts_with(PDF_MAGIC) {
        Some(Magic::Pdf)
    } else if data.starts_with(ZIP_MAGIC) {
        Some(Magic::Zip)
    } else {
        None
    }
}

/// Detect the format of a file.
///
/// The extension decides when present. Without one, a PDF header is
/// recognized; anything else is an error naming the file.
///
/// # Example
/// ```no_run
/// use mdinfer::detect::{detect_format_from_path, SourceFormat};
///
/// let format = detect_format_from_path("notes.txt").unwrap();
/// assert_eq!(format, SourceFormat::Text);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<SourceFormat> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => SourceFormat::from_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!(".{} files", ext))),
        None => {
            let mut header = Vec::with_capacity(SNIFF_LEN);
            File::open(path)?
                .take(SNIFF_LEN as u64)
                .read_to_end(&mut header)?;
            match sniff_bytes(&header) {
                Some(Magic::Pdf) => Ok(SourceFormat::Pdf),
                _ => Err(Error::NoExtension(path.to_path_buf())),
            }
        }
    }
}

/// Check that bytes claimed to be `format` carry the expected signature.
///
/// Text formats have no signature and always pass.
pub fn check_signature(format: SourceFormat, data: &[u8]) -> bool {
    match format {
        SourceFormat::Pdf => sniff_bytes(data) == Some(Magic::Pdf),
        f if f.is_zip_container() => sniff_bytes(data) == Some(Magic::Zip),
        _ => true,
    }
}
