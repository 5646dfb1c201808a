//! Document model types for structure inference.
//!
//! This module defines the intermediate representation shared by the
//! line classifier, the block trackers and the renderers. Adapters build
//! a [`Document`] out of sections holding raw lines, native blocks or
//! table grids; everything downstream is format-agnostic.

mod block;
mod document;
mod inline;
mod line;
mod table;

pub use block::Block;
pub use document::{title_from_file_name, Document, Metadata, Section, SectionPart};
pub use inline::{InlineContent, TextRun, TextStyle};
pub use line::{LineKind, TextLine};
pub use table::TableGrid;
