//! Document model types handed to the HWPX renderer.
//!
//! This module defines the strict output representation that the
//! normalization pipeline produces from loosely structured generated text.
//! Every type here serializes to the JSON shape the renderer reads.

mod block;
mod document;
mod paragraph;
mod segment;
mod table;

pub use block::{ContentBlock, SectionBlock, TableBlock};
pub use document::{DocumentMetadata, DocumentModel};
pub use paragraph::{ItemColor, ItemSource, Level, ParagraphItem};
pub use segment::{ColoredSegment, ProvenanceColor};
pub use table::{TableData, MIN_COLUMNS};
