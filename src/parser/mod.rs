//! Normalization of generated section text.

mod assembler;
mod html_table;
pub mod markdown;
pub mod markup;
mod options;
mod paragraph;
mod provenance;
mod table_detector;

pub use assembler::{
    assemble_section, prepare_text, split_parts, trace_section, BlockIdAllocator, SectionPart,
    SectionTrace,
};
pub use html_table::convert_html_tables;
pub use markdown::sections_from_markdown;
pub use options::{DocumentDefaults, LevelThresholds, PipelineOptions};
pub use paragraph::{classify_level, clean_paragraph, text_to_items};
pub use provenance::{extract_segments, normalize_cell, to_marked_text, visible_text};
pub use table_detector::{is_formatting_row, is_table_line, TableCandidate};
