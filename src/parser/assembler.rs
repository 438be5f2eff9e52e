//! Section content assembly.
//!
//! One raw section text becomes an ordered list of content blocks:
//!
//! 1. a pre-pass normalizes markup (color spans, HTML tables, breaks, tags)
//! 2. a line scanner splits the text into text runs and table runs
//! 3. table runs are promoted to tables or demoted back into text
//! 4. text runs become paragraph items
//!
//! Block ids are derived from the section index and the number of tables
//! emitted so far, see [`BlockIdAllocator`].

use serde::Serialize;

use crate::model::{ContentBlock, ParagraphItem, SectionBlock, TableBlock, TableData};

use super::html_table::convert_html_tables;
use super::markup::{self, Stage};
use super::options::{LevelThresholds, PipelineOptions};
use super::paragraph::text_to_items;
use super::provenance::{extract_segments, to_marked_text};
use super::table_detector::{is_table_line, TableCandidate};

const PRE_TABLE: &[Stage] = &[
    Stage::NormalizeUnicode,
    Stage::ConvertColorSpans,
    Stage::FlattenMarkers,
];

const POST_TABLE: &[Stage] = &[
    Stage::NormalizeBreaks,
    Stage::StripInlineTags,
    Stage::StripTags,
    Stage::DecodeEntities,
];

/// A piece of a section after line scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SectionPart {
    /// A run of text lines (including demoted table lines)
    Text(String),
    /// A validated table
    Table(TableData),
}

/// Intermediate results for one section, kept for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct SectionTrace {
    /// Zero-based section index
    pub index: usize,
    /// Section title
    pub title: String,
    /// Text after the markup pre-pass
    pub prepared: String,
    /// Scanned parts, in order
    pub parts: Vec<SectionPart>,
    /// Final content blocks
    pub blocks: Vec<ContentBlock>,
}

/// Hands out block ids for one section.
///
/// `n` is the one-based section number and `k` the number of tables
/// emitted so far. A text run between tables `k` and `k + 1` is
/// `section{n}_part{k}`; the run after the last table is
/// `section{n}_part{k + 1}`.
#[derive(Debug, Clone)]
pub struct BlockIdAllocator {
    section: usize,
    tables: usize,
}

impl BlockIdAllocator {
    /// Create an allocator for the zero-based section `index`.
    pub fn new(index: usize) -> Self {
        Self {
            section: index + 1,
            tables: 0,
        }
    }

    /// Number of tables emitted so far.
    pub fn tables(&self) -> usize {
        self.tables
    }

    /// Id for a text block at the current position:
    /// `section{n}` before any table, `section{n}_part{k}` after table `k`.
    pub fn section_id(&self) -> String {
        if self.tables == 0 {
            format!("section{}", self.section)
        } else {
            format!("section{}_part{}", self.section, self.tables)
        }
    }

    /// Id for the text run that closes the section: `section{n}` when no
    /// table was emitted, `section{n}_part{k + 1}` otherwise.
    pub fn trailing_section_id(&self) -> String {
        if self.tables == 0 {
            format!("section{}", self.section)
        } else {
            format!("section{}_part{}", self.section, self.tables + 1)
        }
    }

    /// Id for the next table: `table_s{n}_{k}`.
    pub fn next_table_id(&mut self) -> String {
        self.tables += 1;
        format!("table_s{}_{}", self.section, self.tables)
    }
}

/// Assemble one section into content blocks.
///
/// Never fails and never returns an empty list: a section with no content
/// yields one empty `section{n}` block carrying the title.
pub fn assemble_section(
    index: usize,
    title: &str,
    raw: &str,
    options: &PipelineOptions,
) -> Vec<ContentBlock> {
    trace_section(index, title, raw, options).blocks
}

/// Assemble one section, keeping the intermediate results.
pub fn trace_section(
    index: usize,
    title: &str,
    raw: &str,
    options: &PipelineOptions,
) -> SectionTrace {
    let prepared = prepare_text(raw);
    let parts = split_parts(&prepared);
    let blocks = build_blocks(index, title, &parts, &options.thresholds);

    log::debug!(
        "section {} assembled: {} parts, {} blocks",
        index + 1,
        parts.len(),
        blocks.len()
    );

    SectionTrace {
        index,
        title: title.to_string(),
        prepared,
        parts,
        blocks,
    }
}

/// Markup pre-pass run on the whole raw section text.
pub fn prepare_text(raw: &str) -> String {
    let text = markup::run_stages(raw, PRE_TABLE);
    let text = convert_html_tables(&text);
    markup::run_stages(&text, POST_TABLE)
}

/// Split prepared text into text runs and tables.
///
/// A run of table lines that fails validation is demoted into the
/// surrounding text run with its lines unchanged.
pub fn split_parts(text: &str) -> Vec<SectionPart> {
    let mut scanner = PartScanner::default();

    for line in text.lines() {
        if is_table_line(line) {
            scanner.candidate.push(line);
        } else {
            scanner.close_table();
            scanner.text_run.push(line.to_string());
        }
    }
    scanner.close_table();
    scanner.flush_text();

    scanner.parts
}

#[derive(Default)]
struct PartScanner {
    parts: Vec<SectionPart>,
    text_run: Vec<String>,
    candidate: TableCandidate,
}

impl PartScanner {
    fn close_table(&mut self) {
        if self.candidate.is_empty() {
            return;
        }

        let candidate = self.candidate.take();
        match candidate.parse() {
            Some(table) => {
                self.flush_text();
                self.parts.push(SectionPart::Table(table));
            }
            None => {
                log::debug!("demoting {} table lines to text", candidate.len());
                self.text_run.extend(candidate.demote());
            }
        }
    }

    fn flush_text(&mut self) {
        let lines = std::mem::take(&mut self.text_run);
        if lines.iter().any(|l| !l.trim().is_empty()) {
            self.parts.push(SectionPart::Text(lines.join("\n")));
        }
    }
}

fn build_blocks(
    index: usize,
    title: &str,
    parts: &[SectionPart],
    thresholds: &LevelThresholds,
) -> Vec<ContentBlock> {
    let mut ids = BlockIdAllocator::new(index);
    let mut blocks = Vec::new();

    for (i, part) in parts.iter().enumerate() {
        match part {
            SectionPart::Text(text) => {
                let items = run_items(text, thresholds);
                if items.is_empty() {
                    continue;
                }
                let id = if i + 1 == parts.len() {
                    ids.trailing_section_id()
                } else {
                    ids.section_id()
                };
                let block_title = if ids.tables() == 0 { title } else { "" };
                blocks.push(ContentBlock::Section(SectionBlock::new(
                    id,
                    block_title,
                    items,
                )));
            }
            SectionPart::Table(table) => {
                if blocks.is_empty() && !title.trim().is_empty() {
                    blocks.push(ContentBlock::Section(SectionBlock::new(
                        ids.section_id(),
                        title,
                        Vec::new(),
                    )));
                }
                blocks.push(ContentBlock::Table(TableBlock::new(
                    ids.next_table_id(),
                    table.clone(),
                )));
            }
        }
    }

    if blocks.is_empty() {
        blocks.push(ContentBlock::Section(SectionBlock::new(
            ids.section_id(),
            title,
            Vec::new(),
        )));
    }

    blocks
}

/// Paragraph items for one text run.
fn run_items(text: &str, thresholds: &LevelThresholds) -> Vec<ParagraphItem> {
    let marked = to_marked_text(&extract_segments(text));
    text_to_items(&marked, thresholds)
}
