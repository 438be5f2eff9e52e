//! Content blocks: the ordered units of a document.

use serde::{Deserialize, Serialize};

use super::{ParagraphItem, TableData};

/// A typed content block.
///
/// Serialized with an internal `type` tag (`"section"` or `"table"`), the
/// shape the HWPX renderer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// A run of paragraphs.
    Section(SectionBlock),

    /// A validated table.
    Table(TableBlock),
}

impl ContentBlock {
    /// Block identifier, unique within a document.
    pub fn id(&self) -> &str {
        match self {
            ContentBlock::Section(s) => &s.id,
            ContentBlock::Table(t) => &t.id,
        }
    }

    /// Block title (empty for tables and continuation sections).
    pub fn title(&self) -> &str {
        match self {
            ContentBlock::Section(s) => &s.title,
            ContentBlock::Table(t) => &t.title,
        }
    }

    /// Check if this is a section block.
    pub fn is_section(&self) -> bool {
        matches!(self, ContentBlock::Section(_))
    }

    /// Check if this is a table block.
    pub fn is_table(&self) -> bool {
        matches!(self, ContentBlock::Table(_))
    }

    /// Get the section block, if any.
    pub fn as_section(&self) -> Option<&SectionBlock> {
        match self {
            ContentBlock::Section(s) => Some(s),
            _ => None,
        }
    }

    /// Get the table block, if any.
    pub fn as_table(&self) -> Option<&TableBlock> {
        match self {
            ContentBlock::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// A section (or section continuation) block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBlock {
    /// `section{n}` or `section{n}_part{k}`
    pub id: String,

    /// Section title, only on the first block of a section
    #[serde(default)]
    pub title: String,

    /// Paragraph items, never with empty text
    #[serde(default)]
    pub items: Vec<ParagraphItem>,
}

impl SectionBlock {
    /// Create a section block.
    pub fn new(id: impl Into<String>, title: impl Into<String>, items: Vec<ParagraphItem>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            items,
        }
    }

    /// Check if the block has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A table block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    /// `table_s{n}_{k}`
    pub id: String,

    /// Always empty for generated tables
    #[serde(default)]
    pub title: String,

    /// Headers and rows
    #[serde(flatten)]
    pub data: TableData,
}

impl TableBlock {
    /// Create a table block with an empty title.
    pub fn new(id: impl Into<String>, data: TableData) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            data,
        }
    }
}
