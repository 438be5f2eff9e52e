//! Document-level types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{ContentBlock, TableBlock};

/// The normalized document handed to the HWPX renderer.
///
/// Built once per request by [`crate::DocumentBuilder`] and never mutated
/// afterwards; fields are read through accessors only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    metadata: DocumentMetadata,
    content: Vec<ContentBlock>,
}

impl DocumentModel {
    pub(crate) fn new(metadata: DocumentMetadata, content: Vec<ContentBlock>) -> Self {
        Self { metadata, content }
    }

    /// Document metadata.
    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Ordered content blocks.
    pub fn content(&self) -> &[ContentBlock] {
        &self.content
    }

    /// Number of content blocks.
    pub fn block_count(&self) -> usize {
        self.content.len()
    }

    /// Check if the document has no content blocks.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Iterate over table blocks.
    pub fn tables(&self) -> impl Iterator<Item = &TableBlock> {
        self.content.iter().filter_map(ContentBlock::as_table)
    }

    /// Find a block by id.
    pub fn get_block(&self, id: &str) -> Option<&ContentBlock> {
        self.content.iter().find(|b| b.id() == id)
    }

    /// Check the guarantees the renderer relies on: unique ids, well-formed
    /// tables, no empty paragraph items.
    pub fn is_consistent(&self) -> bool {
        let mut ids = HashSet::new();
        self.content.iter().all(|block| {
            let fresh = ids.insert(block.id());
            let valid = match block {
                ContentBlock::Section(s) => s.items.iter().all(|i| !i.text.is_empty()),
                ContentBlock::Table(t) => t.data.is_well_formed(),
            };
            fresh && valid
        })
    }
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document title
    pub title: String,

    /// Submitting organization
    pub organization: String,

    /// Display date (e.g. `2026. 10. 19.`)
    pub date: String,

    /// Generation model identifier
    pub model: String,

    /// Preset label
    pub preset: String,

    /// Total characters across all raw section texts
    pub total_chars: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Level, ParagraphItem, SectionBlock, TableData};

    fn metadata() -> DocumentMetadata {
        DocumentMetadata {
            title: "제안서".to_string(),
            organization: "Architect PRO".to_string(),
            date: "2026. 10. 19.".to_string(),
            model: "unknown".to_string(),
            preset: "제안서".to_string(),
            total_chars: 0,
        }
    }

    #[test]
    fn test_document_accessors() {
        let table = TableData::new(vec!["a".into(), "b".into()], vec![vec!["1".into()]]).unwrap();
        let doc = DocumentModel::new(
            metadata(),
            vec![
                ContentBlock::Section(SectionBlock::new(
                    "section1",
                    "개요",
                    vec![ParagraphItem::new(Level::H2, "본문")],
                )),
                ContentBlock::Table(TableBlock::new("table_s1_1", table)),
            ],
        );

        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.tables().count(), 1);
        assert!(doc.get_block("table_s1_1").is_some());
        assert!(doc.get_block("section9").is_none());
        assert!(doc.is_consistent());
    }

    #[test]
    fn test_duplicate_ids_inconsistent() {
        let doc = DocumentModel::new(
            metadata(),
            vec![
                ContentBlock::Section(SectionBlock::new("section1", "", vec![])),
                ContentBlock::Section(SectionBlock::new("section1", "", vec![])),
            ],
        );
        assert!(!doc.is_consistent());
    }

    #[test]
    fn test_metadata_json_fields() {
        let doc = DocumentModel::new(metadata(), vec![]);
        let value = serde_json::to_value(&doc).unwrap();
        for field in ["title", "organization", "date", "model", "preset", "total_chars"] {
            assert!(value["metadata"].get(field).is_some(), "missing {}", field);
        }
        assert!(value["content"].as_array().unwrap().is_empty());
    }
}
