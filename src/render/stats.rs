//! Document statistics.

use serde::{Deserialize, Serialize};

use crate::model::{ContentBlock, DocumentModel, ProvenanceColor};
use crate::parser::markup::marker_colors;

/// Counts collected from a document model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of section blocks (including continuations)
    pub section_count: usize,

    /// Number of table blocks
    pub table_count: usize,

    /// Total table data rows
    pub table_row_count: usize,

    /// Number of paragraph items
    pub item_count: usize,

    /// Items per level, index 0 is level 1
    pub items_by_level: [usize; 4],

    /// Red (source data) markers in items and cells
    pub red_markers: usize,

    /// Green (reference material) markers in items and cells
    pub green_markers: usize,

    /// Blue (emphasis) markers in items and cells
    pub blue_markers: usize,

    /// Characters of the raw input, from the metadata
    pub total_chars: usize,
}

impl DocumentStats {
    /// Collect statistics from a document.
    pub fn collect(doc: &DocumentModel) -> Self {
        let mut stats = Self {
            total_chars: doc.metadata().total_chars,
            ..Self::default()
        };

        for block in doc.content() {
            match block {
                ContentBlock::Section(section) => {
                    stats.section_count += 1;
                    for item in &section.items {
                        stats.item_count += 1;
                        stats.items_by_level[usize::from(item.level.as_u8() - 1)] += 1;
                        stats.count_markers(&item.text);
                    }
                }
                ContentBlock::Table(table) => {
                    stats.table_count += 1;
                    stats.table_row_count += table.data.row_count();
                    for cell in table.data.headers.iter().chain(table.data.rows.iter().flatten()) {
                        stats.count_markers(cell);
                    }
                }
            }
        }

        stats
    }

    /// Total marker count across all colors.
    pub fn marker_count(&self) -> usize {
        self.red_markers + self.green_markers + self.blue_markers
    }

    fn count_markers(&mut self, text: &str) {
        for color in marker_colors(text) {
            match color {
                ProvenanceColor::Red => self.red_markers += 1,
                ProvenanceColor::Green => self.green_markers += 1,
                ProvenanceColor::Blue => self.blue_markers += 1,
                ProvenanceColor::Black => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_document, GenerateRequest, SectionInput};

    #[test]
    fn test_collect() {
        let doc = build_document(&GenerateRequest::new(vec![
            SectionInput::new(
                "성과",
                "추진배경\n교육생 {{red:1,200명}} {{green:자동화}} 배출\n| a | b |\n| {{blue:x}} | 1 |\n| y | 2 |\n끝",
            ),
            SectionInput::new("빈 섹션", ""),
        ]));

        let stats = DocumentStats::collect(&doc);
        assert_eq!(stats.section_count, 3);
        assert_eq!(stats.table_count, 1);
        assert_eq!(stats.table_row_count, 2);
        assert_eq!(stats.item_count, 3);
        assert_eq!(stats.items_by_level, [1, 2, 0, 0]);
        assert_eq!(
            (stats.red_markers, stats.green_markers, stats.blue_markers),
            (1, 1, 1)
        );
        assert_eq!(stats.marker_count(), 3);
        assert_eq!(stats.total_chars, doc.metadata().total_chars);
    }
}
