//! Plain text preview of document models.

use crate::model::{ContentBlock, DocumentModel};
use crate::parser::markup::unwrap_markers;

/// Options for the text preview.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Keep `{{color:...}}` markers instead of unwrapping them
    pub keep_markers: bool,

    /// Print the metadata header
    pub include_metadata: bool,
}

impl TextOptions {
    /// Create new text options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep or unwrap inline markers.
    pub fn with_markers(mut self, keep: bool) -> Self {
        self.keep_markers = keep;
        self
    }

    /// Enable or disable the metadata header.
    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            keep_markers: false,
            include_metadata: true,
        }
    }
}

/// Render a document as plain text.
///
/// Items are prefixed with their level bullet (`□ ○ ― ※`), tables are
/// written as pipe rows.
pub fn to_text(doc: &DocumentModel, options: &TextOptions) -> String {
    let text = |s: &str| {
        if options.keep_markers {
            s.to_string()
        } else {
            unwrap_markers(s)
        }
    };

    let mut out: Vec<String> = Vec::new();

    if options.include_metadata {
        let m = doc.metadata();
        out.push(m.title.clone());
        out.push(format!("{} | {}", m.organization, m.date));
        out.push(String::new());
    }

    for block in doc.content() {
        match block {
            ContentBlock::Section(section) => {
                if !section.title.is_empty() {
                    out.push(format!("[{}]", text(&section.title)));
                }
                for item in &section.items {
                    out.push(format!("{} {}", item.level.bullet(), text(&item.text)));
                }
            }
            ContentBlock::Table(table) => {
                out.push(text(&table.data.to_pipe_rows()));
            }
        }
    }

    out.join("\n").trim().to_string()
}
