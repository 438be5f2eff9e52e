//! JSON rendering for document models.

use crate::error::{Error, Result};
use crate::model::DocumentModel;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document model to JSON.
pub fn to_json(doc: &DocumentModel, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Read a document model back from JSON.
pub fn from_json(json: &str) -> Result<DocumentModel> {
    Ok(serde_json::from_str(json)?)
}
