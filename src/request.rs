//! Generation request input.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use crate::builder::MetadataInput;
use crate::error::{Error, Result};

/// A proposal generation request: section texts plus optional metadata.
///
/// ```
/// use hwpxprep::GenerateRequest;
///
/// let request = GenerateRequest::from_json(
///     r#"{"title":"스마트 교육","sections":[{"title":"개요","text":"본문"}]}"#,
/// ).unwrap();
/// assert_eq!(request.sections.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub sections: Vec<SectionInput>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
}

impl GenerateRequest {
    /// Create a request from sections.
    pub fn new(sections: Vec<SectionInput>) -> Self {
        Self {
            sections,
            ..Self::default()
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the organization.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Parse a request from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Err(Error::InvalidRequest("empty request body".to_string()));
        }

        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(Error::InvalidRequest(
                "request must be a JSON object".to_string(),
            ));
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Read a request from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json(&json)
    }

    /// Read a request from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Metadata fields of the request.
    pub fn metadata(&self) -> MetadataInput {
        MetadataInput {
            title: self.title.clone(),
            organization: self.organization.clone(),
            date: self.date.clone(),
            model: self.model.clone(),
            preset: self.preset.clone(),
        }
    }

    /// Total characters across all raw section texts.
    pub fn total_chars(&self) -> usize {
        self.sections.iter().map(|s| s.text().chars().count()).sum()
    }
}

/// One section of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInput {
    #[serde(default)]
    pub title: String,

    /// Raw generated text; `null` or missing means empty
    #[serde(default)]
    pub text: Option<String>,
}

impl SectionInput {
    /// Create a section.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: Some(text.into()),
        }
    }

    /// Raw text, empty when missing.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}
