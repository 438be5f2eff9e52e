//! Document model builder.

use chrono::{Local, NaiveDate};
use std::fmt::Write;

use crate::model::{ContentBlock, DocumentMetadata, DocumentModel};
use crate::parser::DocumentDefaults;

/// Fallback date format when the configured one is invalid.
const DATE_FORMAT: &str = "%Y. %m. %d.";

/// Metadata as supplied by a request. Missing or blank values fall back to
/// [`DocumentDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataInput {
    pub title: Option<String>,
    pub organization: Option<String>,
    pub date: Option<String>,
    pub model: Option<String>,
    pub preset: Option<String>,
}

impl MetadataInput {
    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the organization.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Set the date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Aggregates content blocks and metadata into a [`DocumentModel`].
///
/// ```
/// use hwpxprep::{DocumentBuilder, MetadataInput};
/// use hwpxprep::parser::DocumentDefaults;
///
/// let doc = DocumentBuilder::new(DocumentDefaults::default())
///     .with_metadata(MetadataInput::default().with_date("2026. 01. 02."))
///     .build();
/// assert_eq!(doc.metadata().title, "제안서");
/// assert_eq!(doc.metadata().date, "2026. 01. 02.");
/// ```
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    defaults: DocumentDefaults,
    metadata: MetadataInput,
    content: Vec<ContentBlock>,
    total_chars: usize,
    today: Option<NaiveDate>,
}

impl DocumentBuilder {
    /// Create a builder with the given fallbacks.
    pub fn new(defaults: DocumentDefaults) -> Self {
        Self {
            defaults,
            metadata: MetadataInput::default(),
            content: Vec::new(),
            total_chars: 0,
            today: None,
        }
    }

    /// Set request metadata.
    pub fn with_metadata(mut self, metadata: MetadataInput) -> Self {
        self.metadata = metadata;
        self
    }

    /// Fix the date used when none is supplied (defaults to today).
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Add one section: its raw text (counted toward `total_chars`) and the
    /// blocks assembled from it.
    pub fn add_section(&mut self, raw: &str, blocks: Vec<ContentBlock>) -> &mut Self {
        self.total_chars += raw.chars().count();
        self.content.extend(blocks);
        self
    }

    /// Number of blocks added so far.
    pub fn block_count(&self) -> usize {
        self.content.len()
    }

    /// Finish the document.
    pub fn build(self) -> DocumentModel {
        let metadata = self.resolve_metadata();
        log::info!(
            "document built: {} blocks, {} chars",
            self.content.len(),
            metadata.total_chars
        );
        DocumentModel::new(metadata, self.content)
    }

    fn resolve_metadata(&self) -> DocumentMetadata {
        let defaults = &self.defaults;
        let m = &self.metadata;

        DocumentMetadata {
            title: or_default(&m.title, &defaults.title),
            organization: or_default(&m.organization, &defaults.organization),
            date: present(&m.date).unwrap_or_else(|| self.default_date()),
            model: or_default(&m.model, &defaults.model),
            preset: or_default(&m.preset, &defaults.preset),
            total_chars: self.total_chars,
        }
    }

    fn default_date(&self) -> String {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        format_date(today, &self.defaults.date_format)
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn or_default(value: &Option<String>, fallback: &str) -> String {
    present(value).unwrap_or_else(|| fallback.to_string())
}

/// Format a date, falling back to `%Y. %m. %d.` on an invalid format string.
fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_ok() {
        return out;
    }
    log::warn!("invalid date format {:?}, using default", format);
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SectionBlock;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let doc = DocumentBuilder::new(DocumentDefaults::default())
            .with_today(today())
            .build();
        let m = doc.metadata();
        assert_eq!(m.title, "제안서");
        assert_eq!(m.organization, "Architect PRO");
        assert_eq!(m.model, "unknown");
        assert_eq!(m.preset, "제안서");
        assert_eq!(m.date, "2026. 10. 19.");
        assert_eq!(m.total_chars, 0);
    }

    #[test]
    fn test_blank_values_treated_as_missing() {
        let metadata = MetadataInput {
            title: Some("  ".into()),
            organization: Some("테스트기관".into()),
            date: Some("".into()),
            model: None,
            preset: Some(" 요약 ".into()),
        };
        let doc = DocumentBuilder::new(DocumentDefaults::default())
            .with_metadata(metadata)
            .with_today(today())
            .build();
        let m = doc.metadata();
        assert_eq!(m.title, "제안서");
        assert_eq!(m.organization, "테스트기관");
        assert_eq!(m.date, "2026. 10. 19.");
        assert_eq!(m.preset, "요약");
    }

    #[test]
    fn test_total_chars_and_blocks() {
        let mut builder = DocumentBuilder::new(DocumentDefaults::default());
        builder
            .add_section(
                "가나다",
                vec![ContentBlock::Section(SectionBlock::new("section1", "", vec![]))],
            )
            .add_section(
                "abcd",
                vec![ContentBlock::Section(SectionBlock::new("section2", "", vec![]))],
            );
        assert_eq!(builder.block_count(), 2);

        let doc = builder.build();
        assert_eq!(doc.metadata().total_chars, 7);
        assert_eq!(doc.block_count(), 2);
    }

    #[test]
    fn test_custom_date_format() {
        let defaults = DocumentDefaults {
            date_format: "%Y-%m-%d".into(),
            ..DocumentDefaults::default()
        };
        let doc = DocumentBuilder::new(defaults).with_today(today()).build();
        assert_eq!(doc.metadata().date, "2026-10-19");
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        assert_eq!(format_date(today(), "%Q"), "2026. 10. 19.");
    }
}
