//! # hwpxprep
//!
//! Normalizes AI-generated proposal sections into a strict document model
//! for HWPX rendering.
//!
//! Generated text arrives as loosely structured rich text: HTML fragments,
//! stray markdown, pipe tables and inline provenance markers such as
//! `{{red:1,200명}}`. This library turns each section into typed content
//! blocks (paragraph sections and validated tables) and wraps them with
//! document metadata.
//!
//! ## Quick Start
//!
//! ```
//! use hwpxprep::{build_document, render, GenerateRequest, SectionInput};
//!
//! fn main() -> hwpxprep::Result<()> {
//!     let request = GenerateRequest::new(vec![SectionInput::new(
//!         "개요",
//!         "본 사업은 다음과 같다.\n| 항목 | 값 |\n|---|---|\n| A | 1 |",
//!     )]);
//!
//!     let doc = build_document(&request);
//!     assert_eq!(doc.block_count(), 2);
//!
//!     let json = render::to_json(&doc, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Provenance markers**: red/green/blue spans survive every cleanup stage
//! - **Table detection**: pipe and HTML tables, validated and reconciled
//! - **Paragraph levels**: length and shape based level classification
//! - **Markdown import**: proposal drafts with bold-to-marker conversion
//! - **Parallel processing**: uses Rayon across sections

pub mod builder;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod request;

// Re-export commonly used types
pub use builder::{DocumentBuilder, MetadataInput};
pub use error::{Error, Result};
pub use model::{
    ColoredSegment, ContentBlock, DocumentMetadata, DocumentModel, ItemColor, ItemSource, Level,
    ParagraphItem, ProvenanceColor, SectionBlock, TableBlock, TableData,
};
pub use parser::{DocumentDefaults, LevelThresholds, PipelineOptions, SectionTrace};
pub use render::{DocumentStats, JsonFormat, TextOptions};
pub use request::{GenerateRequest, SectionInput};

use rayon::prelude::*;
use std::path::Path;

/// Build a document model from a request with default options.
///
/// # Example
///
/// ```
/// use hwpxprep::{build_document, GenerateRequest, SectionInput};
///
/// let doc = build_document(&GenerateRequest::new(vec![SectionInput::new("개요", "")]));
/// assert_eq!(doc.content()[0].id(), "section1");
/// ```
pub fn build_document(request: &GenerateRequest) -> DocumentModel {
    Pipeline::new().run(request)
}

/// Parse a JSON request and build the document model.
pub fn build_document_from_json(json: &str) -> Result<DocumentModel> {
    let request = GenerateRequest::from_json(json)?;
    Ok(build_document(&request))
}

/// Read a JSON request file and build the document model.
///
/// ```no_run
/// let doc = hwpxprep::build_document_from_file("request.json")?;
/// # Ok::<(), hwpxprep::Error>(())
/// ```
pub fn build_document_from_file<P: AsRef<Path>>(path: P) -> Result<DocumentModel> {
    let request = GenerateRequest::from_file(path)?;
    Ok(build_document(&request))
}

/// Convert a Markdown proposal into a document model.
///
/// The document title is taken from `metadata`, or the first `# ` heading.
pub fn build_document_from_markdown(markdown: &str, metadata: MetadataInput) -> DocumentModel {
    Pipeline::new().run_markdown(markdown, metadata)
}

/// Build a request and serialize the document to JSON.
pub fn to_json(request: &GenerateRequest, format: JsonFormat) -> Result<String> {
    render::to_json(&build_document(request), format)
}

/// Builder for running the normalization pipeline.
///
/// # Example
///
/// ```
/// use hwpxprep::{GenerateRequest, Pipeline, SectionInput};
///
/// let doc = Pipeline::new()
///     .sequential()
///     .with_organization("테스트기관")
///     .run(&GenerateRequest::new(vec![SectionInput::new("개요", "본문")]));
/// assert_eq!(doc.metadata().organization, "테스트기관");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
    today: Option<chrono::NaiveDate>,
}

impl Pipeline {
    /// Create a new pipeline with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with explicit options.
    pub fn with_options(options: PipelineOptions) -> Self {
        Self {
            options,
            today: None,
        }
    }

    /// Pipeline options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Enable or disable parallel processing.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.options = self.options.with_parallel(parallel);
        self
    }

    /// Set level thresholds.
    pub fn with_thresholds(mut self, thresholds: LevelThresholds) -> Self {
        self.options = self.options.with_thresholds(thresholds);
        self
    }

    /// Set the fallback organization.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.options.defaults = self.options.defaults.with_organization(organization);
        self
    }

    /// Fix the default date instead of using today.
    pub fn with_today(mut self, today: chrono::NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Run the pipeline on a request.
    pub fn run(&self, request: &GenerateRequest) -> DocumentModel {
        let blocks = self.assemble_all(request);

        let mut builder =
            DocumentBuilder::new(self.options.defaults.clone()).with_metadata(request.metadata());
        if let Some(today) = self.today {
            builder = builder.with_today(today);
        }
        for (section, section_blocks) in request.sections.iter().zip(blocks) {
            builder.add_section(section.text(), section_blocks);
        }
        builder.build()
    }

    /// Run the pipeline and keep per-section intermediate results.
    pub fn trace(&self, request: &GenerateRequest) -> Vec<SectionTrace> {
        self.map_sections(request, |index, section| {
            parser::trace_section(index, &section.title, section.text(), &self.options)
        })
    }

    /// Run the pipeline on a Markdown proposal.
    pub fn run_markdown(&self, markdown: &str, metadata: MetadataInput) -> DocumentModel {
        let mut request = GenerateRequest::new(parser::sections_from_markdown(markdown));
        request.title = metadata
            .title
            .or_else(|| parser::markdown::document_title(markdown));
        request.organization = metadata.organization;
        request.date = metadata.date;
        request.model = metadata.model;
        request.preset = metadata.preset;
        self.run(&request)
    }

    fn assemble_all(&self, request: &GenerateRequest) -> Vec<Vec<ContentBlock>> {
        self.map_sections(request, |index, section| {
            parser::assemble_section(index, &section.title, section.text(), &self.options)
        })
    }

    /// Apply `f` to every section, in parallel when enabled. Output order
    /// always follows section order.
    fn map_sections<T, F>(&self, request: &GenerateRequest, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize, &SectionInput) -> T + Sync,
    {
        log::debug!(
            "assembling {} sections ({})",
            request.sections.len(),
            if self.options.parallel {
                "parallel"
            } else {
                "sequential"
            }
        );

        if self.options.parallel {
            request
                .sections
                .par_iter()
                .enumerate()
                .map(|(i, s)| f(i, s))
                .collect()
        } else {
            request
                .sections
                .iter()
                .enumerate()
                .map(|(i, s)| f(i, s))
                .collect()
        }
    }
}
