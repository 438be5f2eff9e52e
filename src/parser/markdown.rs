//! Markdown proposal import.
//!
//! Splits a Markdown proposal into request sections and turns selected
//! bold spans into provenance markers, so a hand-edited Markdown draft can
//! go through the same pipeline as generated text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::request::SectionInput;

use super::markup::clean_marker_text;

/// Bold spans about AI and automation are marked green.
static RE_BOLD_GREEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*((?:AI|인공지능|자동화|머신러닝|딥러닝)[^*\n]*)\*\*")
        .expect("valid green bold regex")
});

/// Bold spans leading with a percentage or duration are marked red.
static RE_BOLD_RED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(\d+(?:%|시간|분)[^*\n]*)\*\*").expect("valid red bold regex")
});

static RE_BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").expect("valid bold regex"));

/// Split a Markdown document into sections.
///
/// `# ` and `## ` headings start a section. Content before the first
/// heading becomes an untitled section when it is not blank.
pub fn sections_from_markdown(markdown: &str) -> Vec<SectionInput> {
    let mut sections = Vec::new();
    let mut title: Option<String> = None;
    let mut body: Vec<String> = Vec::new();

    for line in markdown.lines() {
        match section_heading(line) {
            Some(heading) => {
                flush_section(&mut sections, title.take(), &mut body);
                title = Some(convert_bold(heading));
            }
            None => body.push(convert_bold(line)),
        }
    }
    flush_section(&mut sections, title, &mut body);

    log::debug!("markdown import: {} sections", sections.len());
    sections
}

/// First `# ` heading of the document, if any.
pub fn document_title(markdown: &str) -> Option<String> {
    markdown.lines().find_map(|line| {
        line.trim()
            .strip_prefix("# ")
            .map(|t| RE_BOLD.replace_all(t.trim(), "$1").into_owned())
    })
}

/// Convert bold spans to markers or plain text.
pub fn convert_bold(text: &str) -> String {
    let text = RE_BOLD_GREEN.replace_all(text, |caps: &Captures| marker("green", &caps[1]));
    let text = RE_BOLD_RED.replace_all(&text, |caps: &Captures| marker("red", &caps[1]));
    RE_BOLD.replace_all(&text, "$1").into_owned()
}

fn marker(color: &str, inner: &str) -> String {
    format!("{{{{{}:{}}}}}", color, clean_marker_text(inner))
}

fn section_heading(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    trimmed
        .strip_prefix("# ")
        .or_else(|| trimmed.strip_prefix("## "))
        .map(str::trim)
}

fn flush_section(sections: &mut Vec<SectionInput>, title: Option<String>, body: &mut Vec<String>) {
    let text = std::mem::take(body).join("\n").trim().to_string();
    match title {
        Some(title) => sections.push(SectionInput::new(title, text)),
        None if !text.is_empty() => sections.push(SectionInput::new("", text)),
        None => {}
    }
}
