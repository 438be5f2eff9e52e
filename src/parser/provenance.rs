//! Provenance segment extraction.
//!
//! Turns one fragment of generated rich text into an ordered list of
//! [`ColoredSegment`]s. Inline markers (`{{red:...}}` etc.) survive every
//! cleanup stage; everything else (tags, entities, markdown, decoration
//! noise) is normalized away.

use crate::model::{ColoredSegment, ProvenanceColor};

use super::markup::{self, MarkerGuard, Stage, RE_MARKER};

/// Stages run on the raw fragment before marker protection.
const PREPARE: &[Stage] = &[
    Stage::NormalizeUnicode,
    Stage::ConvertColorSpans,
    Stage::FlattenMarkers,
    Stage::NormalizeBreaks,
    Stage::StripInlineTags,
];

/// Generic cleanup, run with markers protected.
const CLEANUP: &[Stage] = &[
    Stage::StripMarkdown,
    Stage::StripDecorations,
    Stage::StripTags,
    Stage::DecodeEntities,
    Stage::StripResidue,
    Stage::CollapseWhitespace,
];

/// Extract colored segments from a text fragment.
///
/// Empty input yields no segments. Text without markers yields a single
/// black segment. Whitespace between two markers is kept as its own black
/// segment so the visible spacing survives.
pub fn extract_segments(input: &str) -> Vec<ColoredSegment> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let cleaned = clean_fragment(input);
    split_markers(&cleaned)
}

/// Visible text of a fragment: the segments concatenated, markers unwrapped.
pub fn visible_text(input: &str) -> String {
    extract_segments(input)
        .into_iter()
        .map(|s| s.text)
        .collect()
}

/// Re-emit segments as marked text, the inverse of [`extract_segments`] on
/// already clean text.
pub fn to_marked_text(segments: &[ColoredSegment]) -> String {
    segments.iter().map(ColoredSegment::to_markup).collect()
}

/// Normalize a table cell to a single line, keeping markers verbatim.
pub fn normalize_cell(text: &str) -> String {
    let text = markup::run_stages(
        text,
        &[
            Stage::NormalizeUnicode,
            Stage::ConvertColorSpans,
            Stage::FlattenMarkers,
            Stage::NormalizeBreaks,
            Stage::StripTags,
            Stage::DecodeEntities,
        ],
    );
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn clean_fragment(input: &str) -> String {
    let prepared = markup::run_stages(input, PREPARE);
    MarkerGuard::clean(&prepared, CLEANUP).trim().to_string()
}

fn split_markers(text: &str) -> Vec<ColoredSegment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in RE_MARKER.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let color = ProvenanceColor::from_marker(&caps[1]).unwrap_or_default();

        push_segment(&mut segments, &text[last..whole.start()], ProvenanceColor::Black);
        push_segment(&mut segments, &caps[2], color);
        last = whole.end();
    }
    push_segment(&mut segments, &text[last..], ProvenanceColor::Black);

    segments
}

fn push_segment(segments: &mut Vec<ColoredSegment>, text: &str, color: ProvenanceColor) {
    if !text.is_empty() {
        segments.push(ColoredSegment::new(text, color));
    }
}
