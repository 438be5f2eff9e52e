//! Lexical cleanup stages for generated rich text.
//!
//! Each stage is a small, pure text transformation. Components declare the
//! ordered list of stages they need (see [`run_stages`]) instead of chaining
//! substitutions ad hoc, so the order is visible in one place.
//!
//! Inline provenance markers (`{{red:...}}`, `{{green:...}}`, `{{blue:...}}`)
//! must never be touched by the generic stages. Wrap any generic cleanup in a
//! [`MarkerGuard`] so marker spans are swapped for opaque placeholders first.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

use crate::model::ProvenanceColor;

/// A complete inline marker. Group 1 is the color, group 2 the inner text.
pub(crate) static RE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(red|green|blue):([^}]+)\}\}").expect("valid marker regex")
});

/// A literal marker whose inner text may still hold break markup or line
/// breaks. No braces inside, so an unclosed marker never swallows the next.
static RE_MARKER_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(red|green|blue):([^{}]+)\}\}").expect("valid marker span regex")
});

static RE_COLOR_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<span\s[^>]*?class\s*=\s*["'][^"']*?\btext-(red|green|blue)-[^"']*["'][^>]*>(.*?)</span\s*>"#,
    )
    .expect("valid color span regex")
});

static RE_PARA_JOIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</p\s*>\s*<p(?:\s[^>]*)?>").expect("valid paragraph join regex")
});
static RE_PARA_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<p(?:\s[^>]*)?>").expect("valid paragraph open regex"));
static RE_PARA_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</p\s*>").expect("valid paragraph close regex"));
static RE_LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid line break regex"));
static RE_BLOCK_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(?:li|div|h[1-6])\s*>").expect("valid block close regex")
});

static RE_INLINE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:strong|em|b|i|u)\s*>").expect("valid inline tag regex")
});
static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z/!][^<>]*>").expect("valid tag regex"));
static RE_UNTERMINATED_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)<[A-Za-z/][^<>\n]*$").expect("valid unterminated tag regex")
});

static RE_DECOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[v^~]{3,}").expect("valid decoration regex"));
static RE_LEADING_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[^\w\s{<(\["'“‘※\x00]+"#).expect("valid leading noise regex")
});

static RE_MD_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+").expect("valid heading regex"));
static RE_MD_BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").expect("valid bold regex"));
static RE_MD_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").expect("valid italic regex"));
static RE_MD_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[-*][ \t]+").expect("valid bullet regex"));
static RE_MD_ORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\d+\.[ \t]+").expect("valid ordered list regex"));

static RE_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s*\b(?:class|style|id)\s*=\s*(?:"[^"]*"|'[^']*')"#)
        .expect("valid attribute regex")
});
static RE_TAG_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:span|div|br|h[1-6]|strong|em|ul|ol|li)\b").expect("valid tag name regex")
});
static RE_UTILITY_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:text-[a-z]+-\d+|font-bold|font-semibold)\b")
        .expect("valid utility class regex")
});

static RE_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").expect("valid spaces regex"));
static RE_LINE_EDGES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*\n[ \t]*").expect("valid line edge regex"));
static RE_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid newline regex"));
static RE_ANY_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Placeholder delimiter. Not a word or whitespace character, and excluded
/// from leading-noise stripping. Removed from input text so a placeholder
/// can only come from [`MarkerGuard::protect`].
const GUARD: char = '\u{0}';

/// A named cleanup stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Unicode NFC normalization
    NormalizeUnicode,
    /// Color spans → inline markers
    ConvertColorSpans,
    /// Flatten literal marker inner text to one clean line
    FlattenMarkers,
    /// Paragraph and line-break markup → newline
    NormalizeBreaks,
    /// Remove `strong`/`em`/`b`/`i`/`u` tags
    StripInlineTags,
    /// Remove any remaining tags
    StripTags,
    /// Decode the small entity vocabulary the generator emits
    DecodeEntities,
    /// Remove decorative runs and leading symbol noise
    StripDecorations,
    /// Remove markdown heading, list and emphasis syntax
    StripMarkdown,
    /// Remove attribute fragments, stray tag names and utility classes
    StripResidue,
    /// Collapse spaces, trim line edges, collapse blank lines
    CollapseWhitespace,
}

impl Stage {
    /// Apply this stage.
    pub fn apply(self, text: &str) -> String {
        match self {
            Stage::NormalizeUnicode => normalize_unicode(text),
            Stage::ConvertColorSpans => convert_color_spans(text),
            Stage::FlattenMarkers => flatten_markers(text),
            Stage::NormalizeBreaks => normalize_breaks(text),
            Stage::StripInlineTags => strip_inline_tags(text),
            Stage::StripTags => strip_tags(text),
            Stage::DecodeEntities => decode_entities(text),
            Stage::StripDecorations => strip_decorations(text),
            Stage::StripMarkdown => strip_markdown(text),
            Stage::StripResidue => strip_residue(text),
            Stage::CollapseWhitespace => collapse_whitespace(text),
        }
    }
}

/// Run stages in order.
pub fn run_stages(text: &str, stages: &[Stage]) -> String {
    stages
        .iter()
        .fold(text.to_string(), |acc, stage| stage.apply(&acc))
}

/// Unicode NFC normalization. NUL characters are dropped.
pub fn normalize_unicode(text: &str) -> String {
    text.nfc().filter(|&c| c != GUARD).collect()
}

/// Convert `<span class="... text-{red|green|blue}-...">inner</span>` into
/// `{{color:inner}}`.
///
/// The inner text is flattened to a single line without tags so the marker
/// survives line splitting. Spans of other colors are left untouched.
pub fn convert_color_spans(text: &str) -> String {
    RE_COLOR_SPAN
        .replace_all(text, |caps: &Captures| {
            let inner = clean_marker_text(&caps[2]);
            match ProvenanceColor::from_marker(&caps[1]) {
                Some(color) if !inner.is_empty() => format!("{{{{{}:{}}}}}", color, inner),
                _ => inner,
            }
        })
        .into_owned()
}

/// Rewrite every literal `{{color:...}}` marker so its inner text is a
/// single line: break markup and line breaks become spaces, tags are
/// removed, entities decoded. A marker left empty is dropped.
///
/// Runs before breaks are normalized so a `<br>` inside a marker can not
/// split it across paragraphs.
pub fn flatten_markers(text: &str) -> String {
    RE_MARKER_SPAN
        .replace_all(text, |caps: &Captures| {
            let inner = clean_marker_text(&caps[2]);
            if inner.is_empty() {
                inner
            } else {
                format!("{{{{{}:{}}}}}", &caps[1], inner)
            }
        })
        .into_owned()
}

/// Flatten marker inner text: breaks as spaces, no tags, decoded entities,
/// one line, no `}`.
pub(crate) fn clean_marker_text(inner: &str) -> String {
    let text = normalize_breaks(inner);
    let text = strip_tags(&text);
    let text = decode_entities(&text).replace('}', ")");
    RE_ANY_WHITESPACE
        .replace_all(&text, " ")
        .trim()
        .to_string()
}

/// Paragraph, line-break and block closing markup become a newline.
pub fn normalize_breaks(text: &str) -> String {
    let text = RE_PARA_JOIN.replace_all(text, "\n");
    let text = RE_PARA_OPEN.replace_all(&text, "\n");
    let text = RE_PARA_CLOSE.replace_all(&text, "\n");
    let text = RE_BLOCK_CLOSE.replace_all(&text, "\n");
    RE_LINE_BREAK.replace_all(&text, "\n").into_owned()
}

/// Remove inline emphasis tags, keeping their content.
pub fn strip_inline_tags(text: &str) -> String {
    RE_INLINE_TAG.replace_all(text, "").into_owned()
}

/// Remove any remaining markup tags, including an unterminated tag at the
/// end of a line.
pub fn strip_tags(text: &str) -> String {
    let text = RE_TAG.replace_all(text, "");
    RE_UNTERMINATED_TAG.replace_all(&text, "").into_owned()
}

/// Decode the entities the generator emits.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Remove decorative artifacts: runs of 3+ `v`/`^`/`~`, and symbol noise at
/// the start of a line.
pub fn strip_decorations(text: &str) -> String {
    let text = RE_DECOR_RUN.replace_all(text, "");
    RE_LEADING_NOISE.replace_all(&text, "").into_owned()
}

/// Remove markdown syntax the generator was told not to use.
pub fn strip_markdown(text: &str) -> String {
    let text = RE_MD_HEADING.replace_all(text, "");
    let text = RE_MD_BOLD.replace_all(&text, "$1");
    let text = RE_MD_ITALIC.replace_all(&text, "$1");
    let text = RE_MD_BULLET.replace_all(&text, "");
    RE_MD_ORDERED.replace_all(&text, "").into_owned()
}

/// Remove leftovers of broken markup: attribute fragments, bare tag names,
/// utility class tokens and stray angle brackets.
pub fn strip_residue(text: &str) -> String {
    let text = RE_ATTRIBUTE.replace_all(text, "");
    let text = RE_TAG_NAME.replace_all(&text, "");
    let text = RE_UTILITY_CLASS.replace_all(&text, "");
    text.replace(['<', '>'], "")
}

/// Collapse horizontal whitespace, trim around newlines and fold repeated
/// newlines into one.
pub fn collapse_whitespace(text: &str) -> String {
    let text = RE_SPACES.replace_all(text, " ");
    let text = RE_LINE_EDGES.replace_all(&text, "\n");
    RE_NEWLINES.replace_all(&text, "\n").into_owned()
}

/// Whether the text contains at least one complete inline marker.
pub fn has_marker(text: &str) -> bool {
    RE_MARKER.is_match(text)
}

/// Replace every marker with its inner text.
pub fn unwrap_markers(text: &str) -> String {
    RE_MARKER.replace_all(text, "$2").into_owned()
}

/// Colors of the markers in `text`, left to right.
pub fn marker_colors(text: &str) -> impl Iterator<Item = ProvenanceColor> + '_ {
    RE_MARKER
        .captures_iter(text)
        .filter_map(|caps| ProvenanceColor::from_marker(&caps[1]))
}

/// Swaps inline markers for opaque placeholders around generic cleanup.
///
/// ```
/// use hwpxprep::parser::markup::{strip_residue, MarkerGuard};
///
/// let (guard, protected) = MarkerGuard::protect("{{red:class=\"x\" 3건}} span");
/// let cleaned = strip_residue(&protected);
/// assert_eq!(guard.restore(cleaned.trim()), "{{red:class=\"x\" 3건}}");
/// ```
#[derive(Debug, Default)]
pub struct MarkerGuard {
    originals: Vec<String>,
}

impl MarkerGuard {
    /// Replace every complete marker with a placeholder.
    ///
    /// NUL characters in `text` are dropped first, so the input can never
    /// hold something that looks like a placeholder.
    pub fn protect(text: &str) -> (Self, String) {
        let text: Cow<str> = if text.contains(GUARD) {
            Cow::Owned(text.replace(GUARD, ""))
        } else {
            Cow::Borrowed(text)
        };
        let mut originals = Vec::new();
        let protected = RE_MARKER.replace_all(&text, |caps: &Captures| {
            let placeholder = format!("{GUARD}M{}{GUARD}", originals.len());
            originals.push(caps[0].to_string());
            placeholder
        });
        let protected = match protected {
            Cow::Borrowed(s) => s.to_string(),
            Cow::Owned(s) => s,
        };
        (Self { originals }, protected)
    }

    /// Number of protected markers.
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    /// Check if no markers were protected.
    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Put the original markers back.
    ///
    /// Placeholders are restored in reverse so `M1` never clobbers `M10`.
    pub fn restore(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (i, original) in self.originals.iter().enumerate().rev() {
            let placeholder = format!("{GUARD}M{}{GUARD}", i);
            result = result.replacen(&placeholder, original, 1);
        }
        result
    }

    /// Run `stages` on `text` with markers protected.
    pub fn clean(text: &str, stages: &[Stage]) -> String {
        let (guard, protected) = Self::protect(text);
        let cleaned = run_stages(&protected, stages);
        guard.restore(&cleaned)
    }
}
