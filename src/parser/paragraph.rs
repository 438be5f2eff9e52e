//! Paragraph segmentation and level classification.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Level, ParagraphItem};

use super::markup::{self, MarkerGuard, Stage};
use super::options::LevelThresholds;

/// Enumerator prefixes that mark a short line as a heading:
/// `1.`, `(1)`, `1)`, `①`..`⑳`.
static RE_ENUMERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+\.|\(\d+\)|\d+\)|[①-⑳])").expect("valid enumerator regex")
});

const PARAGRAPH_CLEANUP: &[Stage] = &[
    Stage::StripMarkdown,
    Stage::StripTags,
    Stage::StripResidue,
    Stage::CollapseWhitespace,
];

/// Split text into paragraph items, one per non-empty line.
pub fn text_to_items(text: &str, thresholds: &LevelThresholds) -> Vec<ParagraphItem> {
    let text = markup::run_stages(text, &[Stage::FlattenMarkers, Stage::NormalizeBreaks]);

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(clean_paragraph)
        .filter(|para| !para.is_empty())
        .map(|para| ParagraphItem::new(classify_level(&para, thresholds), para))
        .collect()
}

/// Clean a single paragraph, keeping inline markers verbatim.
pub fn clean_paragraph(text: &str) -> String {
    MarkerGuard::clean(text, PARAGRAPH_CLEANUP).trim().to_string()
}

/// Classify a cleaned paragraph by length and shape.
///
/// Length is counted in characters of the text as stored, marker syntax
/// included.
pub fn classify_level(text: &str, thresholds: &LevelThresholds) -> Level {
    let len = text.chars().count();

    if len < thresholds.heading && looks_like_heading(text, thresholds) {
        Level::H1
    } else if len < thresholds.short {
        Level::H2
    } else if len < thresholds.medium {
        Level::H3
    } else {
        Level::H4
    }
}

fn looks_like_heading(text: &str, thresholds: &LevelThresholds) -> bool {
    text.ends_with(':')
        || text.ends_with('?')
        || RE_ENUMERATOR.is_match(text)
        || is_hangul_label(text, thresholds)
}

/// A bare label made only of Hangul syllables, e.g. `추진배경`.
fn is_hangul_label(text: &str, thresholds: &LevelThresholds) -> bool {
    let count = text.chars().count();
    (thresholds.label_min..=thresholds.label_max).contains(&count)
        && text.chars().all(|c| ('가'..='힣').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(text: &str) -> Level {
        classify_level(text, &LevelThresholds::default())
    }

    #[test]
    fn test_heading_shapes() {
        assert_eq!(level("추진 목표:"), Level::H1);
        assert_eq!(level("왜 지금인가?"), Level::H1);
        assert_eq!(level("1. 사업 개요"), Level::H1);
        assert_eq!(level("(2) 세부 내용"), Level::H1);
        assert_eq!(level("3) 일정"), Level::H1);
        assert_eq!(level("① 교육 운영"), Level::H1);
        assert_eq!(level("추진배경"), Level::H1);
    }

    #[test]
    fn test_short_plain_text_is_level_two() {
        assert_eq!(level("추진 배경"), Level::H2);
        assert_eq!(level("가"), Level::H2);
        assert_eq!(level("가나다라마바사아자차카"), Level::H2);
        assert_eq!(level("본 사업은 다음과 같다."), Level::H2);
    }

    #[test]
    fn test_length_boundaries() {
        let q49 = format!("{}?", "가".repeat(48));
        assert_eq!(level(&q49), Level::H1);

        let q50 = format!("{}?", "가".repeat(49));
        assert_eq!(level(&q50), Level::H2);

        assert_eq!(level(&"x".repeat(50)), Level::H2);
        assert_eq!(level(&"x".repeat(149)), Level::H2);
        assert_eq!(level(&"x".repeat(150)), Level::H3);
        assert_eq!(level(&"x".repeat(399)), Level::H3);
        assert_eq!(level(&"x".repeat(400)), Level::H4);
    }

    #[test]
    fn test_marker_syntax_counts_toward_length() {
        // 41 visible characters, 49 with the marker syntax
        let text = format!("{}{{{{red:{}}}}}?", "가".repeat(31), "나".repeat(9));
        assert_eq!(text.chars().count(), 49);
        assert_eq!(level(&text), Level::H1);

        let longer = format!("{}{{{{red:{}}}}}?", "가".repeat(32), "나".repeat(9));
        assert_eq!(level(&longer), Level::H2);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = LevelThresholds {
            heading: 10,
            ..LevelThresholds::default()
        };
        assert_eq!(classify_level("아주 긴 제목 문장입니다:", &thresholds), Level::H2);
    }

    #[test]
    fn test_text_to_items() {
        let items = text_to_items(
            "개요\n\n본 사업은 <b>다음</b>과 같다.<br>  \n  ",
            &LevelThresholds::default(),
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "개요");
        assert_eq!(items[0].level, Level::H1);
        assert_eq!(items[1].text, "본 사업은 다음과 같다.");
        assert_eq!(items[1].level, Level::H2);
    }

    #[test]
    fn test_items_never_empty() {
        let items = text_to_items("<div></div>\nspan\n**유효**", &LevelThresholds::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "유효");
    }

    #[test]
    fn test_break_inside_marker_does_not_split_item() {
        let items = text_to_items("{{red:A<br>B}} 끝", &LevelThresholds::default());
        let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["{{red:A B}} 끝"]);
    }

    #[test]
    fn test_clean_paragraph_keeps_markers() {
        assert_eq!(
            clean_paragraph("교육생  {{red:1,200명}} <em>배출</em> class=\"a\""),
            "교육생 {{red:1,200명}} 배출"
        );
    }
}
