//! Integration tests for section assembly.

use hwpxprep::parser::{
    assemble_section, extract_segments, split_parts, trace_section, visible_text, PipelineOptions,
    SectionPart, TableCandidate,
};
use hwpxprep::{ContentBlock, Level, ProvenanceColor};

fn assemble(index: usize, title: &str, raw: &str) -> Vec<ContentBlock> {
    assemble_section(index, title, raw, &PipelineOptions::default())
}

#[test]
fn test_mixed_section_layout() {
    let raw = "1. 개요\n본 사업은 다음과 같다.\n\n| 항목 | 값 |\n|---|---|\n| A | 1 |\n\n추가 설명입니다.";
    let blocks = assemble(0, "개요", raw);

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].id(), "section1");
    assert_eq!(blocks[0].title(), "개요");
    assert_eq!(blocks[0].as_section().unwrap().items.len(), 2);

    let table = blocks[1].as_table().unwrap();
    assert_eq!(table.id, "table_s1_1");
    assert_eq!(table.data.headers, vec!["항목", "값"]);
    assert_eq!(table.data.rows, vec![vec!["A", "1"]]);

    let tail = blocks[2].as_section().unwrap();
    assert_eq!(tail.id, "section1_part2");
    assert_eq!(tail.title, "");
    assert_eq!(tail.items.len(), 1);
    assert_eq!(tail.items[0].text, "추가 설명입니다.");
}

#[test]
fn test_section_index_in_ids() {
    let blocks = assemble(4, "예산", "| a | b |\n| 1 | 2 |\n비고\n| c | d |\n| 3 | 4 |");
    let ids: Vec<&str> = blocks.iter().map(ContentBlock::id).collect();
    assert_eq!(
        ids,
        vec!["section5", "table_s5_1", "section5_part1", "table_s5_2"]
    );
}

#[test]
fn test_empty_and_whitespace_sections() {
    for raw in ["", "   \n\n  ", "<p></p><br/>"] {
        let blocks = assemble(0, "추진 전략", raw);
        assert_eq!(blocks.len(), 1, "raw: {:?}", raw);
        let section = blocks[0].as_section().unwrap();
        assert_eq!(section.title, "추진 전략");
        assert!(section.items.is_empty());
    }
}

#[test]
fn test_generated_html_section() {
    let raw = r#"<p><strong>추진 배경</strong></p>
<p>최근 <span class="text-red-500 font-bold">3년간</span> 수요가 <span class="text-blue-600">급증</span>하였다.</p>
<ul><li>현장 인력 부족</li><li>교육 인프라 미비</li></ul>
<table><thead><tr><th>연도</th><th>수요</th></tr></thead><tbody><tr><td>2024</td><td>1,200명</td></tr></tbody></table>
<p>따라서 &quot;체계적 양성&quot;이 필요하다.</p>"#;

    let blocks = assemble(1, "사업 배경", raw);
    let ids: Vec<&str> = blocks.iter().map(ContentBlock::id).collect();
    assert_eq!(ids, vec!["section2", "table_s2_1", "section2_part2"]);

    let items = &blocks[0].as_section().unwrap().items;
    assert_eq!(items[0].text, "추진 배경");
    assert_eq!(items[0].level, Level::H2);
    assert_eq!(items[1].text, "최근 {{red:3년간}} 수요가 {{blue:급증}}하였다.");
    assert!(items.iter().any(|i| i.text == "현장 인력 부족"));

    let table = blocks[1].as_table().unwrap();
    assert_eq!(table.data.rows, vec![vec!["2024", "1,200명"]]);

    let tail = &blocks[2].as_section().unwrap().items;
    assert_eq!(tail[0].text, "따라서 \"체계적 양성\"이 필요하다.");
}

#[test]
fn test_single_column_table_demoted_without_loss() {
    let raw = "목록\n| 첫째 |\n| 둘째 |";
    let parts = split_parts(raw);
    assert_eq!(parts.len(), 1);
    match &parts[0] {
        SectionPart::Text(text) => {
            assert!(text.contains("| 첫째 |"));
            assert!(text.contains("| 둘째 |"));
        }
        SectionPart::Table(_) => panic!("single column table promoted"),
    }

    let blocks = assemble(0, "목록", raw);
    assert!(blocks.iter().all(ContentBlock::is_section));
}

#[test]
fn test_candidate_demote_is_verbatim() {
    let mut candidate = TableCandidate::new();
    candidate.push("| 단일 |");
    candidate.push("|---|");
    assert!(candidate.parse().is_none());
    assert_eq!(candidate.demote(), vec!["| 단일 |", "|---|"]);
}

#[test]
fn test_tables_are_rectangular() {
    let raw = "| a | b | c |\n|---|---|---|\n| 1 |\n| 1 | 2 | 3 | 4 | 5 |\n| | | |";
    let blocks = assemble(0, "", raw);
    for table in blocks.iter().filter_map(ContentBlock::as_table) {
        assert!(table.data.headers.len() >= 2);
        assert!(table.data.rows.iter().all(|r| r.len() == table.data.headers.len()));
    }
}

#[test]
fn test_markers_in_cells_and_paragraphs() {
    let raw = "교육생 {{red:1,200명}} 배출\n| 구분 | 실적 |\n|---|---|\n| 교육 | {{red:1,200명}} |";
    let blocks = assemble(0, "성과", raw);

    let item = &blocks[0].as_section().unwrap().items[0];
    assert_eq!(item.text, "교육생 {{red:1,200명}} 배출");
    let red: Vec<_> = item
        .segments()
        .into_iter()
        .filter(|s| s.color == ProvenanceColor::Red)
        .collect();
    assert_eq!(red.len(), 1);
    assert_eq!(red[0].text, "1,200명");

    assert_eq!(blocks[1].as_table().unwrap().data.rows[0][1], "{{red:1,200명}}");
}

#[test]
fn test_segments_concatenate_to_visible_text() {
    let inputs = [
        "교육생 {{red:1,200명}}을 {{green:체계적으로}} 양성",
        "<p>예산 <span class=\"text-red-500\">3억</span></p><p>집행 &amp; 관리</p>",
        "## 제목\n- **목록** 항목\n~~~~\n※ 참고",
        "{{red:닫히지 않은 마커",
    ];
    for input in inputs {
        let joined: String = extract_segments(input)
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(joined, visible_text(input), "input: {:?}", input);
    }
}

#[test]
fn test_trace_matches_assembly() {
    let raw = "앞\n| a | b |\n| 1 | 2 |\n뒤";
    let options = PipelineOptions::default();
    let trace = trace_section(0, "t", raw, &options);
    assert_eq!(trace.blocks, assemble_section(0, "t", raw, &options));
    assert_eq!(trace.parts.len(), 3);
}
