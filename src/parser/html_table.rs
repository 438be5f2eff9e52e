//! HTML table pre-pass.
//!
//! Generated sections sometimes contain `<table>` markup instead of pipe
//! rows. Each table is rewritten into pipe rows so the line scanner in
//! [`super::table_detector`] sees a single table syntax.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::provenance::normalize_cell;

static RE_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<table\b[^>]*>(.*?)</table\s*>").expect("valid table regex")
});
static RE_TH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<th\b[^>]*>(.*?)</th\s*>").expect("valid th regex"));
static RE_TR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>").expect("valid tr regex"));
static RE_TD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td\b[^>]*>(.*?)</td\s*>").expect("valid td regex"));
static RE_THEAD_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</thead\s*>").expect("valid thead regex"));

/// Replace every `<table>` element with equivalent pipe rows.
///
/// A table with neither header nor body cells is removed.
pub fn convert_html_tables(text: &str) -> String {
    if !RE_TABLE.is_match(text) {
        return text.to_string();
    }

    RE_TABLE
        .replace_all(text, |caps: &Captures| {
            let (headers, rows) = read_table(&caps[1]);
            if headers.is_empty() && rows.is_empty() {
                log::debug!("dropping empty html table");
                return String::new();
            }
            log::debug!(
                "html table converted: {} columns, {} rows",
                headers.len(),
                rows.len()
            );
            pipe_rows(&headers, &rows)
        })
        .into_owned()
}

fn read_table(inner: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let mut headers: Vec<String> = RE_TH.captures_iter(inner).map(|c| cell(&c[1])).collect();

    let body = match RE_THEAD_END.find(inner) {
        Some(m) => &inner[m.end()..],
        None => inner,
    };

    let mut rows: Vec<Vec<String>> = RE_TR
        .captures_iter(body)
        .filter(|tr| !RE_TH.is_match(&tr[1]))
        .map(|tr| RE_TD.captures_iter(&tr[1]).map(|c| cell(&c[1])).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect();

    if headers.is_empty() && !rows.is_empty() {
        headers = rows.remove(0);
    }

    (headers, rows)
}

/// Clean a cell and keep it from breaking the row syntax.
fn cell(html: &str) -> String {
    normalize_cell(html).replace('|', "｜")
}

fn pipe_rows(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::from("\n");
    out.push_str(&format!("| {} |\n", headers.join(" | ")));
    out.push_str(&format!("| {} |\n", vec!["---"; headers.len()].join(" | ")));
    for row in rows {
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_with_thead() {
        let html = "앞 문단\n<table class=\"w-full\"><thead><tr><th>항목</th><th>내용</th></tr></thead>\
                    <tbody><tr><td>A</td><td><b>1</b></td></tr><tr><td>B</td><td>2</td></tr></tbody></table>뒤";
        let converted = convert_html_tables(html);
        assert_eq!(
            converted,
            "앞 문단\n\n| 항목 | 내용 |\n| --- | --- |\n| A | 1 |\n| B | 2 |\n뒤"
        );
    }

    #[test]
    fn test_header_fallback_to_first_row() {
        let html = "<TABLE><tr><td>이름</td><td>역할</td></tr><tr><td>김</td><td>PM</td></tr></TABLE>";
        assert_eq!(
            convert_html_tables(html),
            "\n| 이름 | 역할 |\n| --- | --- |\n| 김 | PM |\n"
        );
    }

    #[test]
    fn test_header_row_without_thead_skipped_in_body() {
        let html = "<table><tr><th>a</th><th>b</th></tr><tr><td>1</td><td>2</td></tr></table>";
        assert_eq!(convert_html_tables(html), "\n| a | b |\n| --- | --- |\n| 1 | 2 |\n");
    }

    #[test]
    fn test_pipe_in_cell_escaped() {
        let html = "<table><tr><th>식</th><th>값</th></tr><tr><td>a|b</td><td>1</td></tr></table>";
        assert!(convert_html_tables(html).contains("| a｜b | 1 |"));
    }

    #[test]
    fn test_markers_and_spans_in_cells() {
        let html = r#"<table><tr><th>성과</th><th>수치</th></tr><tr><td>교육</td><td><span class="text-red-500">1,200명</span></td></tr></table>"#;
        assert!(convert_html_tables(html).contains("| 교육 | {{red:1,200명}} |"));
    }

    #[test]
    fn test_empty_table_removed() {
        assert_eq!(convert_html_tables("앞<table><tr></tr></table>뒤"), "앞뒤");
    }

    #[test]
    fn test_no_table_untouched() {
        let text = "| a | b |\n| 1 | 2 |";
        assert_eq!(convert_html_tables(text), text);
    }
}
