//! Benchmarks for hwpxprep pipeline performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic generated sections mixing paragraphs,
//! markers, pipe tables and HTML tables.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hwpxprep::{GenerateRequest, Pipeline, PipelineOptions, SectionInput};

/// Creates a synthetic section resembling generated proposal text.
fn create_section_text(paragraphs: usize) -> String {
    let mut text = String::new();

    for i in 0..paragraphs {
        text.push_str(&format!(
            "<p>{}. 추진 과제 {}</p><p>교육생 <span class=\"text-red-500\">{}명</span>을 \
             {{{{green:체계적으로}}}} 양성하여 지역 산업 경쟁력을 높인다.</p>\n",
            i + 1,
            i + 1,
            (i + 1) * 100
        ));

        if i % 3 == 0 {
            text.push_str("| 항목 | 목표 | 비고 |\n|---|---|---|\n");
            text.push_str(&format!("| 교육 | {{{{red:{}명}}}} | 연간 |\n", i * 10));
            text.push_str("| 취업 | 80% | |\n\n");
        }
        if i % 5 == 0 {
            text.push_str(
                "<table><tr><th>구분</th><th>내용</th></tr><tr><td>예산</td><td>3억 원</td></tr></table>\n",
            );
        }
    }

    text
}

fn create_request(sections: usize, paragraphs: usize) -> GenerateRequest {
    GenerateRequest::new(
        (0..sections)
            .map(|i| SectionInput::new(format!("섹션 {}", i + 1), create_section_text(paragraphs)))
            .collect(),
    )
}

/// Benchmark single section assembly.
fn bench_section_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("section_assembly");
    let options = PipelineOptions::default();

    for paragraphs in [5, 20, 50].iter() {
        let raw = create_section_text(*paragraphs);

        group.bench_function(format!("{}_paragraphs", paragraphs), |b| {
            b.iter(|| hwpxprep::parser::assemble_section(0, "개요", black_box(&raw), &options));
        });
    }

    group.finish();
}

/// Benchmark segment extraction.
fn bench_segment_extraction(c: &mut Criterion) {
    let line = "교육생 {{red:1,200명}}을 <b>체계적으로</b> {{green:AI 기반}} 교육으로 양성 &amp; 배출";

    c.bench_function("extract_segments", |b| {
        b.iter(|| hwpxprep::parser::extract_segments(black_box(line)));
    });
}

/// Benchmark full documents, parallel against sequential.
fn bench_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");
    let request = create_request(12, 20);

    group.bench_function("parallel", |b| {
        let pipeline = Pipeline::new();
        b.iter(|| pipeline.run(black_box(&request)));
    });

    group.bench_function("sequential", |b| {
        let pipeline = Pipeline::new().sequential();
        b.iter(|| pipeline.run(black_box(&request)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_section_assembly,
    bench_segment_extraction,
    bench_document,
);
criterion_main!(benches);
