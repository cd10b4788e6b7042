use chart_submit::api::EXAMPLE_OPTION;
use chart_submit::core::{EChartsSummary, parse_chart_spec};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn large_option_literal(points: usize) -> String {
    let data: Vec<String> = (0..points).map(|i| format!("{}", (i * 37) % 1_000)).collect();
    let categories: Vec<String> = (0..points).map(|i| format!("'d{i}'")).collect();
    format!(
        "option = {{\n  xAxis: {{ data: [{}] }},\n  series: [{{ type: 'line', data: [{}], }}],\n}};",
        categories.join(", "),
        data.join(", ")
    )
}

fn bench_example_option_parse(c: &mut Criterion) {
    c.bench_function("example_option_parse", |b| {
        b.iter(|| {
            let _ = parse_chart_spec(black_box(EXAMPLE_OPTION)).expect("example parses");
        })
    });
}

fn bench_literal_vs_json_10k(c: &mut Criterion) {
    let literal = large_option_literal(10_000);
    let spec = parse_chart_spec(&literal).expect("literal parses");
    let json = serde_json::to_string(spec.as_value()).expect("encode");

    c.bench_function("object_literal_parse_10k", |b| {
        b.iter(|| {
            let _ = parse_chart_spec(black_box(&literal)).expect("literal parses");
        })
    });
    c.bench_function("strict_json_parse_10k", |b| {
        b.iter(|| {
            let _ = parse_chart_spec(black_box(&json)).expect("json parses");
        })
    });
}

fn bench_summary_10k(c: &mut Criterion) {
    let spec = parse_chart_spec(&large_option_literal(10_000)).expect("literal parses");

    c.bench_function("echarts_summary_10k", |b| {
        b.iter(|| {
            let _ = EChartsSummary::from_spec(black_box(&spec)).warnings();
        })
    });
}

criterion_group!(
    benches,
    bench_example_option_parse,
    bench_literal_vs_json_10k,
    bench_summary_10k
);
criterion_main!(benches);
