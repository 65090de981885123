use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use roadmap_renderer::config::LayoutConfig;
use roadmap_renderer::drawio::render_drawio_file;
use roadmap_renderer::layout::{assign_rows, compute_layout};
use roadmap_renderer::parser::parse_roadmap;
use roadmap_renderer::render::render_svg;
use roadmap_renderer::resolve::resolve;
use roadmap_renderer::theme::Theme;
use std::hint::black_box;

fn synthetic_roadmap(periods: usize, lanes: usize, items_per_lane: usize) -> String {
    let mut out = String::from("# Synthetic\n## Periods\n");
    let labels: Vec<String> = (0..periods.max(1)).map(|i| format!("P{}", i + 1)).collect();
    out.push_str(&labels.join(", "));
    out.push('\n');
    for lane in 0..lanes {
        out.push_str(&format!("## Team: Lane {}\n", lane));
        for item in 0..items_per_lane {
            let start = (item * 7 + lane * 3) % periods.max(1);
            let length = 1 + (item % 3);
            if item % 2 == 0 {
                out.push_str(&format!(
                    "- Item {}.{} | start: P{} | length: {}\n",
                    lane,
                    item,
                    start + 1,
                    length
                ));
            } else {
                out.push_str(&format!(
                    "- Item {}.{} | start: P{}+(P2-P1)/2 | end: P{}\n",
                    lane,
                    item,
                    start + 1,
                    (start + length).min(periods.max(1)) + 1
                ));
            }
        }
    }
    out
}

fn fixture(name: &str) -> String {
    match name {
        "quarterly_small" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/benches/fixtures/quarterly_small.roadmap"
        ))
        .to_string(),
        "sprints_medium" => synthetic_roadmap(12, 6, 20),
        "years_large" => synthetic_roadmap(40, 20, 50),
        _ => panic!("unknown fixture: {name}"),
    }
}

const FIXTURES: [&str; 3] = ["quarterly_small", "sprints_medium", "years_large"];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for name in FIXTURES {
        let input = fixture(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| black_box(parse_roadmap(black_box(data))));
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for name in FIXTURES {
        let doc = parse_roadmap(&fixture(name));
        group.bench_with_input(BenchmarkId::from_parameter(name), &doc, |b, data| {
            b.iter(|| black_box(resolve(black_box(data), None)));
        });
    }
    group.finish();
}

fn bench_row_packing(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_packing");
    for count in [10usize, 100, 1000] {
        let intervals: Vec<(f64, f64)> = (0..count)
            .map(|i| {
                let start = ((i * 37) % 97) as f64 / 4.0;
                (start, start + 1.0 + (i % 5) as f64)
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &intervals, |b, data| {
            b.iter(|| black_box(assign_rows(black_box(data))));
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let theme = Theme::modern();
    let config = LayoutConfig::default();
    for name in FIXTURES {
        let resolved = resolve(&parse_roadmap(&fixture(name)), None);
        group.bench_with_input(BenchmarkId::from_parameter(name), &resolved, |b, data| {
            b.iter(|| black_box(compute_layout(black_box(data), &theme, &config)));
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::modern();
    let config = LayoutConfig::default();
    for name in FIXTURES {
        let input = fixture(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let resolved = resolve(&parse_roadmap(black_box(data)), None);
                let layout = compute_layout(&resolved, &theme, &config);
                let svg = render_svg(&layout, &theme);
                let drawio = render_drawio_file(&layout, &theme, true).expect("export failed");
                black_box(svg.len() + drawio.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_resolve, bench_row_packing, bench_layout, bench_end_to_end
);
criterion_main!(benches);
