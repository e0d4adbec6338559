use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use expense_charts::bar::compute_layout;
use expense_charts::config::{BarConfig, Config};
use expense_charts::dashboard::Dashboard;
use expense_charts::geometry::point_at_angle;
use expense_charts::model::{CategoryTotal, Size, TimePoint};
use expense_charts::payload::parse_payload;
use expense_charts::pie::{PieChart, compute_sectors};
use expense_charts::render::render_svg;
use expense_charts::canvas::DrawList;
use std::hint::black_box;

fn categories(count: usize) -> Vec<CategoryTotal> {
    (0..count)
        .map(|i| CategoryTotal::new(format!("Category {i}"), ((i * 37) % 101 + 1) as f32))
        .collect()
}

fn series(count: usize) -> Vec<TimePoint> {
    (0..count)
        .map(|i| {
            TimePoint::new(
                format!("{:02}.06.2021 10:00", i % 28 + 1),
                ((i * 53) % 997) as f32,
            )
        })
        .collect()
}

fn fixture() -> &'static str {
    include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/payload.json"
    ))
}

fn bench_sectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("sectors");
    for count in [10usize, 100, 1000] {
        let data = categories(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &data, |b, data| {
            b.iter(|| black_box(compute_sectors(black_box(data), -90.0)));
        });
    }
    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");
    for count in [10usize, 100, 1000] {
        let mut pie = PieChart::from_config(&Config::default());
        pie.set_size(Size::new(800.0, 800.0));
        pie.set_data(categories(count));
        pie.draw(&mut DrawList::new());
        let taps: Vec<(f32, f32)> = (0..64)
            .map(|i| point_at_angle(400.0, 400.0, 300.0, i as f32 * 5.625))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &taps, |b, taps| {
            b.iter(|| {
                for &(x, y) in taps {
                    black_box(pie.find_sector(x, y));
                }
            });
        });
    }
    group.finish();
}

fn bench_bar_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("bar_layout");
    let config = BarConfig::default();
    for count in [1usize, 30, 365] {
        let data = series(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &data, |b, data| {
            b.iter(|| black_box(compute_layout(black_box(data), Size::new(1080.0, 900.0), &config)));
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let config = Config::default();
    c.bench_function("end_to_end", |b| {
        b.iter(|| {
            let records = parse_payload(black_box(fixture())).expect("parse failed");
            let mut dashboard = Dashboard::new(records, &config);
            dashboard.scene();
            dashboard.select("Transport").expect("select failed");
            let svg = render_svg(&dashboard.scene(), &config.theme);
            black_box(svg.len());
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_sectors, bench_hit_test, bench_bar_layout, bench_end_to_end
);
criterion_main!(benches);
