use std::path::Path;

use expense_charts::canvas::DrawCommand;
use expense_charts::geometry::point_at_angle;
use expense_charts::{
    BarChart, CategoryTotal, Config, Dashboard, DrawList, EventResult, PieChart, PointerEvent, Size,
    TimePoint, category_totals, parse_payload, render_svg,
};

fn load_fixture() -> Vec<expense_charts::payload::Record> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("payload.json");
    let input = std::fs::read_to_string(path).expect("fixture read failed");
    parse_payload(&input).expect("parse failed")
}

#[test]
fn fixture_totals_drive_the_pie() {
    let records = load_fixture();
    let totals = category_totals(&records);
    assert_eq!(totals.len(), 11);
    assert_eq!(totals[0], CategoryTotal::new("Продукты", 2225.5));
    assert_eq!(totals[1], CategoryTotal::new("Transport", 745.0));

    let config = Config::default();
    let mut pie = PieChart::from_config(&config);
    pie.set_size(Size::new(600.0, 600.0));
    pie.set_data(totals);
    let mut canvas = DrawList::new();
    pie.draw(&mut canvas);

    let sweeps: f32 = pie.sectors().iter().map(|range| range.sweep_angle).sum();
    assert!((sweeps - 360.0).abs() < 1e-3);

    // eleven categories against a ten color palette: the last one wraps around
    let colors: Vec<&str> = canvas
        .arcs()
        .map(|cmd| match cmd {
            DrawCommand::Arc { paint, .. } => paint.color.as_str(),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(colors[10], colors[0]);
    assert_ne!(colors[9], colors[0]);
}

#[test]
fn food_and_transport_scenario() {
    let mut pie = PieChart::from_config(&Config::default());
    pie.set_size(Size::new(400.0, 400.0));
    pie.set_data(vec![
        CategoryTotal::new("Food", 100.0),
        CategoryTotal::new("Transport", 300.0),
    ]);
    pie.draw(&mut DrawList::new());

    let angles: Vec<(f32, f32)> = pie
        .sectors()
        .iter()
        .map(|range| (range.start_angle, range.sweep_angle))
        .collect();
    let expected = [(-90.0, 90.0), (0.0, 270.0)];
    for ((start, sweep), (want_start, want_sweep)) in angles.iter().zip(expected) {
        assert!((start - want_start).abs() < 1e-3, "start {start} != {want_start}");
        assert!((sweep - want_sweep).abs() < 1e-3, "sweep {sweep} != {want_sweep}");
    }

    // upper right quadrant is Food, everything clockwise from 3 o'clock is Transport
    assert_eq!(pie.find_category(300.0, 100.0), Some("Food"));
    assert_eq!(pie.find_category(100.0, 100.0), Some("Transport"));
    assert_eq!(pie.find_category(200.0, 350.0), Some("Transport"));
    assert_eq!(pie.find_category(399.0, 399.0), None);
}

#[test]
fn single_point_scenario() {
    let config = Config::default();
    let mut bar = BarChart::from_config(&config);
    bar.set_size(Size::new(1080.0, 900.0));
    bar.set_data(vec![TimePoint::new("01.01.2024 10:00", 50.0)]);

    let layout = bar.layout().expect("non-empty series");
    let chart_width = 1080.0 - 2.0 * config.bar.padding;
    assert_eq!(layout.x_step, chart_width / 2.0);
    assert_eq!(layout.bars[0].center_x, config.bar.padding + chart_width / 4.0);
    assert_eq!(layout.gridlines.last().map(|line| line.value), Some(50.0));
}

#[test]
fn tap_reveals_category_series_in_svg() {
    let mut config = Config::default();
    config.render.width = 1080.0;
    config.render.height = 2000.0;
    let mut dashboard = Dashboard::new(load_fixture(), &config);
    let before = render_svg(&dashboard.scene(), &config.theme);
    assert!(before.contains("<path"));
    assert!(!before.contains("<line"));

    let first = dashboard.pie().sectors()[0];
    let (cx, cy, radius) = dashboard.pie().circle();
    let (x, y) = point_at_angle(cx, cy, radius * 0.5, first.mid_angle());
    assert_eq!(
        dashboard.dispatch(PointerEvent::down(x, y)).unwrap(),
        EventResult::Consumed
    );
    assert_eq!(dashboard.selected(), Some("Продукты"));
    assert_eq!(dashboard.bar().data().len(), 3);
    // source order, not chronological
    assert_eq!(dashboard.bar().data()[2].label, "07.06.2021 10:00");

    let after = render_svg(&dashboard.scene(), &config.theme);
    assert!(after.contains("<line"));
    assert!(after.contains("07.06.2021 10:00"));
    assert!(after.contains("translate(0.00 1000.00)"));
}

#[test]
fn state_round_trip_preserves_both_datasets() {
    let records = load_fixture();
    let mut dashboard = Dashboard::new(records, &Config::default());
    dashboard.select("Transport").unwrap();
    let bytes = dashboard.save_state().unwrap();

    let mut pie_only = PieChart::from_config(&Config::default());
    let rest = pie_only.restore_state(&bytes);
    assert_eq!(pie_only.data(), dashboard.pie().data());

    let mut bar_only = BarChart::from_config(&Config::default());
    bar_only.restore_state(&rest);
    assert_eq!(bar_only.data(), dashboard.bar().data());
    assert_eq!(bar_only.data().len(), 3);
}
