//! Bar chart for one category's time series.

use crate::canvas::{Canvas, Paint, TextAlign};
use crate::config::{BarConfig, Config};
use crate::error::StateError;
use crate::measure::{MeasureSpec, measure};
use crate::model::{Rect, Size, TimePoint};
use crate::state::{self, BAR_TAG};
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub struct Gridline {
    pub value: f32,
    pub y: f32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub value: f32,
    pub center_x: f32,
    pub rect: Rect,
    pub label: String,
    pub label_x: f32,
    pub label_y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartLayout {
    pub chart_width: f32,
    pub chart_height: f32,
    pub max_value: f32,
    pub x_step: f32,
    pub y_step: f32,
    /// Vertical axis as `(x, top, bottom)`.
    pub axis: (f32, f32, f32),
    pub gridlines: Vec<Gridline>,
    pub bars: Vec<BarLayout>,
}

/// Maps `data` into the plotting area of a `size` view; `None` for an empty series.
pub fn compute_layout(data: &[TimePoint], size: Size, config: &BarConfig) -> Option<BarChartLayout> {
    if data.is_empty() {
        return None;
    }
    let padding = config.padding;
    let chart_width = size.width - 2.0 * padding;
    let chart_height = size.height - 2.0 * padding;
    let baseline = size.height - padding;

    let max_value = data
        .iter()
        .map(|point| point.value)
        .fold(f32::NEG_INFINITY, f32::max);
    let y_step = if max_value > 0.0 {
        chart_height / max_value
    } else {
        0.0
    };
    // a lone bar gets half the width rather than the whole plot
    let x_step = if data.len() == 1 {
        chart_width / 2.0
    } else {
        chart_width / data.len() as f32
    };

    let steps = config.grid_steps.max(1);
    let gridlines = (0..=steps)
        .map(|i| {
            let value = if i == steps {
                max_value
            } else {
                max_value / steps as f32 * i as f32
            };
            Gridline {
                value,
                y: baseline - value * y_step,
                label: (value.trunc() as i64).to_string(),
            }
        })
        .collect();

    let bar_width = x_step * config.bar_width_ratio;
    let bars = data
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let center_x = padding + i as f32 * x_step + x_step / 2.0;
            let top = baseline - point.value * y_step;
            BarLayout {
                value: point.value,
                center_x,
                rect: Rect::new(
                    center_x - bar_width / 2.0,
                    top,
                    center_x + bar_width / 2.0,
                    baseline,
                ),
                label: point.label.clone(),
                label_x: center_x + config.bar_label_offset.0,
                label_y: baseline + config.bar_label_offset.1,
            }
        })
        .collect();

    Some(BarChartLayout {
        chart_width,
        chart_height,
        max_value,
        x_step,
        y_step,
        axis: (padding, padding, baseline),
        gridlines,
        bars,
    })
}

#[derive(Debug, Clone)]
struct BarPaints {
    axis: Paint,
    grid: Paint,
    text: Paint,
    bar: Paint,
}

impl BarPaints {
    fn new(theme: &Theme, config: &BarConfig) -> Self {
        Self {
            axis: Paint::stroke(theme.axis_color.as_str(), config.axis_stroke_width),
            grid: Paint::stroke(theme.grid_color.as_str(), config.grid_stroke_width),
            text: Paint::text(theme.text_color.as_str(), config.text_size, TextAlign::Right),
            bar: Paint::fill(theme.bar_color()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BarChart {
    data: Vec<TimePoint>,
    config: BarConfig,
    paints: BarPaints,
    size: Size,
    redraw_requested: bool,
}

impl BarChart {
    pub fn new(theme: &Theme, config: BarConfig) -> Self {
        Self {
            data: Vec::new(),
            paints: BarPaints::new(theme, &config),
            size: config.desired_size,
            config,
            redraw_requested: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.theme, config.bar.clone())
    }

    pub fn set_data(&mut self, data: Vec<TimePoint>) {
        log::debug!("bar chart: {} points", data.len());
        self.data = data;
        self.redraw_requested = true;
    }

    pub fn data(&self) -> &[TimePoint] {
        &self.data
    }

    pub fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size {
        measure(self.config.desired_size, width, height)
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn layout(&self) -> Option<BarChartLayout> {
        compute_layout(&self.data, self.size, &self.config)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let Some(layout) = self.layout() else {
            return;
        };
        let paints = &self.paints;
        let (axis_x, axis_top, axis_bottom) = layout.axis;
        canvas.draw_line(axis_x, axis_top, axis_x, axis_bottom, &paints.axis);

        let right = self.size.width - self.config.padding;
        let (label_dx, label_dy) = self.config.value_label_offset;
        for line in &layout.gridlines {
            canvas.draw_line(axis_x, line.y, right, line.y, &paints.grid);
            canvas.draw_text(&line.label, axis_x + label_dx, line.y + label_dy, &paints.text);
        }

        for bar in &layout.bars {
            canvas.draw_rect(bar.rect, &paints.bar);
            canvas.draw_text(&bar.label, bar.label_x, bar.label_y, &paints.text);
        }
    }

    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn save_state(&self, base: &[u8]) -> Result<Vec<u8>, StateError> {
        state::encode(
            BAR_TAG,
            base,
            self.data
                .iter()
                .map(|point| (point.label.as_str(), point.value)),
        )
    }

    /// Reinstates a saved series and returns the host's base state.
    pub fn restore_state(&mut self, bytes: &[u8]) -> Vec<u8> {
        match state::decode(BAR_TAG, bytes) {
            Ok(saved) => {
                self.set_data(
                    saved
                        .entries
                        .into_iter()
                        .map(|(label, value)| TimePoint { label, value })
                        .collect(),
                );
                saved.base
            }
            Err(err) => {
                log::warn!("bar chart: discarding saved state: {err}");
                self.set_data(Vec::new());
                bytes.to_vec()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, DrawList};
    use crate::pie::PieChart;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn points(values: &[f32]) -> Vec<TimePoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| TimePoint::new(format!("0{}.01.2024 10:00", i + 1), *v))
            .collect()
    }

    fn chart(data: Vec<TimePoint>, size: Size) -> BarChart {
        let mut chart = BarChart::new(&Theme::classic(), BarConfig::default());
        chart.set_size(size);
        chart.set_data(data);
        chart
    }

    #[test]
    fn single_point_takes_half_the_width() {
        let size = Size::new(1000.0, 800.0);
        let layout = compute_layout(
            &[TimePoint::new("01.01.2024 10:00", 50.0)],
            size,
            &BarConfig::default(),
        )
        .unwrap();
        assert_eq!(layout.chart_width, 700.0);
        assert!(approx(layout.x_step, 350.0));
        assert!(approx(layout.bars[0].center_x, 150.0 + 700.0 / 4.0));
        assert!(approx(layout.bars[0].rect.width(), 280.0));
    }

    #[test]
    fn slots_divide_the_plot_evenly() {
        let size = Size::new(1000.0, 800.0);
        let layout = compute_layout(&points(&[10.0, 20.0, 5.0, 40.0]), size, &BarConfig::default())
            .unwrap();
        assert!(approx(layout.x_step, 175.0));
        for (i, bar) in layout.bars.iter().enumerate() {
            assert!(approx(bar.center_x, 150.0 + i as f32 * 175.0 + 87.5));
            assert!(approx(bar.rect.bottom, 650.0));
        }
        // tallest bar reaches the top of the plot
        assert!(approx(layout.bars[3].rect.top, 150.0));
        assert!(approx(layout.bars[0].rect.height(), 500.0 / 4.0));
    }

    #[test]
    fn gridlines_span_zero_to_max() {
        let layout = compute_layout(
            &points(&[13.0, 77.7]),
            Size::new(1000.0, 800.0),
            &BarConfig::default(),
        )
        .unwrap();
        assert_eq!(layout.gridlines.len(), 6);
        for (i, line) in layout.gridlines.iter().enumerate() {
            assert!(approx(line.value, 77.7 / 5.0 * i as f32));
        }
        assert_eq!(layout.gridlines[5].value, layout.max_value);
        assert!(approx(layout.gridlines[0].y, 650.0));
        assert!(approx(layout.gridlines[5].y, 150.0));
        let labels: Vec<&str> = layout.gridlines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "15", "31", "46", "62", "77"]);
    }

    #[test]
    fn zero_maximum_flattens_bars() {
        let layout = compute_layout(&points(&[0.0, 0.0]), Size::new(600.0, 600.0), &BarConfig::default())
            .unwrap();
        assert_eq!(layout.y_step, 0.0);
        assert!(layout.bars.iter().all(|bar| bar.rect.height() == 0.0));
        assert!(layout.gridlines.iter().all(|line| line.label == "0"));
    }

    #[test]
    fn draw_order_is_axis_grid_then_bars() {
        let chart = chart(points(&[10.0, 20.0]), Size::new(1000.0, 800.0));
        let mut canvas = DrawList::new();
        chart.draw(&mut canvas);

        let DrawCommand::Line { x1, y1, x2, y2, paint } = &canvas.commands[0] else {
            panic!("expected axis line first");
        };
        assert_eq!((*x1, *y1, *x2, *y2), (150.0, 150.0, 150.0, 650.0));
        assert_eq!(paint.stroke_width, 5.0);
        assert_eq!(canvas.lines().count(), 7);
        assert_eq!(canvas.rects().count(), 2);
        assert_eq!(canvas.texts().count(), 8);

        let DrawCommand::Text { text, x, y, paint } = &canvas.commands[canvas.len() - 1] else {
            panic!("expected bar label last");
        };
        assert_eq!(text, "02.01.2024 10:00");
        assert!(approx(*x, 150.0 + 350.0 + 175.0 - 30.0));
        assert!(approx(*y, 690.0));
        assert_eq!(paint.text_align, TextAlign::Right);
    }

    #[test]
    fn empty_series_draws_nothing() {
        let chart = chart(Vec::new(), Size::new(1000.0, 800.0));
        let mut canvas = DrawList::new();
        chart.draw(&mut canvas);
        assert!(canvas.is_empty());
    }

    #[test]
    fn state_survives_reconstruction() {
        let data = points(&[50.0, 12.5, 99.0]);
        let original = chart(data.clone(), Size::new(500.0, 500.0));
        let bytes = original.save_state(&[]).unwrap();

        let mut restored = BarChart::new(&Theme::classic(), BarConfig::default());
        assert!(restored.restore_state(&bytes).is_empty());
        assert_eq!(restored.data(), data.as_slice());
    }

    #[test]
    fn pie_state_is_not_accepted() {
        let mut pie = PieChart::new(Vec::new(), Default::default());
        pie.set_data(vec![crate::model::CategoryTotal::new("Food", 1.0)]);
        let bytes = pie.save_state(b"x").unwrap();

        let mut bar = chart(points(&[1.0]), Size::new(500.0, 500.0));
        assert_eq!(bar.restore_state(&bytes), bytes);
        assert!(bar.data().is_empty());
    }

    #[test]
    fn measures_like_the_pie() {
        let chart = BarChart::new(&Theme::classic(), BarConfig::default());
        assert_eq!(
            chart.measure(MeasureSpec::AtMost(80.0), MeasureSpec::Unspecified),
            Size::new(80.0, 100.0)
        );
    }
}
