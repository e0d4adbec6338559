//! Pie chart: proportional sectors, angular hit-testing and selection.

use crate::canvas::{Canvas, Paint};
use crate::config::{Config, PieConfig};
use crate::error::StateError;
use crate::event::{EventResult, PointerAction, PointerEvent};
use crate::geometry::{angle_of_point, distance, normalize_angle_degrees};
use crate::measure::{MeasureSpec, measure};
use crate::model::{CategoryTotal, Rect, SectorAngleRange, Size};
use crate::state::{self, PIE_TAG};
use crate::theme::default_pie_colors;

pub type SelectHandler = Box<dyn FnMut(&str)>;

/// Sweep angles for `data`, laid out consecutively from `start_angle`.
///
/// Negative values count as zero. When the total is zero every sweep is zero.
/// Each sector ends exactly where the next one starts, and the last one never
/// runs past `start_angle + 360`.
pub fn compute_sectors(data: &[CategoryTotal], start_angle: f32) -> Vec<SectorAngleRange> {
    let total: f32 = data.iter().map(|entry| entry.value.max(0.0)).sum();
    let scale = if total > 0.0 { 360.0 / total } else { 0.0 };
    let mut angle = start_angle;
    let mut sectors: Vec<SectorAngleRange> = data
        .iter()
        .map(|entry| {
            let sweep_angle = entry.value.max(0.0) * scale;
            let range = SectorAngleRange {
                start_angle: angle,
                sweep_angle,
            };
            angle += sweep_angle;
            range
        })
        .collect();

    // rounding can push the accumulated end a few ulps over the full turn
    let full_turn = start_angle + 360.0;
    if let Some(last) = sectors.iter().rposition(|range| range.sweep_angle > 0.0) {
        let range = &mut sectors[last];
        while range.end_angle() > full_turn {
            range.sweep_angle = f32::from_bits(range.sweep_angle.to_bits() - 1);
        }
        let end = range.end_angle();
        for empty in &mut sectors[last + 1..] {
            empty.start_angle = end;
        }
    }
    sectors
}

/// Whether `angle` lies in `[start, start + sweep)` modulo 360, measured as an
/// offset from the start. The span ends at the same `f32` the next sector
/// starts from.
pub fn sector_contains(range: &SectorAngleRange, angle: f32) -> bool {
    let start = f64::from(range.start_angle);
    let span = f64::from(range.end_angle()) - start;
    if span <= 0.0 {
        return false;
    }
    let offset = (f64::from(angle) - start).rem_euclid(360.0);
    offset < span
}

pub struct PieChart {
    data: Vec<CategoryTotal>,
    sectors: Vec<SectorAngleRange>,
    palette: Vec<String>,
    config: PieConfig,
    size: Size,
    on_select: Option<SelectHandler>,
    redraw_requested: bool,
}

impl PieChart {
    pub fn new(palette: Vec<String>, config: PieConfig) -> Self {
        let palette = if palette.is_empty() {
            default_pie_colors()
        } else {
            palette
        };
        Self {
            data: Vec::new(),
            sectors: Vec::new(),
            palette,
            size: config.desired_size,
            config,
            on_select: None,
            redraw_requested: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.theme.pie_colors.clone(), config.pie.clone())
    }

    pub fn set_data(&mut self, data: Vec<CategoryTotal>) {
        log::debug!("pie chart: {} categories", data.len());
        self.data = data;
        // ranges from the previous draw no longer line up with the data
        self.sectors.clear();
        self.redraw_requested = true;
    }

    pub fn data(&self) -> &[CategoryTotal] {
        &self.data
    }

    /// Registers the selection handler, replacing any previous one.
    pub fn on_select<F>(&mut self, handler: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.on_select = Some(Box::new(handler));
    }

    pub fn clear_on_select(&mut self) {
        self.on_select = None;
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

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    pub fn color_for(&self, index: usize) -> &str {
        &self.palette[index % self.palette.len()]
    }

    /// Center and radius of the pie: a circle inscribed in the smaller dimension.
    pub fn circle(&self) -> (f32, f32, f32) {
        let cx = self.size.width / 2.0;
        let cy = self.size.height / 2.0;
        let radius = self.size.width.min(self.size.height) / 2.0;
        (cx, cy, radius.max(0.0))
    }

    /// Ranges recorded by the last [`PieChart::draw`].
    pub fn sectors(&self) -> &[SectorAngleRange] {
        &self.sectors
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.sectors.clear();
        if self.data.is_empty() {
            return;
        }
        let (cx, cy, radius) = self.circle();
        let oval = Rect::new(cx - radius, cy - radius, cx + radius, cy + radius);
        let sectors = compute_sectors(&self.data, self.config.start_angle);
        for (index, range) in sectors.iter().enumerate() {
            let paint = Paint::fill(self.color_for(index));
            canvas.draw_arc(oval, range.start_angle, range.sweep_angle, true, &paint);
        }
        self.sectors = sectors;
    }

    /// Index of the sector under `(x, y)`, if any.
    pub fn find_sector(&self, x: f32, y: f32) -> Option<usize> {
        let (cx, cy, radius) = self.circle();
        if distance(cx, cy, x, y) > radius {
            return None;
        }
        let angle = normalize_angle_degrees(angle_of_point(cx, cy, x, y));
        self.sectors
            .iter()
            .position(|range| sector_contains(range, angle))
            .filter(|&index| index < self.data.len())
    }

    pub fn find_category(&self, x: f32, y: f32) -> Option<&str> {
        self.find_sector(x, y)
            .map(|index| self.data[index].label.as_str())
    }

    /// Hit-tests presses and notifies the selection handler; everything else passes through.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> EventResult {
        if event.action != PointerAction::Down {
            return EventResult::Ignored;
        }
        let Some(index) = self.find_sector(event.x, event.y) else {
            log::trace!("pie chart: press at ({}, {}) missed", event.x, event.y);
            return EventResult::Consumed;
        };
        let label = self.data[index].label.clone();
        log::debug!("pie chart: selected {label:?}");
        if let Some(handler) = self.on_select.as_mut() {
            handler(&label);
        }
        EventResult::Consumed
    }

    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn save_state(&self, base: &[u8]) -> Result<Vec<u8>, StateError> {
        state::encode(
            PIE_TAG,
            base,
            self.data
                .iter()
                .map(|entry| (entry.label.as_str(), entry.value)),
        )
    }

    /// Reinstates a saved dataset and returns the host's base state.
    ///
    /// Unrecognized input leaves the chart empty and is handed back whole.
    pub fn restore_state(&mut self, bytes: &[u8]) -> Vec<u8> {
        match state::decode(PIE_TAG, bytes) {
            Ok(saved) => {
                self.set_data(
                    saved
                        .entries
                        .into_iter()
                        .map(|(label, value)| CategoryTotal { label, value })
                        .collect(),
                );
                saved.base
            }
            Err(err) => {
                log::warn!("pie chart: discarding saved state: {err}");
                self.set_data(Vec::new());
                bytes.to_vec()
            }
        }
    }
}
