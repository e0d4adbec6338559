//! Single-screen composition: the pie chart on top, and the bar chart for the
//! tapped category below it once something has been selected.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::bar::BarChart;
use crate::canvas::DrawList;
use crate::config::Config;
use crate::error::{PayloadError, StateError};
use crate::event::{EventResult, PointerEvent};
use crate::model::Size;
use crate::payload::{Record, category_series, category_totals, utc_offset};
use crate::pie::PieChart;
use crate::render::{Layer, Scene};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShellState {
    selected: Option<String>,
    bar_visible: bool,
}

pub struct Dashboard {
    records: Vec<Record>,
    offset: FixedOffset,
    pie: PieChart,
    bar: BarChart,
    bar_visible: bool,
    selected: Option<String>,
    pending: Rc<RefCell<Option<String>>>,
    size: Size,
}

impl Dashboard {
    pub fn new(records: Vec<Record>, config: &Config) -> Self {
        let mut pie = PieChart::from_config(config);
        let pending = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&pending);
        pie.on_select(move |label| {
            slot.replace(Some(label.to_string()));
        });
        pie.set_data(category_totals(&records));

        let mut dashboard = Self {
            records,
            offset: utc_offset(config.payload.utc_offset_minutes),
            pie,
            bar: BarChart::from_config(config),
            bar_visible: false,
            selected: None,
            pending,
            size: Size::default(),
        };
        dashboard.set_size(Size::new(config.render.width, config.render.height));
        dashboard
    }

    pub fn pie(&self) -> &PieChart {
        &self.pie
    }

    pub fn bar(&self) -> &BarChart {
        &self.bar
    }

    pub fn bar_visible(&self) -> bool {
        self.bar_visible
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Splits the screen: pie in the top half, bar chart in the bottom half.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        let half = Size::new(size.width, size.height / 2.0);
        self.pie.set_size(half);
        self.bar.set_size(half);
    }

    /// Shows the series of `category` in the bar chart.
    pub fn select(&mut self, category: &str) -> Result<(), PayloadError> {
        let series = category_series(&self.records, category, self.offset)?;
        log::info!("showing {} records for {category:?}", series.len());
        self.bar.set_data(series);
        self.bar_visible = true;
        self.selected = Some(category.to_string());
        Ok(())
    }

    /// Routes a pointer event given in screen coordinates.
    pub fn dispatch(&mut self, event: PointerEvent) -> Result<EventResult, PayloadError> {
        if event.y >= self.pie.size().height {
            return Ok(EventResult::Ignored);
        }
        let result = self.pie.on_pointer_event(event);
        let selected = self.pending.borrow_mut().take();
        if let Some(category) = selected {
            self.select(&category)?;
        }
        Ok(result)
    }

    pub fn take_redraw_request(&mut self) -> bool {
        let pie = self.pie.take_redraw_request();
        let bar = self.bar.take_redraw_request();
        pie || bar
    }

    /// Draws both charts; this also records the sectors used for hit-testing.
    pub fn scene(&mut self) -> Scene {
        let mut pie_commands = DrawList::new();
        self.pie.draw(&mut pie_commands);
        let mut layers = vec![Layer {
            x: 0.0,
            y: 0.0,
            commands: pie_commands,
        }];
        if self.bar_visible {
            let mut bar_commands = DrawList::new();
            self.bar.draw(&mut bar_commands);
            layers.push(Layer {
                x: 0.0,
                y: self.pie.size().height,
                commands: bar_commands,
            });
        }
        Scene {
            width: self.size.width,
            height: self.size.height,
            layers,
        }
    }

    /// Chains the component states: pie wraps bar wraps the dashboard's own.
    pub fn save_state(&self) -> Result<Vec<u8>, StateError> {
        let shell = ShellState {
            selected: self.selected.clone(),
            bar_visible: self.bar_visible,
        };
        let shell_bytes = serde_json::to_vec(&shell)
            .map_err(|err| StateError::Io(std::io::Error::other(err)))?;
        let bar_bytes = self.bar.save_state(&shell_bytes)?;
        self.pie.save_state(&bar_bytes)
    }

    pub fn restore_state(&mut self, bytes: &[u8]) {
        let bar_bytes = self.pie.restore_state(bytes);
        let shell_bytes = self.bar.restore_state(&bar_bytes);
        let shell: ShellState = serde_json::from_slice(&shell_bytes).unwrap_or_else(|err| {
            log::warn!("dashboard: discarding saved selection: {err}");
            ShellState::default()
        });
        self.selected = shell.selected;
        self.bar_visible = shell.bar_visible;
        self.pending.replace(None);
    }
}
