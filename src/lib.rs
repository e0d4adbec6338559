pub mod bar;
pub mod canvas;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod geometry;
pub mod measure;
pub mod model;
pub mod payload;
pub mod pie;
pub mod render;
pub mod state;
pub mod theme;

pub use bar::{BarChart, BarChartLayout, compute_layout};
pub use canvas::{Canvas, DrawCommand, DrawList, Paint};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use dashboard::Dashboard;
pub use error::{PayloadError, StateError};
pub use event::{EventResult, PointerAction, PointerEvent};
pub use measure::MeasureSpec;
pub use model::{CategoryTotal, SectorAngleRange, Size, TimePoint};
pub use payload::{category_series, category_totals, parse_payload};
pub use pie::{PieChart, compute_sectors};
pub use render::{Scene, render_svg};
pub use theme::Theme;
