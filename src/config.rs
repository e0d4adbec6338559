use std::path::Path;

use serde::Deserialize;

use crate::model::Size;
use crate::theme::Theme;

#[derive(Debug, Clone)]
pub struct PieConfig {
    pub desired_size: Size,
    /// Angle of the first sector's leading edge; -90 is 12 o'clock.
    pub start_angle: f32,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            desired_size: Size::new(100.0, 100.0),
            start_angle: -90.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BarConfig {
    pub desired_size: Size,
    pub padding: f32,
    pub grid_steps: usize,
    pub bar_width_ratio: f32,
    pub axis_stroke_width: f32,
    pub grid_stroke_width: f32,
    pub text_size: f32,
    /// Offset of gridline value labels from `(padding, y)`.
    pub value_label_offset: (f32, f32),
    /// Offset of bar labels from `(bar center, height - padding)`.
    pub bar_label_offset: (f32, f32),
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            desired_size: Size::new(100.0, 100.0),
            padding: 150.0,
            grid_steps: 5,
            bar_width_ratio: 0.8,
            axis_stroke_width: 5.0,
            grid_stroke_width: 2.0,
            text_size: 40.0,
            value_label_offset: (-50.0, 10.0),
            bar_label_offset: (-30.0, 40.0),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PayloadConfig {
    /// Fixed UTC offset, in minutes, used when formatting record timestamps.
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1080.0,
            height: 1920.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub pie: PieConfig,
    pub bar: BarConfig,
    pub payload: PayloadConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::classic(),
            pie: PieConfig::default(),
            bar: BarConfig::default(),
            payload: PayloadConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    background: Option<String>,
    text_color: Option<String>,
    axis_color: Option<String>,
    grid_color: Option<String>,
    pie_colors: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PieConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    start_angle: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BarConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    grid_steps: Option<usize>,
    bar_width_ratio: Option<f32>,
    axis_stroke_width: Option<f32>,
    grid_stroke_width: Option<f32>,
    text_size: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadConfigFile {
    utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    pie: Option<PieConfigFile>,
    bar: Option<BarConfigFile>,
    payload: Option<PayloadConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a JSON (or JSON5) config document and overlays it on the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents)
            .map_err(|_| anyhow::anyhow!("invalid config file: {json_err}"))?,
    };

    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "modern" => config.theme = Theme::modern(),
            "classic" | "default" => config.theme = Theme::classic(),
            other => log::warn!("unknown theme {other:?}, keeping default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.axis_color {
            config.theme.axis_color = v;
        }
        if let Some(v) = vars.grid_color {
            config.theme.grid_color = v;
        }
        if let Some(v) = vars.pie_colors {
            if v.is_empty() {
                log::warn!("empty pieColors ignored");
            } else {
                config.theme.pie_colors = v;
            }
        }
    }

    if let Some(pie) = parsed.pie {
        if let Some(v) = pie.width {
            config.pie.desired_size.width = v;
        }
        if let Some(v) = pie.height {
            config.pie.desired_size.height = v;
        }
        if let Some(v) = pie.start_angle {
            config.pie.start_angle = v;
        }
    }

    if let Some(bar) = parsed.bar {
        if let Some(v) = bar.width {
            config.bar.desired_size.width = v;
        }
        if let Some(v) = bar.height {
            config.bar.desired_size.height = v;
        }
        if let Some(v) = bar.padding {
            config.bar.padding = v;
        }
        if let Some(v) = bar.grid_steps {
            config.bar.grid_steps = v.max(1);
        }
        if let Some(v) = bar.bar_width_ratio {
            config.bar.bar_width_ratio = v;
        }
        if let Some(v) = bar.axis_stroke_width {
            config.bar.axis_stroke_width = v;
        }
        if let Some(v) = bar.grid_stroke_width {
            config.bar.grid_stroke_width = v;
        }
        if let Some(v) = bar.text_size {
            config.bar.text_size = v;
        }
    }

    if let Some(payload) = parsed.payload {
        if let Some(v) = payload.utc_offset_minutes {
            config.payload.utc_offset_minutes = v;
        }
    }

    Ok(config)
}
