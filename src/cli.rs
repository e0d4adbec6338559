use crate::config::{Config, load_config};
use crate::dashboard::Dashboard;
use crate::event::PointerEvent;
use crate::payload::{Record, parse_payload};
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "excharts", version, about = "Render expense pie and bar charts from a transaction payload")]
pub struct Args {
    /// Payload file (JSON array of transactions) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, palette and chart settings)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Show the bar chart for this category
    #[arg(long = "category", conflicts_with = "tap")]
    pub category: Option<String>,

    /// Simulate a tap at X,Y on the pie chart
    #[arg(long = "tap", value_parser = parse_point)]
    pub tap: Option<(f32, f32)>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }

    let records = read_payload(args.input.as_deref())?;
    let mut dashboard = Dashboard::new(records, &config);
    // first pass records the sector geometry taps are resolved against
    dashboard.scene();

    if let Some(category) = args.category.as_deref() {
        dashboard.select(category)?;
    } else if let Some((x, y)) = args.tap {
        dashboard.dispatch(PointerEvent::down(x, y))?;
        match dashboard.selected() {
            Some(category) => log::info!("tap at ({x}, {y}) selected {category:?}"),
            None => log::warn!("tap at ({x}, {y}) did not hit a sector"),
        }
    }

    write_scene(&mut dashboard, &config, &args)
}

fn write_scene(dashboard: &mut Dashboard, config: &Config, args: &Args) -> Result<()> {
    let scene = dashboard.scene();
    let svg = render_svg(&scene, &config.theme);
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, args.output.as_deref()),
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.render, &config.theme)
        }
    }
}

fn read_payload(path: Option<&Path>) -> Result<Vec<Record>> {
    let input = read_input(path)?;
    let records = parse_payload(&input).with_context(|| match path {
        Some(path) => format!("failed to load payload from {}", path.display()),
        None => "failed to load payload from stdin".to_string(),
    })?;
    Ok(records)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

fn parse_point(value: &str) -> Result<(f32, f32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {value:?}"))?;
    let x = x.trim().parse::<f32>().map_err(|err| format!("bad X: {err}"))?;
    let y = y.trim().parse::<f32>().map_err(|err| format!("bad Y: {err}"))?;
    Ok((x, y))
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}: {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()?;
    Ok(())
}
