use crate::canvas::{DrawCommand, DrawList, Paint, PaintStyle};
use crate::config::RenderConfig;
use crate::geometry::point_at_angle;
use crate::model::Rect;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Recorded drawing of one component, placed at `(x, y)` in the scene.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub x: f32,
    pub y: f32,
    pub commands: DrawList,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub layers: Vec<Layer>,
}

pub fn render_svg(scene: &Scene, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = scene.width.max(1.0);
    let height = scene.height.max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for layer in &scene.layers {
        svg.push_str(&format!(
            "<g transform=\"translate({:.2} {:.2})\">",
            layer.x, layer.y
        ));
        for command in &layer.commands.commands {
            svg.push_str(&command_svg(command, theme));
        }
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

fn command_svg(command: &DrawCommand, theme: &Theme) -> String {
    match command {
        DrawCommand::Arc {
            oval,
            start_angle,
            sweep_angle,
            use_center,
            paint,
        } => arc_svg(*oval, *start_angle, *sweep_angle, *use_center, paint),
        DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            paint,
        } => format!(
            "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            paint.color, paint.stroke_width
        ),
        DrawCommand::Rect { rect, paint } => format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}/>",
            rect.left,
            rect.top,
            rect.width().max(0.0),
            rect.height().max(0.0),
            paint_attrs(paint)
        ),
        DrawCommand::Text { text, x, y, paint } => format!(
            "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            paint.text_align.svg_anchor(),
            escape_xml(&theme.font_family),
            paint.text_size,
            paint.color,
            escape_xml(text)
        ),
    }
}

fn arc_svg(oval: Rect, start_angle: f32, sweep_angle: f32, use_center: bool, paint: &Paint) -> String {
    let (cx, cy) = oval.center();
    let rx = oval.width() / 2.0;
    let ry = oval.height() / 2.0;
    if sweep_angle == 0.0 || rx <= 0.0 || ry <= 0.0 {
        return String::new();
    }
    if sweep_angle.abs() >= 360.0 {
        return format!(
            "<ellipse cx=\"{cx:.2}\" cy=\"{cy:.2}\" rx=\"{rx:.2}\" ry=\"{ry:.2}\" {}/>",
            paint_attrs(paint)
        );
    }

    let point = |angle: f32| {
        let (ux, uy) = point_at_angle(0.0, 0.0, 1.0, angle);
        (cx + rx * ux, cy + ry * uy)
    };
    let (sx, sy) = point(start_angle);
    let (ex, ey) = point(start_angle + sweep_angle);
    let large_arc = u8::from(sweep_angle.abs() > 180.0);
    let sweep_flag = u8::from(sweep_angle > 0.0);

    let mut d = String::new();
    if use_center {
        d.push_str(&format!("M {cx:.2} {cy:.2} L {sx:.2} {sy:.2}"));
    } else {
        d.push_str(&format!("M {sx:.2} {sy:.2}"));
    }
    d.push_str(&format!(
        " A {rx:.2} {ry:.2} 0 {large_arc} {sweep_flag} {ex:.2} {ey:.2}"
    ));
    if use_center {
        d.push_str(" Z");
    }
    format!("<path d=\"{d}\" {}/>", paint_attrs(paint))
}

fn paint_attrs(paint: &Paint) -> String {
    match paint.style {
        PaintStyle::Fill => format!("fill=\"{}\"", paint.color),
        PaintStyle::Stroke => format!(
            "fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"",
            paint.color, paint.stroke_width
        ),
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|family| family.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "sans-serif".to_string());
    opt.fontdb_mut().load_system_fonts();
    if let Some(size) = usvg::Size::from_wh(render_cfg.width, render_cfg.height) {
        opt.default_size = size;
    }

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig, _theme: &Theme) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
