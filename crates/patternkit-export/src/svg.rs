//! SVG output for rendered pages
//!
//! Physical pages are written in cm so they print at 1:1. Pixel pages use the
//! pixel size as the document size. The viewport is applied as a clip path so
//! pieces reaching past a tile edge are cut off at the sheet margin.

use crate::render::{
    arrow_heads, grid_stroke, DrawCommand, Page, Surface, TextAnchor, GRID_COLOR, LINE_SPACING,
};
use patternkit_core::Point;
use std::fmt::Write;

/// Serialize a page to an SVG document.
pub fn page_to_svg(page: &Page) -> String {
    let vp = &page.viewport;
    let per_unit = page.units_per_surface_unit();
    let (surface_w, surface_h) = page.surface_size();
    let (view_w, view_h) = (surface_w * per_unit, surface_h * per_unit);

    let (doc_w, doc_h) = match page.surface {
        Surface::Physical { width, height } => {
            (format!("{}cm", fmt(width)), format!("{}cm", fmt(height)))
        }
        Surface::Pixels { width, height } => (width.to_string(), height.to_string()),
    };

    let mut svg = String::new();
    let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        doc_w,
        doc_h,
        fmt(vp.min_x),
        fmt(vp.min_y),
        fmt(view_w),
        fmt(view_h)
    );
    let _ = writeln!(svg, "<title>{}</title>", escape(&page.title));
    let _ = writeln!(
        svg,
        concat!(
            r#"<defs><clipPath id="viewport">"#,
            r#"<rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"#
        ),
        fmt(vp.min_x),
        fmt(vp.min_y),
        fmt(vp.width()),
        fmt(vp.height())
    );
    let _ = writeln!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="white"/>"#,
        fmt(vp.min_x),
        fmt(vp.min_y),
        fmt(view_w),
        fmt(view_h)
    );
    let _ = writeln!(svg, r#"<g clip-path="url(#viewport)">"#);

    let pt = page.units_per_point();
    for command in &page.commands {
        write_command(&mut svg, command, pt);
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}

fn write_command(svg: &mut String, command: &DrawCommand, pt: f64) {
    match command {
        DrawCommand::Polyline {
            points,
            closed,
            color,
            width,
        } => {
            if points.len() < 2 {
                return;
            }
            let _ = writeln!(
                svg,
                concat!(
                    r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}""#,
                    r#" stroke-linejoin="round"/>"#
                ),
                path_data(points, *closed),
                color.to_hex(),
                fmt(width * pt)
            );
        }
        DrawCommand::Fill {
            points,
            color,
            opacity,
        } => {
            if points.len() < 3 {
                return;
            }
            let _ = writeln!(
                svg,
                r#"<path d="{}" fill="{}" fill-opacity="{}" stroke="none"/>"#,
                path_data(points, true),
                color.to_hex(),
                fmt(*opacity)
            );
        }
        DrawCommand::Text {
            position,
            content,
            size,
            bold,
            italic,
            anchor,
            rotation,
        } => {
            let font_size = size * pt;
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let _ = write!(
                svg,
                r#"<text x="{}" y="{}" font-family="sans-serif" font-size="{}" text-anchor="{}""#,
                fmt(position.x),
                fmt(position.y),
                fmt(font_size),
                anchor
            );
            if *bold {
                svg.push_str(r#" font-weight="bold""#);
            }
            if *italic {
                svg.push_str(r#" font-style="italic""#);
            }
            if *rotation != 0.0 {
                let _ = write!(
                    svg,
                    r#" transform="rotate({} {} {})""#,
                    fmt(*rotation),
                    fmt(position.x),
                    fmt(position.y)
                );
            }
            svg.push('>');

            for (i, line) in content.lines().enumerate() {
                let dy = if i == 0 { 0.0 } else { font_size * LINE_SPACING };
                let _ = write!(
                    svg,
                    r#"<tspan x="{}" dy="{}">{}</tspan>"#,
                    fmt(position.x),
                    fmt(dy),
                    escape(line)
                );
            }
            svg.push_str("</text>\n");
        }
        DrawCommand::Arrow {
            from,
            to,
            double,
            color,
            width,
        } => {
            let hex = color.to_hex();
            let _ = writeln!(
                svg,
                r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                path_data(&[*from, *to], false),
                hex,
                fmt(width * pt)
            );
            for head in arrow_heads(*from, *to, *double, 8.0 * pt) {
                let _ = writeln!(
                    svg,
                    r#"<path d="{}" fill="{}" stroke="none"/>"#,
                    path_data(&head, true),
                    hex
                );
            }
        }
        DrawCommand::Mark {
            position,
            size,
            width,
        } => {
            let half = size * pt / 2.0;
            let _ = writeln!(
                svg,
                r#"<path d="M {} {} L {} {} M {} {} L {} {}" stroke="black" stroke-width="{}"/>"#,
                fmt(position.x - half),
                fmt(position.y),
                fmt(position.x + half),
                fmt(position.y),
                fmt(position.x),
                fmt(position.y - half),
                fmt(position.x),
                fmt(position.y + half),
                fmt(width * pt)
            );
        }
        DrawCommand::GridLine { from, to, major } => {
            let (width, dash) = grid_stroke(*major);
            let _ = write!(
                svg,
                r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}""#,
                path_data(&[*from, *to], false),
                GRID_COLOR.to_hex(),
                fmt(width * pt)
            );
            if let Some([on, off]) = dash {
                let _ = write!(
                    svg,
                    r#" stroke-dasharray="{} {}" stroke-linecap="round""#,
                    fmt(on * pt),
                    fmt(off * pt)
                );
            }
            svg.push_str("/>\n");
        }
    }
}

fn path_data(points: &[Point], closed: bool) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { "L" };
        let _ = write!(d, "{} {} {} ", cmd, fmt(p.x), fmt(p.y));
    }
    if closed {
        d.push('Z');
    }
    d.trim_end().to_string()
}

/// Four decimals with trailing zeros stripped
fn fmt(value: f64) -> String {
    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        s => s.to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
