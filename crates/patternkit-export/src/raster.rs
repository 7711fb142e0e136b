//! Raster output for rendered pages using tiny-skia.
//!
//! Every drawing command is rendered anti-aliased onto a white background and
//! clipped to the page viewport. Text is laid out with rusttype and filled from
//! the glyph outlines, so rotated labels rasterize the same way as in SVG.

use crate::font::sans_font;
use crate::render::{
    arrow_heads, grid_stroke, Color as PageColor, DrawCommand, Page, Surface, TextAnchor,
    GRID_COLOR, LINE_SPACING,
};
use image::{Rgb, RgbImage};
use patternkit_core::{Error, Point, Result};
use rusttype::{point as rt_point, OutlineBuilder, Scale};
use std::path::Path;
use tiny_skia::{
    Color, FillRule, LineCap, Mask, Paint, Path as SkPath, PathBuilder, Pixmap, Stroke,
    StrokeDash, Transform,
};
use tracing::{debug, warn};

const CM_PER_INCH: f64 = 2.54;

/// Largest raster edge accepted, in pixels
pub const MAX_RASTER_PX: u32 = 16_384;

/// Rasterize a page.
///
/// Physical pages are sampled at `dpi`; pixel pages keep their own size and
/// ignore it.
pub fn rasterize(page: &Page, dpi: f64) -> Result<RgbImage> {
    let (width, height, px_per_unit) = match page.surface {
        Surface::Physical { width, height } => {
            let px_per_cm = dpi / CM_PER_INCH;
            (
                (width * px_per_cm).round() as u32,
                (height * px_per_cm).round() as u32,
                px_per_cm,
            )
        }
        Surface::Pixels { width, height } => {
            (width, height, 1.0 / page.units_per_surface_unit())
        }
    };

    if width == 0 || height == 0 || width > MAX_RASTER_PX || height > MAX_RASTER_PX {
        return Err(Error::render(format!(
            "Raster size {}x{} is out of range",
            width, height
        )));
    }

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::render(format!("Cannot allocate {}x{} pixmap", width, height)))?;
    pixmap.fill(Color::WHITE);

    // World -> pixel: shift the viewport origin to (0, 0), then scale.
    let scale = px_per_unit as f32;
    let transform =
        Transform::from_translate(-page.viewport.min_x as f32, -page.viewport.min_y as f32)
            .post_scale(scale, scale);

    let mut clip =
        Mask::new(width, height).ok_or_else(|| Error::render("Cannot allocate clip mask"))?;
    if let Some(rect) = tiny_skia::Rect::from_ltrb(
        page.viewport.min_x as f32,
        page.viewport.min_y as f32,
        page.viewport.max_x as f32,
        page.viewport.max_y as f32,
    ) {
        clip.fill_path(
            &PathBuilder::from_rect(rect),
            FillRule::Winding,
            false,
            transform,
        );
    }

    let pt = page.units_per_point() as f32;
    let mut canvas = RasterCanvas {
        pixmap: &mut pixmap,
        clip: &clip,
        transform,
        pt,
    };

    let mut text_drawn = 0;
    for command in &page.commands {
        match command {
            DrawCommand::Polyline {
                points,
                closed,
                color,
                width,
            } => {
                if let Some(path) = build_path(points, *closed) {
                    canvas.stroke(&path, *color, *width);
                }
            }
            DrawCommand::Fill {
                points,
                color,
                opacity,
            } => {
                if let Some(path) = build_path(points, true) {
                    canvas.fill(&path, paint(*color, *opacity), FillRule::EvenOdd, transform);
                }
            }
            DrawCommand::Arrow {
                from,
                to,
                double,
                color,
                width,
            } => {
                if let Some(path) = build_path(&[*from, *to], false) {
                    canvas.stroke(&path, *color, *width);
                }
                for head in arrow_heads(*from, *to, *double, 8.0 * pt as f64) {
                    if let Some(path) = build_path(&head, true) {
                        canvas.fill(&path, paint(*color, 1.0), FillRule::Winding, transform);
                    }
                }
            }
            DrawCommand::Mark {
                position,
                size,
                width,
            } => {
                let half = (*size as f32 * pt / 2.0) as f64;
                let mut pb = PathBuilder::new();
                pb.move_to((position.x - half) as f32, position.y as f32);
                pb.line_to((position.x + half) as f32, position.y as f32);
                pb.move_to(position.x as f32, (position.y - half) as f32);
                pb.line_to(position.x as f32, (position.y + half) as f32);
                if let Some(path) = pb.finish() {
                    canvas.stroke(&path, PageColor::BLACK, *width);
                }
            }
            DrawCommand::GridLine { from, to, major } => {
                let (width, dash) = grid_stroke(*major);
                let mut stroke = Stroke {
                    width: width as f32 * pt,
                    ..Default::default()
                };
                if let Some([on, off]) = dash {
                    stroke.line_cap = LineCap::Round;
                    stroke.dash = StrokeDash::new(vec![on as f32 * pt, off as f32 * pt], 0.0);
                }
                if let Some(path) = build_path(&[*from, *to], false) {
                    canvas.stroke_with(&path, GRID_COLOR, &stroke);
                }
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
                let style = TextStyle {
                    size: *size,
                    bold: *bold,
                    italic: *italic,
                    anchor: *anchor,
                    rotation: *rotation,
                };
                if canvas.text(*position, content, &style) {
                    text_drawn += 1;
                }
            }
        }
    }

    debug!(
        "Rasterized '{}' at {}x{} ({} text commands)",
        page.title, width, height, text_drawn
    );

    // Background is opaque, so premultiplied channels are final colors.
    let data = pixmap.data();
    Ok(RgbImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    }))
}

/// Rasterize a page and save it; the format follows the file extension.
pub fn save_raster(page: &Page, dpi: f64, path: &Path) -> Result<()> {
    let image = rasterize(page, dpi)?;
    image
        .save(path)
        .map_err(|e| Error::render(format!("Failed to write {}: {}", path.display(), e)))
}

struct TextStyle {
    size: f64,
    bold: bool,
    italic: bool,
    anchor: TextAnchor,
    rotation: f64,
}

/// Pixmap plus the page state shared by every command.
struct RasterCanvas<'a> {
    pixmap: &'a mut Pixmap,
    clip: &'a Mask,
    transform: Transform,
    /// World units per typographic point
    pt: f32,
}

impl RasterCanvas<'_> {
    fn stroke(&mut self, path: &SkPath, color: PageColor, width_pt: f64) {
        let stroke = Stroke {
            width: width_pt as f32 * self.pt,
            ..Default::default()
        };
        self.stroke_with(path, color, &stroke);
    }

    fn stroke_with(&mut self, path: &SkPath, color: PageColor, stroke: &Stroke) {
        self.pixmap.stroke_path(
            path,
            &paint(color, 1.0),
            stroke,
            self.transform,
            Some(self.clip),
        );
    }

    fn fill(&mut self, path: &SkPath, paint: Paint<'_>, rule: FillRule, transform: Transform) {
        self.pixmap
            .fill_path(path, &paint, rule, transform, Some(self.clip));
    }

    /// Fill the glyph outlines of `content`, one baseline per line.
    ///
    /// Returns false when no font is available.
    fn text(&mut self, position: Point, content: &str, style: &TextStyle) -> bool {
        let Some(font) = sans_font(style.bold, style.italic) else {
            warn!("No font available, skipping text '{}'", content);
            return false;
        };

        let font_size = style.size * self.pt as f64;
        let scale = Scale::uniform(font_size as f32);
        let mut pb = PathBuilder::new();

        for (i, line) in content.lines().enumerate() {
            let line_width = font
                .layout(line, scale, rt_point(0.0, 0.0))
                .last()
                .map_or(0.0, |g| {
                    g.position().x + g.unpositioned().h_metrics().advance_width
                });
            let shift = match style.anchor {
                TextAnchor::Start => 0.0,
                TextAnchor::Middle => -line_width / 2.0,
                TextAnchor::End => -line_width,
            };
            let start = rt_point(
                position.x as f32 + shift,
                (position.y + i as f64 * font_size * LINE_SPACING) as f32,
            );

            let mut builder = GlyphPathBuilder { pb: &mut pb };
            for glyph in font.layout(line, scale, start) {
                glyph.build_outline(&mut builder);
            }
        }

        let Some(path) = pb.finish() else {
            // Whitespace-only text has no outline.
            return true;
        };

        let transform = if style.rotation != 0.0 {
            self.transform.pre_concat(Transform::from_rotate_at(
                style.rotation as f32,
                position.x as f32,
                position.y as f32,
            ))
        } else {
            self.transform
        };
        self.fill(&path, paint(PageColor::BLACK, 1.0), FillRule::Winding, transform);
        true
    }
}

/// Collects positioned glyph outlines, in world units, into one path.
struct GlyphPathBuilder<'a> {
    pb: &'a mut PathBuilder,
}

impl OutlineBuilder for GlyphPathBuilder<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.pb.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.pb.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.pb.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.pb.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.pb.close();
    }
}

fn paint(color: PageColor, opacity: f64) -> Paint<'static> {
    let mut paint = Paint::default();
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    paint.set_color_rgba8(color.r, color.g, color.b, alpha);
    paint.anti_alias = true;
    paint
}

fn build_path(points: &[Point], closed: bool) -> Option<SkPath> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use patternkit_core::Bounds;

    fn square_page(surface: Surface) -> Page {
        Page {
            title: "square".to_string(),
            viewport: Bounds::new(0.0, 10.0, 0.0, 10.0),
            surface,
            commands: vec![DrawCommand::Fill {
                points: vec![
                    Point::new(2.0, 2.0),
                    Point::new(8.0, 2.0),
                    Point::new(8.0, 8.0),
                    Point::new(2.0, 8.0),
                ],
                color: PageColor::BLACK,
                opacity: 1.0,
            }],
        }
    }

    fn text_page(anchor: TextAnchor, rotation: f64) -> Page {
        Page {
            title: "label".to_string(),
            viewport: Bounds::new(0.0, 20.0, 0.0, 20.0),
            surface: Surface::Pixels {
                width: 200,
                height: 200,
            },
            commands: vec![DrawCommand::Text {
                position: Point::new(10.0, 10.0),
                content: "FRONT BODICE".to_string(),
                size: 20.0,
                bold: true,
                italic: false,
                anchor,
                rotation,
            }],
        }
    }

    fn inked(image: &RgbImage) -> Vec<(u32, u32)> {
        image
            .enumerate_pixels()
            .filter(|(_, _, px)| px.0 != [255, 255, 255])
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn physical_page_size_follows_dpi() {
        let page = square_page(Surface::Physical {
            width: 10.0,
            height: 10.0,
        });
        let image = rasterize(&page, 25.4).unwrap();
        assert_eq!(image.dimensions(), (100, 100));
    }

    #[test]
    fn fill_lands_inside_viewport() {
        let page = square_page(Surface::Pixels {
            width: 100,
            height: 100,
        });
        let image = rasterize(&page, 0.0).unwrap();
        assert_eq!(image.get_pixel(50, 50), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(5, 5), &Rgb([255, 255, 255]));
        assert_eq!(image.get_pixel(95, 95), &Rgb([255, 255, 255]));
    }

    #[test]
    fn zero_sized_surface_is_an_error() {
        let page = square_page(Surface::Pixels {
            width: 0,
            height: 10,
        });
        assert!(matches!(rasterize(&page, 96.0), Err(Error::Render(_))));
    }

    #[test]
    fn grid_lines_are_faint() {
        let mut page = square_page(Surface::Pixels {
            width: 100,
            height: 100,
        });
        page.commands = vec![DrawCommand::GridLine {
            from: Point::new(5.0, 0.0),
            to: Point::new(5.0, 10.0),
            major: true,
        }];
        let image = rasterize(&page, 0.0).unwrap();
        let ink = inked(&image);
        assert!(!ink.is_empty());
        assert!(ink.iter().all(|&(x, _)| (49..=51).contains(&x)));
        assert!(image.pixels().all(|px| px.0[0] >= 0xD0));
    }

    #[test]
    fn text_is_drawn_above_its_baseline() {
        let image = rasterize(&text_page(TextAnchor::Start, 0.0), 0.0).unwrap();
        let ink = inked(&image);
        assert!(!ink.is_empty());
        // Baseline at pixel row 100, text starts at column 100.
        assert!(ink.iter().all(|&(x, y)| x >= 99 && y <= 101));
    }

    #[test]
    fn end_anchor_draws_left_of_position() {
        let image = rasterize(&text_page(TextAnchor::End, 0.0), 0.0).unwrap();
        let ink = inked(&image);
        assert!(!ink.is_empty());
        assert!(ink.iter().all(|&(x, _)| x <= 101));
    }

    #[test]
    fn rotated_text_runs_upward() {
        let image = rasterize(&text_page(TextAnchor::Start, -90.0), 0.0).unwrap();
        let ink = inked(&image);
        assert!(!ink.is_empty());
        // Rotated a quarter turn counter-clockwise the line rises from the anchor.
        assert!(ink.iter().all(|&(_, y)| y <= 101));
        assert!(ink.iter().any(|&(_, y)| y < 60));
    }
}
