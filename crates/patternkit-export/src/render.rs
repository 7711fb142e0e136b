//! Drawing instructions for pattern output
//!
//! Rendering is split in two: this module turns a packed layout into
//! backend-neutral [`Page`]s of [`DrawCommand`]s, and the backends in
//! [`crate::svg`] and [`crate::raster`] turn pages into files.
//!
//! Three targets are produced from one layout:
//! - **Full scale**: one 1:1 page holding every piece, with labels, grainlines,
//!   a 10 cm scale bar and printing instructions
//! - **Tiles**: one sheet-sized page per print tile with alignment marks
//! - **Thumbnail**: the full-scale page fitted into a pixel box
//!
//! World coordinates are centimeters. Stroke widths and text sizes are given in
//! typographic points and converted by the backend through
//! [`Page::units_per_point`].

use crate::layout::Layout;
use crate::tiling::{tile_canvas, Tile};
use patternkit_core::{
    vertex_centroid, Bounds, ExportSettings, Grainline, PatternPiece, PieceMap, Point,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Points per inch
const POINTS_PER_INCH: f64 = 72.0;
const CM_PER_INCH: f64 = 2.54;

/// Length of the printed scale bar in cm
pub const SCALE_BAR_LENGTH: f64 = 10.0;
/// Vertical distance of the piece label and cutting note from the centroid
pub const LABEL_OFFSET: f64 = 3.0;
/// Opacity of the piece fill
pub const FILL_OPACITY: f64 = 0.08;
/// Line height of multi-line text as a multiple of the font size
pub const LINE_SPACING: f64 = 1.25;
/// Major grid spacing in cm
pub const GRID_MAJOR: f64 = 10.0;
/// Minor grid spacing in cm
pub const GRID_MINOR: f64 = 5.0;
pub const GRID_COLOR: Color = Color::rgb(0xD8, 0xD8, 0xD8);

pub const INFO_TEXT: &str = "1:1 SCALE - Print at 100%\n\
    Seam allowance NOT included\n\
    Add 1.5cm seam allowance when cutting";

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Piece colors, cycled in placement order
pub const PALETTE: [Color; 5] = [
    Color::rgb(0x2E, 0x86, 0xAB),
    Color::rgb(0xA2, 0x3B, 0x72),
    Color::rgb(0xF1, 0x8F, 0x01),
    Color::rgb(0xC7, 0x3E, 0x1D),
    Color::rgb(0x6A, 0x99, 0x4E),
];

pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// One backend-neutral drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DrawCommand {
    /// Stroked outline
    Polyline {
        points: Vec<Point>,
        closed: bool,
        color: Color,
        width: f64,
    },
    /// Translucent area fill
    Fill {
        points: Vec<Point>,
        color: Color,
        opacity: f64,
    },
    /// Text anchored at `position`; newlines start new lines
    Text {
        position: Point,
        content: String,
        size: f64,
        bold: bool,
        italic: bool,
        anchor: TextAnchor,
        /// Clockwise rotation in degrees
        rotation: f64,
    },
    /// Straight arrow, with heads at both ends when `double`
    Arrow {
        from: Point,
        to: Point,
        double: bool,
        color: Color,
        width: f64,
    },
    /// "+" alignment mark, `size` points across
    Mark { position: Point, size: f64, width: f64 },
    /// Faint measuring grid line in [`GRID_COLOR`]; minor lines are dotted
    GridLine { from: Point, to: Point, major: bool },
}

/// Stroke width and dash pattern (on, off), both in points, of a grid line.
pub fn grid_stroke(major: bool) -> (f64, Option<[f64; 2]>) {
    if major {
        (0.6, None)
    } else {
        (0.5, Some([0.5, 2.0]))
    }
}

impl DrawCommand {
    fn text(position: Point, content: impl Into<String>, size: f64) -> Self {
        DrawCommand::Text {
            position,
            content: content.into(),
            size,
            bold: false,
            italic: false,
            anchor: TextAnchor::Start,
            rotation: 0.0,
        }
    }

    fn line(from: Point, to: Point, width: f64) -> Self {
        DrawCommand::Polyline {
            points: vec![from, to],
            closed: false,
            color: Color::BLACK,
            width,
        }
    }

    /// Builder tweaks for text commands. No-op on other variants.
    fn styled(mut self, bold: bool, italic: bool, anchor: TextAnchor) -> Self {
        if let DrawCommand::Text {
            bold: b,
            italic: i,
            anchor: a,
            ..
        } = &mut self
        {
            *b = bold;
            *i = italic;
            *a = anchor;
        }
        self
    }

    fn rotated(mut self, degrees: f64) -> Self {
        if let DrawCommand::Text { rotation, .. } = &mut self {
            *rotation = degrees;
        }
        self
    }
}

/// Arrowhead triangles of an arrow, `head` world units long.
pub fn arrow_heads(from: Point, to: Point, double: bool, head: f64) -> Vec<[Point; 3]> {
    let length = from.distance(to);
    if length <= f64::EPSILON {
        return Vec::new();
    }
    let ux = (to.x - from.x) / length;
    let uy = (to.y - from.y) / length;
    let half = head * 0.4;

    let head_at = |tip: Point, dir: f64| {
        let base = Point::new(tip.x - dir * ux * head, tip.y - dir * uy * head);
        [
            tip,
            Point::new(base.x - uy * half, base.y + ux * half),
            Point::new(base.x + uy * half, base.y - ux * half),
        ]
    };

    let mut heads = vec![head_at(to, 1.0)];
    if double {
        heads.push(head_at(from, -1.0));
    }
    heads
}

/// Output medium of a page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "lowercase")]
pub enum Surface {
    /// Printed sheet in cm, drawn 1:1 from the viewport's top-left corner
    Physical { width: f64, height: f64 },
    /// Image in pixels, the viewport scaled to fit
    Pixels { width: u32, height: u32 },
}

/// One output page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    /// World region shown on the page; content outside is clipped
    pub viewport: Bounds,
    pub surface: Surface,
    pub commands: Vec<DrawCommand>,
}

impl Page {
    /// World units per surface unit (cm for physical, px for pixel pages).
    pub fn units_per_surface_unit(&self) -> f64 {
        match self.surface {
            Surface::Physical { .. } => 1.0,
            Surface::Pixels { width, height } => {
                let sx = self.viewport.width() / width.max(1) as f64;
                let sy = self.viewport.height() / height.max(1) as f64;
                sx.max(sy)
            }
        }
    }

    /// World units per typographic point. On pixel pages one point is one pixel.
    pub fn units_per_point(&self) -> f64 {
        match self.surface {
            Surface::Physical { .. } => CM_PER_INCH / POINTS_PER_INCH,
            Surface::Pixels { .. } => self.units_per_surface_unit(),
        }
    }

    /// Surface size in its own units
    pub fn surface_size(&self) -> (f64, f64) {
        match self.surface {
            Surface::Physical { width, height } => (width, height),
            Surface::Pixels { width, height } => (width as f64, height as f64),
        }
    }
}

/// Grid lines over `area` at multiples of [`GRID_MINOR`], every other one major.
///
/// Lines sit on absolute canvas coordinates so tiles line up with each other
/// and with the full-scale page.
pub fn grid_commands(area: &Bounds) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    if !(area.width() > 0.0 && area.height() > 0.0) {
        return commands;
    }
    let steps = (GRID_MAJOR / GRID_MINOR).round() as i64;

    let first = (area.min_x / GRID_MINOR).ceil() as i64;
    let last = (area.max_x / GRID_MINOR).floor() as i64;
    for k in first..=last {
        let x = k as f64 * GRID_MINOR;
        commands.push(DrawCommand::GridLine {
            from: Point::new(x, area.min_y),
            to: Point::new(x, area.max_y),
            major: k.rem_euclid(steps) == 0,
        });
    }

    let first = (area.min_y / GRID_MINOR).ceil() as i64;
    let last = (area.max_y / GRID_MINOR).floor() as i64;
    for k in first..=last {
        let y = k as f64 * GRID_MINOR;
        commands.push(DrawCommand::GridLine {
            from: Point::new(area.min_x, y),
            to: Point::new(area.max_x, y),
            major: k.rem_euclid(steps) == 0,
        });
    }

    commands
}

/// Outline, fill, labels and grainline for one packed piece.
fn piece_commands(
    piece: &PatternPiece,
    color: Color,
    outline_width: f64,
    annotate: bool,
) -> Vec<DrawCommand> {
    let mut commands = vec![
        DrawCommand::Fill {
            points: piece.points.clone(),
            color,
            opacity: FILL_OPACITY,
        },
        DrawCommand::Polyline {
            points: piece.points.clone(),
            closed: true,
            color,
            width: outline_width,
        },
    ];

    if !annotate {
        return commands;
    }

    if let Some(center) = vertex_centroid(&piece.points) {
        if let Some(label) = &piece.label {
            commands.push(
                DrawCommand::text(Point::new(center.x, center.y - LABEL_OFFSET), label, 12.0)
                    .styled(true, false, TextAnchor::Middle),
            );
        }
        if let Some(cutting) = &piece.cutting {
            commands.push(
                DrawCommand::text(Point::new(center.x, center.y + LABEL_OFFSET), cutting, 10.0)
                    .styled(false, true, TextAnchor::Middle),
            );
        }
    }

    if let (Some(grainline), Some(bounds)) = (piece.grainline, piece.bounds()) {
        commands.extend(grainline_commands(grainline, &bounds));
    }

    for notch in &piece.notches {
        commands.push(DrawCommand::Mark {
            position: *notch,
            size: 6.0,
            width: 1.0,
        });
    }

    commands
}

/// Double arrow across the middle 60% of the piece, offset 15% from its edge.
fn grainline_commands(grainline: Grainline, bounds: &Bounds) -> Vec<DrawCommand> {
    let (from, to, text_at, rotation) = match grainline {
        Grainline::Vertical => {
            let x = bounds.min_x + bounds.width() * 0.15;
            let from = Point::new(x, bounds.min_y + bounds.height() * 0.2);
            let to = Point::new(x, bounds.min_y + bounds.height() * 0.8);
            (from, to, Point::new(x + 1.0, (from.y + to.y) / 2.0), -90.0)
        }
        Grainline::Horizontal => {
            let y = bounds.min_y + bounds.height() * 0.15;
            let from = Point::new(bounds.min_x + bounds.width() * 0.2, y);
            let to = Point::new(bounds.min_x + bounds.width() * 0.8, y);
            (from, to, Point::new((from.x + to.x) / 2.0, y - 1.0), 0.0)
        }
    };

    vec![
        DrawCommand::Arrow {
            from,
            to,
            double: true,
            color: Color::BLACK,
            width: 1.5,
        },
        DrawCommand::text(text_at, "GRAIN", 8.0)
            .styled(false, false, TextAnchor::Middle)
            .rotated(rotation),
    ]
}

fn scale_bar_commands(origin: Point) -> Vec<DrawCommand> {
    let end = Point::new(origin.x + SCALE_BAR_LENGTH, origin.y);
    vec![
        DrawCommand::line(origin, end, 4.0),
        DrawCommand::line(
            Point::new(origin.x, origin.y - 0.5),
            Point::new(origin.x, origin.y + 0.5),
            2.0,
        ),
        DrawCommand::line(
            Point::new(end.x, end.y - 0.5),
            Point::new(end.x, end.y + 0.5),
            2.0,
        ),
        DrawCommand::text(
            Point::new(origin.x + SCALE_BAR_LENGTH / 2.0, origin.y - 1.0),
            "10 cm SCALE",
            10.0,
        )
        .styled(true, false, TextAnchor::Middle),
    ]
}

/// Single 1:1 page holding every packed piece. `None` for an empty layout.
///
/// The page extends twice the margin beyond the canvas. The scale bar sits in
/// the top band above the canvas origin, the printing notes in the bottom band.
pub fn render_full_scale(
    pieces: &PieceMap,
    layout: &Layout,
    title: &str,
    settings: &ExportSettings,
) -> Option<Page> {
    let canvas = layout.canvas?;
    let margin = settings.margin;
    let viewport = canvas.expanded(2.0 * margin);

    let mut commands = grid_commands(&canvas);
    for (index, (_, piece)) in layout.packed_pieces(pieces).enumerate() {
        commands.extend(piece_commands(&piece, palette_color(index), 2.5, true));
    }

    commands.push(
        DrawCommand::text(Point::new(canvas.max_x, viewport.min_y + 1.0), title, 16.0)
            .styled(true, false, TextAnchor::End),
    );
    commands.extend(scale_bar_commands(Point::new(
        canvas.min_x + margin,
        canvas.min_y - margin,
    )));
    commands.push(DrawCommand::text(
        Point::new(viewport.min_x + 0.5, canvas.max_y + margin * 0.5),
        INFO_TEXT,
        9.0,
    ));

    debug!(
        "Full-scale page {:.1} x {:.1} cm with {} commands",
        viewport.width(),
        viewport.height(),
        commands.len()
    );

    Some(Page {
        title: title.to_string(),
        viewport,
        surface: Surface::Physical {
            width: viewport.width(),
            height: viewport.height(),
        },
        commands,
    })
}

/// One sheet-sized page per print tile, row-major. Empty for an empty layout.
pub fn render_tiles(
    pieces: &PieceMap,
    layout: &Layout,
    title: &str,
    settings: &ExportSettings,
) -> Vec<Page> {
    let tiles = tile_canvas(layout.canvas.as_ref(), settings.page, settings.margin);
    let packed: Vec<PatternPiece> = layout.packed_pieces(pieces).map(|(_, piece)| piece).collect();

    tiles
        .iter()
        .map(|tile| tile_page(tile, &packed, title, settings))
        .collect()
}

fn tile_page(
    tile: &Tile,
    packed: &[PatternPiece],
    title: &str,
    settings: &ExportSettings,
) -> Page {
    let viewport = tile.viewport(settings.margin);
    let mut commands = grid_commands(&tile.window());

    for (index, piece) in packed.iter().enumerate() {
        let reaches_in = piece
            .bounds()
            .is_some_and(|bounds| bounds.intersects(&viewport));
        if reaches_in {
            commands.extend(piece_commands(piece, palette_color(index), 2.0, false));
        }
    }

    for corner in tile.corner_marks() {
        commands.push(DrawCommand::Mark {
            position: corner,
            size: 12.0,
            width: 2.5,
        });
    }

    let page_title = format!(
        "{} - Page {} of {}",
        title,
        tile.page_number(),
        tile.page_count()
    );
    commands.push(
        DrawCommand::text(
            Point::new(viewport.min_x + settings.page.width / 2.0, viewport.min_y + 0.6),
            page_title.clone(),
            11.0,
        )
        .styled(false, false, TextAnchor::Middle),
    );
    commands.push(
        DrawCommand::text(
            Point::new(viewport.max_x - 0.5, viewport.max_y - 0.5),
            tile.label(),
            8.0,
        )
        .styled(false, false, TextAnchor::End),
    );

    Page {
        title: page_title,
        viewport,
        surface: Surface::Physical {
            width: settings.page.width,
            height: settings.page.height,
        },
        commands,
    }
}

/// The full-scale page fitted into `thumbnail_max_px`, aspect ratio preserved.
pub fn render_thumbnail(
    pieces: &PieceMap,
    layout: &Layout,
    title: &str,
    settings: &ExportSettings,
) -> Option<Page> {
    let mut page = render_full_scale(pieces, layout, title, settings)?;
    let (width, height) = thumbnail_size(&page.viewport, settings.thumbnail_max_px);
    page.surface = Surface::Pixels { width, height };
    Some(page)
}

/// Pixel size with the longer side equal to `max_px`.
pub fn thumbnail_size(viewport: &Bounds, max_px: u32) -> (u32, u32) {
    let longest = viewport.width().max(viewport.height());
    if longest <= 0.0 {
        return (max_px.max(1), max_px.max(1));
    }
    let scale = max_px as f64 / longest;
    let width = (viewport.width() * scale).round().max(1.0) as u32;
    let height = (viewport.height() * scale).round().max(1.0) as u32;
    (width, height)
}
