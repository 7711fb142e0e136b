//! Print tiling
//!
//! Splits a packed canvas into a grid of printable windows. Each window is the
//! usable area of one sheet (page minus margin on every side); the page viewport
//! grows the window back out by the margin so neighbouring sheets overlap for
//! taping. Tiles are enumerated row-major.

use patternkit_core::{Bounds, PageSize, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Slack for canvas sizes that are an exact multiple of the usable area.
const TILE_EPSILON: f64 = 1e-9;

/// Largest tile grid produced; anything bigger is a sizing mistake.
pub const MAX_TILES: usize = 10_000;

/// One printable sheet of a tiled canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub col: usize,
    pub row: usize,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub tiles_x: usize,
    pub tiles_y: usize,
}

impl Tile {
    /// 1-based page number in row-major order
    pub fn page_number(&self) -> usize {
        self.col + self.row * self.tiles_x + 1
    }

    pub fn page_count(&self) -> usize {
        self.tiles_x * self.tiles_y
    }

    /// Canvas region this sheet is responsible for
    pub fn window(&self) -> Bounds {
        Bounds::new(self.min_x, self.max_x, self.min_y, self.max_y)
    }

    /// Region printed on the sheet, the window grown by `margin` on every side
    pub fn viewport(&self, margin: f64) -> Bounds {
        self.window().expanded(margin)
    }

    /// Alignment mark positions, the four window corners
    pub fn corner_marks(&self) -> [Point; 4] {
        self.window().corners()
    }

    pub fn label(&self) -> String {
        format!(
            "Tile ({}, {}) of ({}, {})",
            self.col + 1,
            self.row + 1,
            self.tiles_x,
            self.tiles_y
        )
    }
}

/// Number of sheets needed along one axis.
fn tiles_along(total: f64, usable: f64) -> usize {
    ((total / usable) - TILE_EPSILON).ceil().max(1.0) as usize
}

/// Grid dimensions `(tiles_x, tiles_y)` for a canvas.
pub fn grid_size(canvas: &Bounds, page: PageSize, margin: f64) -> (usize, usize) {
    let (usable_width, usable_height) = page.usable(margin);
    (
        tiles_along(canvas.width(), usable_width),
        tiles_along(canvas.height(), usable_height),
    )
}

/// Partition `canvas` into sheet-sized windows.
///
/// An absent canvas yields no tiles, as does a grid of more than
/// [`MAX_TILES`] sheets. The last column and row end exactly on the canvas
/// edge.
pub fn tile_canvas(canvas: Option<&Bounds>, page: PageSize, margin: f64) -> Vec<Tile> {
    let Some(canvas) = canvas else {
        return Vec::new();
    };

    let (usable_width, usable_height) = page.usable(margin);
    if usable_width <= 0.0 || usable_height <= 0.0 {
        return Vec::new();
    }

    let (tiles_x, tiles_y) = grid_size(canvas, page, margin);
    let Some(count) = tiles_x
        .checked_mul(tiles_y)
        .filter(|&count| count <= MAX_TILES)
    else {
        warn!(
            "Tile grid {} x {} exceeds {} pages, margin {} leaves {:.2} x {:.2} cm per sheet",
            tiles_x, tiles_y, MAX_TILES, margin, usable_width, usable_height
        );
        return Vec::new();
    };
    let mut tiles = Vec::with_capacity(count);

    for row in 0..tiles_y {
        let min_y = canvas.min_y + row as f64 * usable_height;
        let max_y = if row + 1 == tiles_y {
            canvas.max_y
        } else {
            (min_y + usable_height).min(canvas.max_y)
        };

        for col in 0..tiles_x {
            let min_x = canvas.min_x + col as f64 * usable_width;
            let max_x = if col + 1 == tiles_x {
                canvas.max_x
            } else {
                (min_x + usable_width).min(canvas.max_x)
            };

            tiles.push(Tile {
                col,
                row,
                min_x,
                max_x,
                min_y,
                max_y,
                tiles_x,
                tiles_y,
            });
        }
    }

    debug!(
        "Tiled {:.1} x {:.1} cm canvas into {} x {} pages",
        canvas.width(),
        canvas.height(),
        tiles_x,
        tiles_y
    );
    tiles
}
