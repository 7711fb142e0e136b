//! Row packing of pattern pieces onto one canvas.
//!
//! Pieces are placed left to right in insertion order, each translated so its
//! bounding box starts at the cursor. After a fixed number of pieces the cursor
//! wraps to a new row below the tallest piece of the finished row.

use patternkit_core::{Bounds, PatternPiece, PieceMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Additive translation applied to every point of a packed piece.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutOffset {
    pub dx: f64,
    pub dy: f64,
}

/// Where one piece landed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub name: String,
    pub offset: LayoutOffset,
    /// Bounding box after translation
    pub bounds: Bounds,
}

/// Result of packing a piece map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub placements: Vec<Placement>,
    /// Union of all placed bounding boxes, `None` when nothing was placed
    pub canvas: Option<Bounds>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn offset(&self, name: &str) -> Option<LayoutOffset> {
        self.placements
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.offset)
    }

    /// Translated copies of the placed pieces, in placement order.
    ///
    /// Names that are missing from `pieces` are skipped.
    pub fn packed_pieces<'a>(
        &'a self,
        pieces: &'a PieceMap,
    ) -> impl Iterator<Item = (&'a Placement, PatternPiece)> + 'a {
        self.placements.iter().filter_map(move |placement| {
            pieces.get(&placement.name).map(|piece| {
                (
                    placement,
                    piece.translated(placement.offset.dx, placement.offset.dy),
                )
            })
        })
    }
}

struct LayoutCursor {
    x: f64,
    y: f64,
    spacing: f64,
    row_height: f64,
    in_row: usize,
    per_row: usize,
}

impl LayoutCursor {
    fn new(spacing: f64, per_row: usize) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            spacing,
            row_height: 0.0,
            in_row: 0,
            per_row: per_row.max(1),
        }
    }

    fn place(&mut self, width: f64, height: f64) -> (f64, f64) {
        let position = (self.x, self.y);
        self.x += width + self.spacing;
        self.row_height = self.row_height.max(height);
        self.in_row += 1;
        if self.in_row == self.per_row {
            self.next_row();
        }
        position
    }

    fn next_row(&mut self) {
        self.y += self.row_height + self.spacing;
        self.x = 0.0;
        self.row_height = 0.0;
        self.in_row = 0;
    }
}

/// Pack `pieces` in insertion order, `per_row` pieces per row, `spacing` cm apart.
///
/// Pieces with no points are skipped and get no placement.
pub fn pack_pieces(pieces: &PieceMap, spacing: f64, per_row: usize) -> Layout {
    let mut cursor = LayoutCursor::new(spacing, per_row);
    let mut layout = Layout::default();

    for (name, piece) in pieces {
        let Some(bounds) = piece.bounds() else {
            warn!("Skipping piece '{}' with no points", name);
            continue;
        };

        let (x, y) = cursor.place(bounds.width(), bounds.height());
        let offset = LayoutOffset {
            dx: x - bounds.min_x,
            dy: y - bounds.min_y,
        };
        let placed = bounds.translated(offset.dx, offset.dy);

        layout.canvas = Some(match layout.canvas {
            Some(canvas) => canvas.union(&placed),
            None => placed,
        });
        layout.placements.push(Placement {
            name: name.to_string(),
            offset,
            bounds: placed,
        });
    }

    if let Some(canvas) = &layout.canvas {
        debug!(
            "Packed {} pieces onto {:.1} x {:.1} cm canvas",
            layout.placements.len(),
            canvas.width(),
            canvas.height()
        );
    }

    layout
}
