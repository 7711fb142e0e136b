//! Sleeve splitting
//!
//! Divides a one-piece sleeve outline into a two-piece tailored sleeve (upper and
//! under sleeve) or a three-piece sleeve with a separate cuff panel.
//!
//! The seam between the upper and under sleeve is not a straight line. It is
//! sampled at evenly spaced levels from cap to cuff and at each level sits a fixed
//! fraction of the local sleeve width toward the back: furthest back in the cap,
//! slightly less through the elbow, centred at the cuff. The back of the sleeve
//! is on the right when the cap reaches at least as far right of x = 0 as it
//! reaches left, so outlines are expected to be drafted about x = 0.

use patternkit_core::{
    Bounds, Grainline, PatternPiece, PieceMap, Point, Result, SleeveSettings, SplitError,
    MIN_PIECE_POINTS,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const UPPER_SLEEVE: &str = "Upper Sleeve (Oversleeve)";
pub const UNDER_SLEEVE: &str = "Under Sleeve (Undersleeve)";
pub const UPPER_SLEEVE_BACK: &str = "Upper Sleeve (Back)";
pub const UNDER_SLEEVE_FRONT: &str = "Under Sleeve (Front)";
pub const CUFF_PIECE: &str = "Cuff Piece";

/// Side of the outline that holds the back of the arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackSide {
    Left,
    Right,
}

impl fmt::Display for BackSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// One sub-piece of a split sleeve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitPiece {
    pub name: String,
    pub description: String,
    /// Closed outline including the seam points shared with sibling pieces
    pub points: Vec<Point>,
}

impl SplitPiece {
    fn new(name: &str, description: &str, points: Vec<Point>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            points,
        }
    }

    /// Printable pattern piece for this panel
    pub fn to_pattern_piece(&self) -> PatternPiece {
        PatternPiece::new(self.points.clone())
            .with_label(self.name.to_uppercase())
            .with_cutting("Cut 2")
            .with_grainline(Grainline::Vertical)
    }
}

/// Result of splitting a sleeve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleeveSplit {
    pub pieces: Vec<SplitPiece>,
    /// Detected back side
    pub back_side: BackSide,
    /// Seam curve from cap to cuff
    pub seam: Vec<Point>,
}

impl SleeveSplit {
    pub fn piece(&self, name: &str) -> Option<&SplitPiece> {
        self.pieces.iter().find(|p| p.name == name)
    }

    /// Split pieces keyed by name, ready for packing.
    pub fn to_piece_map(&self) -> Result<PieceMap> {
        let mut map = PieceMap::new();
        for piece in &self.pieces {
            map.insert(piece.name.clone(), piece.to_pattern_piece())?;
        }
        Ok(map)
    }
}

/// Split a sleeve outline into `piece_count` (2 or 3) pieces.
pub fn split_sleeve(
    outline: &[Point],
    piece_count: usize,
    settings: &SleeveSettings,
) -> std::result::Result<SleeveSplit, SplitError> {
    if outline.len() < settings.min_points {
        return Err(SplitError::TooFewPoints {
            count: outline.len(),
            min: settings.min_points,
        });
    }
    if !matches!(piece_count, 2 | 3) {
        return Err(SplitError::UnsupportedPieceCount(piece_count));
    }
    if !outline.iter().all(Point::is_finite) {
        return Err(SplitError::Degenerate(
            "outline contains non-finite coordinates".to_string(),
        ));
    }

    let bounds = Bounds::from_points(outline)
        .ok_or_else(|| SplitError::Degenerate("empty outline".to_string()))?;
    let height = bounds.height();
    if height <= 0.0 {
        return Err(SplitError::Degenerate("sleeve has zero height".to_string()));
    }

    let back_side = detect_back_side(outline, &bounds, settings);
    let seam = seam_curve(outline, &bounds, back_side, settings);
    if seam.is_empty() {
        return Err(SplitError::Degenerate(
            "no outline points near any seam level".to_string(),
        ));
    }

    let (back, front) = assign_points(outline, &seam, back_side);

    let mut upper = back;
    upper.extend(seam.iter().copied());
    let mut under = front;
    under.extend(seam.iter().rev().copied());

    debug!(
        "Sleeve split: back={}, {} seam points, upper={} under={}",
        back_side,
        seam.len(),
        upper.len(),
        under.len()
    );

    let pieces = if piece_count == 2 {
        ensure_piece_points(UPPER_SLEEVE, &upper)?;
        ensure_piece_points(UNDER_SLEEVE, &under)?;
        vec![
            SplitPiece::new(
                UPPER_SLEEVE,
                "Back and top of the arm, seam offset toward the back",
                upper,
            ),
            SplitPiece::new(
                UNDER_SLEEVE,
                "Inside of the arm, tucked under toward the front",
                under,
            ),
        ]
    } else {
        split_cuff(upper, under, &bounds, settings)?
    };

    Ok(SleeveSplit {
        pieces,
        back_side,
        seam,
    })
}

/// Compare how far the cap reaches right and left of x = 0. Ties go right.
fn detect_back_side(outline: &[Point], bounds: &Bounds, settings: &SleeveSettings) -> BackSide {
    let cap_limit = bounds.min_y + settings.cap_band * bounds.height();

    let (cap_min_x, cap_max_x) = outline
        .iter()
        .filter(|p| p.y <= cap_limit)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.x), hi.max(p.x))
        });

    // The topmost point is always inside the band, so both extents are finite.
    if cap_max_x >= cap_min_x.abs() {
        BackSide::Right
    } else {
        BackSide::Left
    }
}

fn seam_curve(
    outline: &[Point],
    bounds: &Bounds,
    back_side: BackSide,
    settings: &SleeveSettings,
) -> Vec<Point> {
    let height = bounds.height();
    let band = settings.band_tolerance * height;
    let steps = settings.seam_levels.saturating_sub(1).max(1) as f64;

    (0..settings.seam_levels)
        .filter_map(|level| {
            let y = bounds.min_y + level as f64 / steps * height;

            let (min_x, max_x) = outline
                .iter()
                .filter(|p| (p.y - y).abs() <= band)
                .fold(None, |span: Option<(f64, f64)>, p| {
                    Some(match span {
                        Some((lo, hi)) => (lo.min(p.x), hi.max(p.x)),
                        None => (p.x, p.x),
                    })
                })?;

            let bias = settings.bias_at((bounds.max_y - y) / height);
            let x = match back_side {
                BackSide::Right => min_x + bias * (max_x - min_x),
                BackSide::Left => max_x - bias * (max_x - min_x),
            };
            Some(Point::new(x, y))
        })
        .collect()
}

/// Sort outline points into (back, front) by the seam level nearest in height.
fn assign_points(
    outline: &[Point],
    seam: &[Point],
    back_side: BackSide,
) -> (Vec<Point>, Vec<Point>) {
    let mut back = Vec::new();
    let mut front = Vec::new();

    for &p in outline {
        let seam_x = seam
            .iter()
            .min_by(|a, b| (a.y - p.y).abs().total_cmp(&(b.y - p.y).abs()))
            .map_or(p.x, |s| s.x);

        let on_back = match back_side {
            BackSide::Right => p.x >= seam_x,
            BackSide::Left => p.x <= seam_x,
        };
        if on_back {
            back.push(p);
        } else {
            front.push(p);
        }
    }

    (back, front)
}

fn ensure_piece_points(name: &str, points: &[Point]) -> std::result::Result<(), SplitError> {
    if points.len() < MIN_PIECE_POINTS {
        return Err(SplitError::Degenerate(format!(
            "'{}' would have only {} points",
            name,
            points.len()
        )));
    }
    Ok(())
}

fn split_cuff(
    upper: Vec<Point>,
    under: Vec<Point>,
    bounds: &Bounds,
    settings: &SleeveSettings,
) -> std::result::Result<Vec<SplitPiece>, SplitError> {
    let height = bounds.height();
    let split_y = bounds.max_y - settings.cuff_split_ratio * height;
    let tolerance = settings.cuff_split_tolerance * height;

    let above = |points: &[Point]| -> Vec<Point> {
        points
            .iter()
            .copied()
            .filter(|p| p.y <= split_y + tolerance)
            .collect()
    };
    let below = |points: &[Point]| -> Vec<Point> {
        points
            .iter()
            .copied()
            .filter(|p| p.y >= split_y - tolerance)
            .collect()
    };

    let upper_top = above(&upper);
    let under_top = above(&under);
    let mut cuff = below(&upper);
    cuff.extend(below(&under));

    ensure_piece_points(UPPER_SLEEVE_BACK, &upper_top)?;
    ensure_piece_points(UNDER_SLEEVE_FRONT, &under_top)?;
    ensure_piece_points(CUFF_PIECE, &cuff)?;

    debug!(
        "Cuff split at y={:.2}: upper={} under={} cuff={}",
        split_y,
        upper_top.len(),
        under_top.len(),
        cuff.len()
    );

    Ok(vec![
        SplitPiece::new(
            UPPER_SLEEVE_BACK,
            "Back of the arm from cap to above the cuff",
            upper_top,
        ),
        SplitPiece::new(
            UNDER_SLEEVE_FRONT,
            "Front of the arm from underarm to above the cuff",
            under_top,
        ),
        SplitPiece::new(CUFF_PIECE, "Lower sleeve band joining both panels", cuff),
    ])
}
