//! Fallback garment drafting
//!
//! Simple block formulas that turn a [`Measurements`] store into pattern pieces
//! when no external drafting engine is available. Every formula works in cm with
//! a fixed ease allowance per garment type. With [`DraftOptions::smooth`] set, the
//! curved edges (necklines, armholes, sleeve caps, crotch seams) are resampled
//! through the curve engine; otherwise their control points are emitted as corners.

use crate::curve::{bezier_between, smooth_curve};
use patternkit_core::{
    CurveSettings, Grainline, Measurements, PatternPiece, PieceMap, Point, Result,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

const SHIRT_EASE: f64 = 10.0;
const VEST_EASE: f64 = 8.0;
const TROUSER_EASE: f64 = 8.0;
const COAT_EASE: f64 = 15.0;

/// Extra body length of a coat below the natural waist
const COAT_EXTRA_LENGTH: f64 = 30.0;
/// Extra sleeve length of a coat
const COAT_EXTRA_SLEEVE: f64 = 5.0;

/// Garment styles known to the fallback generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentType {
    Shirt,
    Vest,
    Trousers,
    Coat,
}

impl GarmentType {
    pub const ALL: [GarmentType; 4] = [
        GarmentType::Shirt,
        GarmentType::Vest,
        GarmentType::Trousers,
        GarmentType::Coat,
    ];

    /// Design ease added to girth measurements
    pub fn ease(&self) -> f64 {
        match self {
            Self::Shirt => SHIRT_EASE,
            Self::Vest => VEST_EASE,
            Self::Trousers => TROUSER_EASE,
            Self::Coat => COAT_EASE,
        }
    }

    pub fn has_sleeve(&self) -> bool {
        matches!(self, Self::Shirt | Self::Coat)
    }
}

impl fmt::Display for GarmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shirt => write!(f, "shirt"),
            Self::Vest => write!(f, "vest"),
            Self::Trousers => write!(f, "trousers"),
            Self::Coat => write!(f, "coat"),
        }
    }
}

impl FromStr for GarmentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shirt" => Ok(Self::Shirt),
            "vest" | "waistcoat" => Ok(Self::Vest),
            "trousers" | "pants" => Ok(Self::Trousers),
            "coat" => Ok(Self::Coat),
            _ => Err(format!("Unknown garment type: {}", s)),
        }
    }
}

/// Drafting options
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftOptions {
    /// Resample curved edges through the curve engine
    pub smooth: bool,
    /// Sample densities used when smoothing
    pub curves: CurveSettings,
}

impl DraftOptions {
    pub fn smoothed() -> Self {
        Self {
            smooth: true,
            ..Default::default()
        }
    }
}

/// Produces pattern pieces from body measurements.
#[derive(Debug, Clone)]
pub struct DraftGenerator {
    measurements: Measurements,
    options: DraftOptions,
}

impl DraftGenerator {
    pub fn new(measurements: Measurements, options: DraftOptions) -> Self {
        Self {
            measurements,
            options,
        }
    }

    pub fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    pub fn options(&self) -> &DraftOptions {
        &self.options
    }

    /// Draft every piece of the requested garment, in packing order.
    pub fn generate(&self, garment: GarmentType) -> Result<PieceMap> {
        let pieces = match garment {
            GarmentType::Shirt => self.shirt()?,
            GarmentType::Vest => self.vest()?,
            GarmentType::Trousers => self.trousers()?,
            GarmentType::Coat => self.coat()?,
        };

        debug!(
            "Drafted {} with {} pieces ({} points, smooth={})",
            garment,
            pieces.len(),
            pieces.total_points(),
            self.options.smooth
        );
        Ok(pieces)
    }

    fn shirt(&self) -> Result<PieceMap> {
        let m = &self.measurements;
        let bodice = Bodice {
            half_chest: (m.get_or("chest", 100.0) + SHIRT_EASE) / 2.0,
            half_waist: (m.get_or("waist", 85.0) + SHIRT_EASE) / 2.0,
            shoulder: m.get_or("shoulder_width", 45.0),
            neck: m.get_or("neck", 38.0),
            length: m.get_or("nape_to_waist", 45.0),
        };
        let sleeve = Sleeve {
            length: m.get_or("sleeve_length", 60.0),
            bicep: m.get_or("bicep", 32.0),
            wrist: m.get_or("wrist", 16.0),
        };

        let armhole_depth = bodice.length / 4.0;
        let front = self
            .bodice_piece(&bodice, bodice.neck / 6.0 + 1.0, armhole_depth, Hem::Waist)
            .with_label("FRONT BODICE")
            .with_cutting("Cut 1 on fold");
        let back = self
            .bodice_piece(&bodice, bodice.neck / 20.0, armhole_depth, Hem::Waist)
            .with_label("BACK BODICE")
            .with_cutting("Cut 1 on fold");
        let sleeve = self.sleeve_piece(&sleeve).with_label("SLEEVE");

        Ok(PieceMap::new()
            .with_piece("front", front)?
            .with_piece("back", back)?
            .with_piece("sleeve", sleeve)?)
    }

    fn coat(&self) -> Result<PieceMap> {
        let m = &self.measurements;
        let bodice = Bodice {
            half_chest: (m.get_or("chest", 100.0) + COAT_EASE) / 2.0,
            half_waist: (m.get_or("waist", 85.0) + COAT_EASE) / 2.0,
            shoulder: m.get_or("shoulder_width", 45.0),
            neck: m.get_or("neck", 38.0),
            length: m.get_or("nape_to_waist", 45.0) + COAT_EXTRA_LENGTH,
        };
        let sleeve = Sleeve {
            length: m.get_or("sleeve_length", 60.0) + COAT_EXTRA_SLEEVE,
            bicep: m.get_or("bicep", 32.0) + 5.0,
            wrist: m.get_or("wrist", 16.0) + 2.0,
        };

        let armhole_depth = bodice.length / 5.0;
        let front = self
            .bodice_piece(&bodice, bodice.neck / 5.0, armhole_depth, Hem::Flared)
            .with_label("COAT FRONT")
            .with_cutting("Cut 2");
        let back = self
            .bodice_piece(&bodice, bodice.neck / 20.0, armhole_depth, Hem::Flared)
            .with_label("COAT BACK")
            .with_cutting("Cut 1 on fold");
        let sleeve = self.sleeve_piece(&sleeve).with_label("COAT SLEEVE");

        Ok(PieceMap::new()
            .with_piece("front", front)?
            .with_piece("back", back)?
            .with_piece("sleeve", sleeve)?)
    }

    fn vest(&self) -> Result<PieceMap> {
        let m = &self.measurements;
        let half_chest = (m.get_or("chest", 100.0) + VEST_EASE) / 2.0;
        let half_waist = (m.get_or("waist", 85.0) + VEST_EASE) / 2.0;
        let shoulder = m.get_or("shoulder_width", 45.0);
        let neck = m.get_or("neck", 38.0);
        let length = m.get_or("nape_to_waist", 45.0);

        let vest_piece = |neck_width: f64, neck_depth: f64, center_drop: f64| {
            let armhole_start = Point::new(shoulder / 2.0, 0.0);
            let armhole_end = Point::new(half_chest, length / 3.0);
            let points = self
                .outline(Point::new(0.0, neck_depth))
                .bezier(Point::new(neck_width, neck_depth), Point::new(neck_width, 0.0))
                .line(armhole_start)
                .spline(&[
                    armhole_start,
                    Point::new(
                        shoulder / 2.0 + (half_chest - shoulder / 2.0) * 0.3,
                        length / 3.0 * 0.7,
                    ),
                    armhole_end,
                ])
                .line(Point::new(half_waist, length))
                .line(Point::new(5.0, length + center_drop))
                .finish();

            PatternPiece::new(points)
                .with_grainline(Grainline::Vertical)
                .with_notches(vec![armhole_end])
        };

        let front = vest_piece(neck / 5.0, neck / 4.0, 5.0)
            .with_label("VEST FRONT")
            .with_cutting("Cut 2");
        let back = vest_piece(neck / 6.0, neck / 20.0, 0.0)
            .with_label("VEST BACK")
            .with_cutting("Cut 1 on fold");

        Ok(PieceMap::new()
            .with_piece("front", front)?
            .with_piece("back", back)?)
    }

    fn trousers(&self) -> Result<PieceMap> {
        let m = &self.measurements;
        let half_waist = (m.get_or("waist", 85.0) + TROUSER_EASE) / 2.0;
        let half_hip = (m.get_or("hip", 100.0) + TROUSER_EASE) / 2.0;
        let rise = m.get_or("rise", 27.0);
        let inseam = m.get_or("inseam", 80.0);

        let leg = |waist_width: f64, crotch_extension: f64, crotch_drop: f64, knee: f64, ankle: f64| {
            let waist_center = Point::new(waist_width, 0.0);
            let crotch = Point::new(half_waist + crotch_extension, rise + crotch_drop);
            let knee_point = Point::new(knee, rise + inseam / 2.0);
            let points = self
                .outline(Point::new(0.0, 0.0))
                .line(waist_center)
                .spline(&[
                    waist_center,
                    Point::new(
                        waist_center.x + (crotch.x - waist_center.x) * 0.25,
                        crotch.y * 0.7,
                    ),
                    crotch,
                ])
                .line(knee_point)
                .line(Point::new(ankle / 2.0, rise + inseam))
                .line(Point::new(0.0, rise + inseam))
                .line(Point::new(0.0, rise))
                .finish();

            PatternPiece::new(points)
                .with_cutting("Cut 2")
                .with_grainline(Grainline::Vertical)
                .with_notches(vec![knee_point])
        };

        let front = leg(
            half_waist,
            half_hip / 10.0,
            0.0,
            half_hip * 0.6,
            half_hip * 0.45,
        )
        .with_label("TROUSER FRONT");
        let back = leg(
            half_waist + 3.0,
            half_hip / 8.0,
            3.0,
            half_hip * 0.65,
            half_hip * 0.5,
        )
        .with_label("TROUSER BACK");

        Ok(PieceMap::new()
            .with_piece("front", front)?
            .with_piece("back", back)?)
    }

    fn bodice_piece(&self, b: &Bodice, neck_depth: f64, armhole_depth: f64, hem: Hem) -> PatternPiece {
        let neck_width = b.neck / 6.0;
        let shoulder_point = Point::new(b.shoulder / 2.0, 0.0);
        let side_chest = Point::new(b.half_chest, armhole_depth + 5.0);

        let outline = self
            .outline(Point::new(0.0, neck_depth))
            .bezier(Point::new(neck_width, neck_depth), Point::new(neck_width, 0.0))
            .line(shoulder_point)
            .spline(&[
                shoulder_point,
                Point::new(b.shoulder / 2.0, armhole_depth),
                side_chest,
            ]);

        let outline = match hem {
            Hem::Waist => outline.line(Point::new(b.half_waist, b.length)),
            Hem::Flared => outline.line(Point::new(b.half_chest + 2.0, b.length * 0.7)),
        };
        let points = outline.line(Point::new(5.0, b.length)).finish();

        PatternPiece::new(points)
            .with_grainline(Grainline::Vertical)
            .with_notches(vec![side_chest])
    }

    fn sleeve_piece(&self, s: &Sleeve) -> PatternPiece {
        let cap_height = s.bicep / 3.0;
        let half_bicep = s.bicep / 2.0;
        let cap_top = Point::new(half_bicep, 0.0);
        let back_underarm = Point::new(s.bicep, cap_height);

        let points = self
            .outline(back_underarm)
            .spline(&[back_underarm, cap_top, Point::new(0.0, cap_height)])
            .line(Point::new(0.0, s.length - 5.0))
            .line(Point::new(s.wrist / 2.0, s.length))
            .line(Point::new(s.bicep, s.length - 5.0))
            .finish();

        PatternPiece::new(points)
            .with_cutting("Cut 2")
            .with_grainline(Grainline::Vertical)
            .with_notches(vec![cap_top])
    }

    fn outline(&self, start: Point) -> Outline<'_> {
        Outline {
            points: vec![start],
            options: &self.options,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Bodice {
    half_chest: f64,
    half_waist: f64,
    shoulder: f64,
    neck: f64,
    length: f64,
}

#[derive(Debug, Clone, Copy)]
struct Sleeve {
    length: f64,
    bicep: f64,
    wrist: f64,
}

#[derive(Debug, Clone, Copy)]
enum Hem {
    /// Side seam runs in to the waist
    Waist,
    /// Side seam flares out below the chest
    Flared,
}

/// Closed outline under construction. Consecutive duplicate points are dropped.
struct Outline<'a> {
    points: Vec<Point>,
    options: &'a DraftOptions,
}

impl Outline<'_> {
    fn line(mut self, to: Point) -> Self {
        self.push(to);
        self
    }

    /// Curve through `through`; corners at each point when smoothing is off.
    fn spline(mut self, through: &[Point]) -> Self {
        let points = if self.options.smooth {
            smooth_curve(through, self.options.curves.spline_samples)
        } else {
            through.to_vec()
        };
        for p in points {
            self.push(p);
        }
        self
    }

    /// Curve from the current end point to `to`, pulled toward `control`.
    fn bezier(mut self, control: Point, to: Point) -> Self {
        let from = self.points[self.points.len() - 1];
        let points = if self.options.smooth {
            bezier_between(from, to, control, self.options.curves.bezier_samples)
        } else {
            vec![control, to]
        };
        for p in points {
            self.push(p);
        }
        self
    }

    fn finish(mut self) -> Vec<Point> {
        if self.points.len() > 1 && self.points[0].approx_eq(self.points[self.points.len() - 1], 1e-9) {
            self.points.pop();
        }
        self.points
    }

    fn push(&mut self, p: Point) {
        if self
            .points
            .last()
            .is_some_and(|last| last.approx_eq(p, 1e-9))
        {
            return;
        }
        self.points.push(p);
    }
}
