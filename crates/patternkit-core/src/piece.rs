//! Pattern pieces and the ordered piece map handed between pipeline stages.

use crate::error::PieceError;
use crate::geometry::{all_collinear, Bounds, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum number of points for a cuttable piece.
pub const MIN_PIECE_POINTS: usize = 3;

const COLLINEAR_TOLERANCE: f64 = 1e-9;

/// Straight-of-grain direction printed on a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grainline {
    /// Grain runs top to bottom
    #[default]
    Vertical,
    /// Grain runs left to right
    Horizontal,
}

impl fmt::Display for Grainline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => write!(f, "vertical"),
            Self::Horizontal => write!(f, "horizontal"),
        }
    }
}

impl FromStr for Grainline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vertical" | "v" => Ok(Self::Vertical),
            "horizontal" | "h" => Ok(Self::Horizontal),
            _ => Err(format!("Unknown grainline: {}", s)),
        }
    }
}

/// One closed cut boundary of a garment pattern.
///
/// The first and last points are implicitly connected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternPiece {
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grainline: Option<Grainline>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notches: Vec<Point>,
}

impl PatternPiece {
    /// Create a bare piece with no annotations.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            ..Default::default()
        }
    }

    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().copied().map(Point::from).collect())
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_cutting(mut self, cutting: impl Into<String>) -> Self {
        self.cutting = Some(cutting.into());
        self
    }

    pub fn with_grainline(mut self, grainline: Grainline) -> Self {
        self.grainline = Some(grainline);
        self
    }

    pub fn with_notches(mut self, notches: Vec<Point>) -> Self {
        self.notches = notches;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }

    /// Check the cuttable-piece invariant: at least three finite, non-collinear points.
    pub fn validate(&self, name: &str) -> Result<(), PieceError> {
        if self.points.len() < MIN_PIECE_POINTS {
            return Err(PieceError::TooFewPoints {
                name: name.to_string(),
                count: self.points.len(),
                min: MIN_PIECE_POINTS,
            });
        }

        if !self.points.iter().all(Point::is_finite) {
            return Err(PieceError::NonFinite {
                name: name.to_string(),
            });
        }

        if all_collinear(&self.points, COLLINEAR_TOLERANCE) {
            return Err(PieceError::Collinear {
                name: name.to_string(),
            });
        }

        Ok(())
    }

    /// Copy of this piece with every point and notch moved by (dx, dy).
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            points: self.points.iter().map(|p| p.translated(dx, dy)).collect(),
            notches: self.notches.iter().map(|p| p.translated(dx, dy)).collect(),
            ..self.clone()
        }
    }
}

/// Ordered mapping from unique piece name to piece.
///
/// Insertion order is the default packing order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceMap {
    entries: Vec<(String, PatternPiece)>,
}

impl PieceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a piece; names must be unique within the map.
    pub fn insert(&mut self, name: impl Into<String>, piece: PatternPiece) -> Result<(), PieceError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(PieceError::DuplicateName(name));
        }
        self.entries.push((name, piece));
        Ok(())
    }

    /// Builder form of [`PieceMap::insert`].
    pub fn with_piece(
        mut self,
        name: impl Into<String>,
        piece: PatternPiece,
    ) -> Result<Self, PieceError> {
        self.insert(name, piece)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&PatternPiece> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, piece)| piece)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PatternPiece)> {
        self.entries.iter().map(|(name, piece)| (name.as_str(), piece))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Total number of outline points across all pieces.
    pub fn total_points(&self) -> usize {
        self.entries.iter().map(|(_, piece)| piece.points.len()).sum()
    }

    /// Validate every non-empty piece. Empty pieces are left for the packer to skip.
    ///
    /// Also catches duplicate names, which deserialization cannot reject.
    pub fn validate(&self) -> Result<(), PieceError> {
        for (i, (name, piece)) in self.iter().enumerate() {
            if self.names().take(i).any(|earlier| earlier == name) {
                return Err(PieceError::DuplicateName(name.to_string()));
            }
            if piece.is_empty() {
                continue;
            }
            piece.validate(name)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a PieceMap {
    type Item = (&'a str, &'a PatternPiece);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a PatternPiece)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
