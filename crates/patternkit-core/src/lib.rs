//! # PatternKit Core
//!
//! Core types shared by every stage of the sewing pattern pipeline:
//! centimeter geometry, pattern pieces and the ordered piece map,
//! body measurements, pipeline settings and the error hierarchy.

pub mod error;
pub mod geometry;
pub mod measurements;
pub mod piece;
pub mod settings;

pub use error::{ConfigError, Error, PieceError, Result, SplitError};
pub use geometry::{all_collinear, vertex_centroid, Bounds, Point};
pub use measurements::{Gender, Measurements};
pub use piece::{Grainline, PatternPiece, PieceMap, MIN_PIECE_POINTS};
pub use settings::{CurveSettings, ExportSettings, PageSize, Settings, SleeveSettings};
