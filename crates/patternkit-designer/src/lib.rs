//! # PatternKit Designer
//!
//! Shape construction for pattern pieces.
//!
//! ## Components
//!
//! - **Curve engine**: natural cubic spline smoothing and quadratic Bézier
//!   sampling, used to turn a few control points into a dense outline edge
//! - **Fallback drafting**: block formulas for shirts, vests, trousers and coats
//!   driven by a [`patternkit_core::Measurements`] store
//!
//! ## Usage
//!
//! ```rust
//! use patternkit_core::{Gender, Measurements};
//! use patternkit_designer::{DraftGenerator, DraftOptions, GarmentType};
//!
//! let generator = DraftGenerator::new(
//!     Measurements::default_for(Gender::Womens),
//!     DraftOptions::smoothed(),
//! );
//! let pieces = generator.generate(GarmentType::Shirt).unwrap();
//! assert_eq!(pieces.len(), 3);
//! ```

pub mod curve;
pub mod drafting;

pub use curve::{bezier_between, smooth_curve, MIN_SPLINE_POINTS};
pub use drafting::{DraftGenerator, DraftOptions, GarmentType};
