//! # PatternKit
//!
//! Full-scale sewing pattern output for garment outlines:
//! - Row packing of pattern pieces onto a single canvas
//! - Tiling of the canvas onto overlapping A4 (or custom) sheets
//! - Splitting of one-piece sleeves into two- or three-piece sleeves
//! - Natural cubic spline and quadratic Bézier edge smoothing
//!
//! ## Architecture
//!
//! PatternKit is organized as a workspace with multiple crates:
//!
//! 1. **patternkit-core** - Geometry, pattern pieces, measurements, settings, errors
//! 2. **patternkit-designer** - Curve engine and fallback garment drafting
//! 3. **patternkit-export** - Layout, tiling, sleeve splitting, pages, SVG and raster output
//! 4. **patternkit** - This crate: re-exports, logging setup and the demo binary

pub use patternkit_designer as designer;
pub use patternkit_export as export;

pub use patternkit_core::{
    Bounds, ConfigError, CurveSettings, Error, ExportSettings, Gender, Grainline, Measurements,
    PageSize, PatternPiece, PieceError, PieceMap, Point, Result, Settings, SleeveSettings,
    SplitError,
};

pub use patternkit_designer::{
    bezier_between, smooth_curve, DraftGenerator, DraftOptions, GarmentType,
};

pub use patternkit_export::{
    pack_pieces, page_to_svg, rasterize, split_sleeve, tile_canvas, BackSide, DrawCommand,
    ExportBundle, Layout, Page, PatternExporter, SleeveSplit, SplitPiece, Tile,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
