//! # PatternKit Export
//!
//! Turns pattern pieces into printable output.
//!
//! ## Pipeline
//!
//! ```text
//! PieceMap
//!   └── layout   (row packing onto one canvas)
//!         ├── render::render_full_scale  (1:1 page)
//!         ├── tiling + render::render_tiles  (sheet-sized pages)
//!         └── render::render_thumbnail  (pixel preview)
//!
//! sleeve outline
//!   └── sleeve::split_sleeve  (2 or 3 panels) -> PieceMap
//! ```
//!
//! Pages are backend-neutral drawing instructions; [`svg`] and [`raster`]
//! write them out.

pub mod exporter;
pub mod font;
pub mod layout;
pub mod raster;
pub mod render;
pub mod sleeve;
pub mod svg;
pub mod tiling;

pub use exporter::{ExportBundle, PatternExporter};
pub use layout::{pack_pieces, Layout, LayoutOffset, Placement};
pub use raster::{rasterize, save_raster};
pub use render::{
    render_full_scale, render_thumbnail, render_tiles, Color, DrawCommand, Page, Surface,
    TextAnchor,
};
pub use sleeve::{split_sleeve, BackSide, SleeveSplit, SplitPiece};
pub use svg::page_to_svg;
pub use tiling::{grid_size, tile_canvas, Tile};
