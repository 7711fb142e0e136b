//! Export orchestration
//!
//! [`PatternExporter`] runs one export: validate the pieces, pack them, and
//! render the full-scale page, the tile pages and the thumbnail from the same
//! layout. Each call packs afresh; the exporter holds only its settings.

use crate::layout::{pack_pieces, Layout};
use crate::raster::save_raster;
use crate::render::{render_full_scale, render_thumbnail, render_tiles, Page};
use crate::sleeve::{split_sleeve, SleeveSplit};
use crate::svg::page_to_svg;
use patternkit_core::{ExportSettings, PatternPiece, PieceMap, Result, SleeveSettings};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Everything produced by one export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBundle {
    pub layout: Layout,
    /// `None` when there was nothing to draw
    pub full: Option<Page>,
    pub tiles: Vec<Page>,
    pub thumbnail: Option<Page>,
}

impl ExportBundle {
    pub fn is_empty(&self) -> bool {
        self.full.is_none() && self.tiles.is_empty() && self.thumbnail.is_none()
    }

    /// Number of printable pages, full-scale page included
    pub fn page_count(&self) -> usize {
        self.tiles.len() + usize::from(self.full.is_some())
    }

    /// Write `<stem>_full.svg`, `<stem>_tile_NN.svg` and `<stem>_thumbnail.jpg` into `dir`.
    ///
    /// Returns the written paths; an empty bundle writes nothing.
    pub fn write_to_dir(&self, dir: &Path, stem: &str) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::new();

        if let Some(full) = &self.full {
            let path = dir.join(format!("{}_full.svg", stem));
            std::fs::write(&path, page_to_svg(full))?;
            written.push(path);
        }

        for (i, tile) in self.tiles.iter().enumerate() {
            let path = dir.join(format!("{}_tile_{:02}.svg", stem, i + 1));
            std::fs::write(&path, page_to_svg(tile))?;
            written.push(path);
        }

        if let Some(thumbnail) = &self.thumbnail {
            let path = dir.join(format!("{}_thumbnail.jpg", stem));
            save_raster(thumbnail, 0.0, &path)?;
            written.push(path);
        }

        Ok(written)
    }
}

/// Runs exports with fixed settings.
#[derive(Debug, Clone, Default)]
pub struct PatternExporter {
    settings: ExportSettings,
}

impl PatternExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Validate, pack and render `pieces`.
    ///
    /// Pieces without points are skipped with a warning; every other piece must
    /// be a valid outline. An empty result is not an error.
    pub fn export(&self, pieces: &PieceMap, title: &str) -> Result<ExportBundle> {
        self.settings.validate()?;
        pieces.validate()?;

        for name in pieces
            .iter()
            .filter(|(_, piece)| piece.is_empty())
            .map(|(name, _)| name)
        {
            warn!("Piece '{}' has no points and will not be exported", name);
        }

        let layout = pack_pieces(
            pieces,
            self.settings.piece_spacing,
            self.settings.pieces_per_row,
        );

        let bundle = ExportBundle {
            full: render_full_scale(pieces, &layout, title, &self.settings),
            tiles: render_tiles(pieces, &layout, title, &self.settings),
            thumbnail: render_thumbnail(pieces, &layout, title, &self.settings),
            layout,
        };

        info!(
            "Exported '{}': {} pieces, {} tile pages",
            title,
            bundle.layout.placements.len(),
            bundle.tiles.len()
        );
        Ok(bundle)
    }

    /// Split a sleeve into `piece_count` pieces and export them on their own.
    pub fn export_sleeve(
        &self,
        sleeve: &PatternPiece,
        piece_count: usize,
        sleeve_settings: &SleeveSettings,
        title: &str,
    ) -> Result<(SleeveSplit, ExportBundle)> {
        sleeve_settings.validate()?;
        let split = split_sleeve(&sleeve.points, piece_count, sleeve_settings)?;
        let pieces = split.to_piece_map()?;
        let bundle = self.export(&pieces, title)?;
        Ok((split, bundle))
    }
}
