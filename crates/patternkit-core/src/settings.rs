//! Configuration for the pattern pipeline
//!
//! Settings are grouped by pipeline stage:
//! - Export settings (page size, margins, packing policy, thumbnail size)
//! - Sleeve settings (seam bias fractions, height bands, tolerances)
//! - Curve settings (default resampling density)
//!
//! Every field defaults to the named constant of the same meaning, so a partial
//! settings file only needs to list what it overrides. Files may be JSON or TOML.

use crate::error::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A4 sheet width in cm
pub const A4_WIDTH_CM: f64 = 21.0;
/// A4 sheet height in cm
pub const A4_HEIGHT_CM: f64 = 29.7;
/// Default printable margin in cm
pub const DEFAULT_MARGIN_CM: f64 = 2.0;
/// Gap between packed pieces in cm
pub const DEFAULT_PIECE_SPACING_CM: f64 = 5.0;
/// Row-wrapping policy of the packer
pub const DEFAULT_PIECES_PER_ROW: usize = 3;
/// Longest thumbnail edge in pixels
pub const DEFAULT_THUMBNAIL_MAX_PX: u32 = 1200;

/// Default spline resampling density
pub const DEFAULT_CURVE_SAMPLES: usize = 50;
/// Default Bézier resampling density
pub const DEFAULT_BEZIER_SAMPLES: usize = 20;

/// Minimum outline points for a sleeve split
pub const SLEEVE_MIN_POINTS: usize = 10;
/// Number of seam levels walked from cap to cuff
pub const SLEEVE_SEAM_LEVELS: usize = 25;
/// Height band (fraction of sleeve height) used to collect points per seam level
pub const SLEEVE_BAND_TOLERANCE: f64 = 0.04;
/// Top band (fraction of sleeve height) examined for back-side detection
pub const SLEEVE_CAP_BAND: f64 = 0.15;
/// Height ratio above which a level belongs to the cap region
pub const SLEEVE_CAP_RATIO: f64 = 0.7;
/// Height ratio below which a level belongs to the cuff region
pub const SLEEVE_CUFF_RATIO: f64 = 0.3;
/// Seam offset toward the back in the cap region
pub const SLEEVE_CAP_BIAS: f64 = 0.60;
/// Seam offset toward the back through the elbow
pub const SLEEVE_ELBOW_BIAS: f64 = 0.55;
/// Seam offset toward the back at the cuff
pub const SLEEVE_CUFF_BIAS: f64 = 0.50;
/// Height (fraction of sleeve height, measured up from the cuff) of the cuff split
pub const SLEEVE_CUFF_SPLIT_RATIO: f64 = 0.25;
/// Band (fraction of sleeve height) around the cuff split shared by both pieces
pub const SLEEVE_CUFF_SPLIT_TOLERANCE: f64 = 0.02;

/// Physical sheet size in cm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: A4_WIDTH_CM,
        height: A4_HEIGHT_CM,
    };

    /// Printable (width, height) once `margin` is removed from every side.
    pub fn usable(&self, margin: f64) -> (f64, f64) {
        (self.width - 2.0 * margin, self.height - 2.0 * margin)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Sheet size for tiled output
    pub page: PageSize,
    /// Margin kept inside every sheet edge
    pub margin: f64,
    /// Gap between packed pieces
    pub piece_spacing: f64,
    /// Pieces placed per row before wrapping
    pub pieces_per_row: usize,
    /// Longest thumbnail edge in pixels
    pub thumbnail_max_px: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            margin: DEFAULT_MARGIN_CM,
            piece_spacing: DEFAULT_PIECE_SPACING_CM,
            pieces_per_row: DEFAULT_PIECES_PER_ROW,
            thumbnail_max_px: DEFAULT_THUMBNAIL_MAX_PX,
        }
    }
}

impl ExportSettings {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.page.width <= 0.0 || self.page.height <= 0.0 {
            return Err(ConfigError::InvalidValue {
                name: "page".to_string(),
                reason: "page dimensions must be positive".to_string(),
            });
        }

        let max_margin = self.page.width.min(self.page.height) / 2.0;
        if !(0.0..max_margin).contains(&self.margin) {
            return Err(ConfigError::OutOfRange {
                name: "margin".to_string(),
                value: self.margin,
                min: 0.0,
                max: max_margin,
            });
        }

        if self.piece_spacing < 0.0 || !self.piece_spacing.is_finite() {
            return Err(ConfigError::InvalidValue {
                name: "piece_spacing".to_string(),
                reason: "spacing must be a non-negative number".to_string(),
            });
        }

        if self.pieces_per_row == 0 {
            return Err(ConfigError::InvalidValue {
                name: "pieces_per_row".to_string(),
                reason: "at least one piece per row is required".to_string(),
            });
        }

        if self.thumbnail_max_px == 0 {
            return Err(ConfigError::InvalidValue {
                name: "thumbnail_max_px".to_string(),
                reason: "thumbnail size must be > 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Sleeve split settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleeveSettings {
    pub min_points: usize,
    pub seam_levels: usize,
    pub band_tolerance: f64,
    pub cap_band: f64,
    pub cap_ratio: f64,
    pub cuff_ratio: f64,
    pub cap_bias: f64,
    pub elbow_bias: f64,
    pub cuff_bias: f64,
    pub cuff_split_ratio: f64,
    pub cuff_split_tolerance: f64,
}

impl Default for SleeveSettings {
    fn default() -> Self {
        Self {
            min_points: SLEEVE_MIN_POINTS,
            seam_levels: SLEEVE_SEAM_LEVELS,
            band_tolerance: SLEEVE_BAND_TOLERANCE,
            cap_band: SLEEVE_CAP_BAND,
            cap_ratio: SLEEVE_CAP_RATIO,
            cuff_ratio: SLEEVE_CUFF_RATIO,
            cap_bias: SLEEVE_CAP_BIAS,
            elbow_bias: SLEEVE_ELBOW_BIAS,
            cuff_bias: SLEEVE_CUFF_BIAS,
            cuff_split_ratio: SLEEVE_CUFF_SPLIT_RATIO,
            cuff_split_tolerance: SLEEVE_CUFF_SPLIT_TOLERANCE,
        }
    }
}

impl SleeveSettings {
    /// Seam bias for a level at `height_ratio` (1.0 at the cap, 0.0 at the cuff).
    pub fn bias_at(&self, height_ratio: f64) -> f64 {
        if height_ratio > self.cap_ratio {
            self.cap_bias
        } else if height_ratio >= self.cuff_ratio {
            self.elbow_bias
        } else {
            self.cuff_bias
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.seam_levels < 2 {
            return Err(ConfigError::InvalidValue {
                name: "seam_levels".to_string(),
                reason: "at least two seam levels are required".to_string(),
            });
        }

        let fractions = [
            ("band_tolerance", self.band_tolerance),
            ("cap_band", self.cap_band),
            ("cap_ratio", self.cap_ratio),
            ("cuff_ratio", self.cuff_ratio),
            ("cap_bias", self.cap_bias),
            ("elbow_bias", self.elbow_bias),
            ("cuff_bias", self.cuff_bias),
            ("cuff_split_ratio", self.cuff_split_ratio),
            ("cuff_split_tolerance", self.cuff_split_tolerance),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    name: name.to_string(),
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }

        if self.cuff_ratio > self.cap_ratio {
            return Err(ConfigError::InvalidValue {
                name: "cuff_ratio".to_string(),
                reason: "cuff region must lie below the cap region".to_string(),
            });
        }

        Ok(())
    }
}

/// Curve resampling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSettings {
    pub spline_samples: usize,
    pub bezier_samples: usize,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            spline_samples: DEFAULT_CURVE_SAMPLES,
            bezier_samples: DEFAULT_BEZIER_SAMPLES,
        }
    }
}

impl CurveSettings {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.spline_samples < 2 || self.bezier_samples < 2 {
            return Err(ConfigError::InvalidValue {
                name: "samples".to_string(),
                reason: "curves need at least two samples".to_string(),
            });
        }
        Ok(())
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub export: ExportSettings,
    pub sleeve: SleeveSettings,
    pub curve: CurveSettings,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let settings: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid TOML settings: {}", e)))?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        settings.validate()?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize settings: {}", e)))?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.export.validate()?;
        self.sleeve.validate()?;
        self.curve.validate()?;
        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
