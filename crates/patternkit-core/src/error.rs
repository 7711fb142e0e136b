//! Error handling for PatternKit
//!
//! Provides error types for every layer of the pattern pipeline:
//! - Piece errors (outline validation, piece map bookkeeping)
//! - Split errors (sleeve subdivision)
//! - Config errors (settings validation and file formats)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Pattern piece error type
///
/// Raised when a piece outline cannot be laid out or rendered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PieceError {
    /// Piece outline has fewer points than a closed shape needs
    #[error("Piece '{name}' has {count} points (minimum {min})")]
    TooFewPoints {
        /// The piece name.
        name: String,
        /// Number of points supplied.
        count: usize,
        /// Minimum number of points required.
        min: usize,
    },

    /// All points of the piece lie on one line
    #[error("Piece '{name}' is degenerate: all points are collinear")]
    Collinear {
        /// The piece name.
        name: String,
    },

    /// A coordinate is NaN or infinite
    #[error("Piece '{name}' contains a non-finite coordinate")]
    NonFinite {
        /// The piece name.
        name: String,
    },

    /// A piece with the same name is already present in the map
    #[error("Duplicate piece name: {0}")]
    DuplicateName(String),
}

/// Sleeve split error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    /// Sleeve outline is too sparse to locate cap, underarm and cuff
    #[error("Sleeve outline has {count} points (minimum {min})")]
    TooFewPoints {
        /// Number of points supplied.
        count: usize,
        /// Minimum number of points required.
        min: usize,
    },

    /// Requested number of sub-pieces is not supported
    #[error("Unsupported sleeve piece count: {0} (expected 2 or 3)")]
    UnsupportedPieceCount(usize),

    /// Outline geometry cannot be split
    #[error("Degenerate sleeve outline: {0}")]
    Degenerate(String),
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric setting is outside its valid range
    #[error("Setting '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        /// The setting name.
        name: String,
        /// The rejected value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A setting value is invalid
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue {
        /// The setting name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Settings file extension is not recognized
    #[error("Unsupported settings format: {0} (use .json or .toml)")]
    UnsupportedFormat(String),
}

/// Main error type for PatternKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Piece validation error
    #[error(transparent)]
    Piece(#[from] PieceError),

    /// Sleeve split error
    #[error(transparent)]
    Split(#[from] SplitError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rendering backend error
    #[error("Render error: {0}")]
    Render(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create a rendering error
    pub fn render(msg: impl Into<String>) -> Self {
        Error::Render(msg.into())
    }

    /// Check if the caller supplied geometry that cannot be processed
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::Piece(_)
                | Error::Split(SplitError::TooFewPoints { .. })
                | Error::Split(SplitError::Degenerate(_))
        )
    }

    /// Check if a sleeve split was requested with an unsupported piece count
    pub fn is_unsupported_piece_count(&self) -> bool {
        matches!(self, Error::Split(SplitError::UnsupportedPieceCount(_)))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
