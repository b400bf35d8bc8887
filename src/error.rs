//! Error types for configuration loading and field construction.
//!
//! None of these escape the simulation: `sim` recovers locally and logs.
//! They surface only at load boundaries owned by the host.

use thiserror::Error;

/// Problems with tuning or catalog data.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its allowed range.
    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    /// The catalog has no items at all.
    #[error("Item catalog is empty")]
    EmptyCatalog,

    /// Two items share an identifier.
    #[error("Duplicate item id '{0}'")]
    DuplicateItem(String),

    /// The fallback item is missing.
    #[error("Default item '{0}' is not in the catalog")]
    MissingDefault(String),
}

/// Ground surface could not be built for a chunk.
#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    /// Start or width is NaN/infinite.
    #[error("Non-finite ground bounds: start={start}, width={width}")]
    NonFinite { start: f32, width: f32 },

    /// Thickness is zero or negative.
    #[error("Degenerate ground thickness {0}")]
    Degenerate(f32),

    /// `start + width` rounds back to `start`.
    #[error("Ground at x={start} exceeds f32 precision for width {width}")]
    PrecisionLost { start: f32, width: f32 },
}
