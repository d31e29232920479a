//! Error types for the particle field core.

use thiserror::Error;

/// Errors produced by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero (or overflowed) when creating a scene or raster.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A settings value failed validation and was not applied.
    #[error("invalid setting '{name}': {reason}")]
    InvalidSetting { name: String, reason: String },

    /// A particle or cursor vector held NaN or infinity going into (or out of)
    /// an integration step.
    #[error("non-finite {what}: ({x}, {y})")]
    NonFiniteState { what: &'static str, x: f64, y: f64 },

    /// Settings were written while a read borrow of them was still held.
    #[error("settings are borrowed; drop the read guard before updating")]
    SettingsBusy,

    /// `shuffle` was requested before any particles were saved.
    #[error("no saved snapshot to restore")]
    NoSnapshot,

    /// Writing or reading an output file failed.
    #[error("i/o error: {0}")]
    Io(String),
}
