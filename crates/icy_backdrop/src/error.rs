//! Unified error types for icy_backdrop

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the fallible edges of the backdrop: settings files,
/// pattern decoding and parameter validation. Rendering and ticking never fail.
#[derive(Debug, Error)]
pub enum BackdropError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read settings file '{path}': {source}")]
    ReadSettings { path: PathBuf, source: std::io::Error },

    #[error("Invalid settings: {0}")]
    ParseSettings(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    SerializeSettings(#[from] toml::ser::Error),

    #[error("Divider must be a positive finite number, got {value}")]
    InvalidDivider { value: f64 },

    #[error("Activation date '{date}' is not in YYYY/MM/dd format")]
    InvalidActivationDate { date: String },

    #[error("Failed to decode pattern image '{path}': {source}")]
    DecodeImage { path: PathBuf, source: image::ImageError },
}

pub type BackdropResult<T> = Result<T, BackdropError>;
